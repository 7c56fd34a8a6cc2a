use std::fmt;

use crate::error::GameError;

/// The capabilities the grid needs from a cell: a value and a fixed position.
///
/// Front ends can store extra per-cell state (animation hints, view models)
/// by providing their own implementation; the engine never looks further.
pub trait Tile {
    /// A fresh, empty cell at `position`.
    fn empty(position: usize) -> Self;
    fn value(&self) -> u32;
    fn set_value(&mut self, value: u32);
    fn position(&self) -> usize;
}

/// Plain cell: `value` 0 means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    value: u32,
    position: usize,
}

impl Cell {
    pub const fn new(position: usize, value: u32) -> Self {
        Cell { value, position }
    }
}

impl Tile for Cell {
    #[inline]
    fn empty(position: usize) -> Self { Cell { value: 0, position } }

    #[inline]
    fn value(&self) -> u32 { self.value }

    #[inline]
    fn set_value(&mut self, value: u32) { self.value = value; }

    #[inline]
    fn position(&self) -> usize { self.position }
}

/// One row or column as flat indices into the grid, in tick order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub indices: Vec<usize>,
    pub all_empty: bool,
}

impl Line {
    fn empty() -> Self {
        Line { indices: Vec::new(), all_empty: true }
    }
}

/// Row-major arena of cells: `index = row * columns + column`.
///
/// Rows and columns are always derived as index lists; the grid is the only
/// owner of cell state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<C = Cell> {
    rows: usize,
    columns: usize,
    cells: Vec<C>,
}

impl<C: Tile> Grid<C> {
    /// An all-empty `rows x columns` grid.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GameError> {
        Self::with_cells(rows, columns, Vec::new())
    }

    /// Adopt caller-provided cells, or allocate them when `cells` is empty.
    pub fn with_cells(rows: usize, columns: usize, cells: Vec<C>) -> Result<Self, GameError> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidArgument(format!("grid dimensions must be positive, got {rows}x{columns}")));
        }
        let total = rows
            .checked_mul(columns)
            .ok_or_else(|| GameError::InvalidArgument(format!("grid {rows}x{columns} is too large")))?;
        if !cells.is_empty() && cells.len() != total {
            return Err(GameError::InvalidArgument(format!(
                "expected {total} cells for a {rows}x{columns} grid, got {}",
                cells.len()
            )));
        }
        if let Some((i, cell)) = cells.iter().enumerate().find(|(i, c)| c.position() != *i) {
            return Err(GameError::InvalidArgument(format!("cell at slot {i} reports position {}", cell.position())));
        }
        let mut grid = Grid { rows, columns, cells };
        if grid.cells.is_empty() {
            grid.reset();
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize { self.rows }

    #[inline]
    pub fn columns(&self) -> usize { self.columns }

    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    #[inline]
    pub fn cells(&self) -> &[C] { &self.cells }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [C] { &mut self.cells }

    /// Value at `index`, `None` when out of range.
    #[inline]
    pub fn value(&self, index: usize) -> Option<u32> { self.cells.get(index).map(Tile::value) }

    /// Value at (`row`, `column`).
    #[inline]
    pub fn value_at(&self, row: usize, column: usize) -> Option<u32> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.value(row * self.columns + column)
    }

    pub fn values(&self) -> Vec<u32> { self.cells.iter().map(Tile::value).collect() }

    /// Zero every cell, allocating the arena first if it is empty.
    pub fn reset(&mut self) {
        let total = self.rows * self.columns;
        if self.cells.is_empty() {
            self.cells = (0..total).map(C::empty).collect();
        } else {
            for cell in &mut self.cells {
                cell.set_value(0);
            }
        }
    }

    /// Set one cell. Out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, value: u32) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.set_value(value);
        }
    }

    /// Overwrite every cell from `values`; lengths must match.
    pub fn set_values(&mut self, values: &[u32]) -> Result<(), GameError> {
        if values.len() != self.cells.len() {
            return Err(GameError::CorruptArchive { expected: self.cells.len(), found: values.len() });
        }
        for (cell, &value) in self.cells.iter_mut().zip(values) {
            cell.set_value(value);
        }
        Ok(())
    }

    /// Row `index`, left to right, or right to left when `reverse`.
    pub fn row(&self, index: usize, reverse: bool) -> Line {
        if index >= self.rows {
            return Line::empty();
        }
        let start = index * self.columns;
        self.collect_line((start..start + self.columns).collect(), reverse)
    }

    /// Column `index`, top to bottom, or bottom to top when `reverse`.
    pub fn column(&self, index: usize, reverse: bool) -> Line {
        if index >= self.columns {
            return Line::empty();
        }
        self.collect_line((0..self.rows).map(|r| r * self.columns + index).collect(), reverse)
    }

    fn collect_line(&self, mut indices: Vec<usize>, reverse: bool) -> Line {
        let all_empty = indices.iter().all(|&i| self.cells[i].value() == 0);
        if reverse {
            indices.reverse();
        }
        Line { indices, all_empty }
    }

    /// Cells currently holding 0.
    pub fn empty_cells(&self) -> Vec<&C> { self.cells.iter().filter(|c| c.value() == 0).collect() }

    pub fn count_empty(&self) -> usize { self.cells.iter().filter(|c| c.value() == 0).count() }

    pub fn highest_value(&self) -> u32 { self.cells.iter().map(Tile::value).max().unwrap_or(0) }

    /// True when no cell is empty and no two orthogonal neighbours match.
    pub fn is_locked(&self) -> bool {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let index = row * self.columns + column;
                let value = self.cells[index].value();
                if value == 0 {
                    return false;
                }
                if column + 1 < self.columns && self.cells[index + 1].value() == value {
                    return false;
                }
                if row + 1 < self.rows && self.cells[index + self.columns].value() == value {
                    return false;
                }
            }
        }
        true
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{x:^7}"),
    }
}

impl<C: Tile> fmt::Display for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.columns * 8 - 1);
        writeln!(f)?;
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f, "{separator}")?;
            }
            let line: Vec<String> = (0..self.columns)
                .map(|column| format_val(self.cells[row * self.columns + column].value()))
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
