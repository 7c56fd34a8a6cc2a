//! Compaction and merging of a single row or column.
//!
//! A line arrives as grid indices ordered so that tiles travel toward the END
//! of the list. One tick is compact, merge, compact; each tile merges at most
//! once.

use crate::grid::Tile;

/// What one line tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineTick {
    pub changed: bool,
    pub won: bool,
    pub merges: usize,
    pub score_delta: u64,
}

/// Tick one line in place. `on_merge` receives the pre-merge value of every
/// merged pair, which is also the score the merge is worth.
pub fn tick_line<C, F>(cells: &mut [C], line: &[usize], win_threshold: u32, mut on_merge: F) -> LineTick
where
    C: Tile,
    F: FnMut(u32),
{
    let mut tick = LineTick::default();

    tick.changed |= compact(cells, line);

    let mut i = 0;
    while i < line.len() {
        let value = cells[line[i]].value();
        if value != 0 && i + 1 < line.len() && cells[line[i + 1]].value() == value {
            let merged = value.saturating_add(value);
            cells[line[i + 1]].set_value(merged);
            cells[line[i]].set_value(0);
            on_merge(value);
            tick.score_delta += u64::from(value);
            tick.merges += 1;
            tick.changed = true;
            if merged >= win_threshold {
                tick.won = true;
            }
            // The merged tile is spent for this tick.
            i += 2;
        } else {
            i += 1;
        }
    }

    tick.changed |= compact(cells, line);
    log::trace!("line {:?} -> {:?}", line, tick);
    tick
}

/// Slide nonzero values toward the end of `line`, keeping their order.
///
/// Returns whether anything moved.
pub fn compact<C: Tile>(cells: &mut [C], line: &[usize]) -> bool {
    let mut kept = Vec::with_capacity(line.len());
    let mut seen_gap = false;
    let mut needs_move = false;
    for &index in line.iter().rev() {
        let value = cells[index].value();
        if value != 0 {
            if seen_gap {
                needs_move = true;
            }
            kept.push(value);
        } else {
            seen_gap = true;
        }
    }

    if kept.len() == line.len() || !needs_move {
        return false;
    }

    for (k, &index) in line.iter().rev().enumerate() {
        cells[index].set_value(kept.get(k).copied().unwrap_or(0));
    }
    true
}
