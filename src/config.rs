use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::weighted::{WeightedItem, DEFAULT_WEIGHTS};

/// Everything needed to set up a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    /// Snapshots kept for undo.
    pub undo_depth: usize,
    /// A merge producing a tile at least this large wins.
    pub win_threshold: u32,
    /// Tiles spawned when a game starts.
    pub initial_tiles: usize,
    pub weights: Vec<WeightedItem>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 4,
            columns: 4,
            undo_depth: 3,
            win_threshold: 2048,
            initial_tiles: 2,
            weights: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, columns: usize) -> Self {
        GameConfig { rows, columns, ..Self::default() }
    }

    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self
    }

    pub fn with_win_threshold(mut self, threshold: u32) -> Self {
        self.win_threshold = threshold;
        self
    }

    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    pub fn with_weights(mut self, weights: Vec<WeightedItem>) -> Self {
        self.weights = weights;
        self
    }

    #[inline]
    pub fn cell_count(&self) -> usize { self.rows.saturating_mul(self.columns) }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.initial_tiles > self.cell_count() {
            return Err(GameError::InvalidArgument(format!(
                "cannot spawn {} initial tiles on {} cells",
                self.initial_tiles,
                self.cell_count()
            )));
        }
        if self.win_threshold == 0 {
            return Err(GameError::InvalidArgument("win threshold must be positive".into()));
        }
        if self.weights.is_empty() {
            return Err(GameError::InvalidArgument("at least one spawn weight is required".into()));
        }
        if let Some(bad) = self.weights.iter().find(|w| w.weight == 0) {
            return Err(GameError::InvalidArgument(format!("weight for tile {} must be positive", bad.value)));
        }
        Ok(())
    }
}
