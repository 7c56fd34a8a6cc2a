use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::grid::{Cell, Grid, Tile};
use crate::history::UndoHistory;
use crate::line;
use crate::serialization::{self, Archive};
use crate::weighted::{WeightedItem, WeightedRandomSet};

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// (ticks rows, lines read reversed). Lines merge toward their END, so
    /// reversing a row sends tiles left and reversing a column sends them up.
    #[inline]
    fn orientation(self) -> (bool, bool) {
        match self {
            Move::Left => (true, true),
            Move::Right => (true, false),
            Move::Up => (false, true),
            Move::Down => (false, false),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "k" | "up" => Ok(Move::Up),
            "s" | "j" | "down" => Ok(Move::Down),
            "a" | "h" | "left" => Ok(Move::Left),
            "d" | "l" | "right" => Ok(Move::Right),
            other => Err(GameError::InvalidArgument(format!("unknown direction {other:?}"))),
        }
    }
}

/// Lifecycle of a session: `Ready -> Playing -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Playing,
    Finished,
}

/// Notifications for whoever presents the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `append`: add `delta` to the shown score; otherwise `delta` is the new score.
    ScoreChanged { delta: u64, append: bool },
    /// Raised once per transition into `Finished`.
    GameOver { won: bool },
}

/// Result of one [`Game::make_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Move,
    /// Any tile slid or merged.
    pub changed: bool,
    pub score_delta: u64,
    pub merges: usize,
    /// A merge on this move reached the win threshold.
    pub won: bool,
    /// Cells filled by the spawn step.
    pub spawned: Vec<usize>,
    pub game_over: bool,
}

/// The rules engine: owns the grid, spawn table, undo history and RNG.
///
/// Everything runs synchronously on the caller's thread; the RNG is injected
/// so a seeded session replays identically.
///
/// ```
/// use slide_2048::config::GameConfig;
/// use slide_2048::engine::{Game, GameState, Move};
///
/// let mut game = Game::seeded(&GameConfig::default(), 42).unwrap();
/// game.start();
/// assert_eq!(game.state(), GameState::Playing);
/// assert_eq!(game.grid().count_empty(), 14);
/// let outcome = game.make_move(Move::Left).unwrap();
/// assert_eq!(outcome.direction, Move::Left);
/// ```
pub struct Game<C = Cell, R = StdRng> {
    grid: Grid<C>,
    generator: WeightedRandomSet<WeightedItem>,
    history: UndoHistory,
    rng: R,
    win_threshold: u32,
    initial_tiles: usize,
    score: u64,
    state: GameState,
    reached_win: bool,
    events: Vec<GameEvent>,
}

impl Game<Cell, StdRng> {
    /// A session seeded from OS entropy.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A reproducible session.
    pub fn seeded(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<Cell, R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        Self::with_cells(config, Vec::new(), rng)
    }
}

impl<C: Tile, R: Rng> Game<C, R> {
    /// Build a session over caller-provided cells (allocated when empty).
    ///
    /// The game stays `Ready` until [`start`](Self::start).
    pub fn with_cells(config: &GameConfig, cells: Vec<C>, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::with_cells(config.rows, config.columns, cells)?;
        let generator = WeightedRandomSet::from_items(config.weights.iter().copied())?;
        Ok(Game {
            grid,
            generator,
            history: UndoHistory::new(config.undo_depth),
            rng,
            win_threshold: config.win_threshold,
            initial_tiles: config.initial_tiles,
            score: 0,
            state: GameState::Ready,
            reached_win: false,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid<C> { &self.grid }

    #[inline]
    pub fn score(&self) -> u64 { self.score }

    #[inline]
    pub fn state(&self) -> GameState { self.state }

    /// Whether the board has reached the win threshold. Undo and restore
    /// re-derive it from the restored tiles.
    #[inline]
    pub fn has_won(&self) -> bool { self.reached_win }

    #[inline]
    pub fn win_threshold(&self) -> u32 { self.win_threshold }

    #[inline]
    pub fn history(&self) -> &UndoHistory { &self.history }

    #[inline]
    pub fn can_undo(&self) -> bool { self.state == GameState::Playing && !self.history.is_empty() }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> { std::mem::take(&mut self.events) }

    /// Zero every cell without touching score, history or state.
    pub fn reset_board(&mut self) { self.grid.reset(); }

    /// Start (or restart) a game: zero score and board, spawn the opening
    /// tiles, forget undo history.
    pub fn start(&mut self) {
        self.set_score(0);
        self.grid.reset();
        self.history.clear();
        self.reached_win = false;
        self.state = GameState::Playing;
        if self.initial_tiles > 0 && self.spawn_tiles(self.initial_tiles).is_none() {
            log::warn!("could not place {} opening tiles", self.initial_tiles);
        }
        log::info!("game started on a {}x{} grid", self.grid.rows(), self.grid.columns());
        self.finish_if_locked(false);
    }

    /// Slide and merge every line toward `direction`, then spawn one tile if
    /// anything changed.
    pub fn make_move(&mut self, direction: Move) -> Result<MoveOutcome, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying(self.state));
        }
        let before = self.snapshot();
        let (by_rows, reverse) = direction.orientation();
        let line_count = if by_rows { self.grid.rows() } else { self.grid.columns() };

        let mut outcome = MoveOutcome {
            direction,
            changed: false,
            score_delta: 0,
            merges: 0,
            won: false,
            spawned: Vec::new(),
            game_over: false,
        };
        for i in 0..line_count {
            let line = if by_rows { self.grid.row(i, reverse) } else { self.grid.column(i, reverse) };
            if line.indices.is_empty() || line.all_empty {
                continue;
            }
            let events = &mut self.events;
            let tick = line::tick_line(self.grid.cells_mut(), &line.indices, self.win_threshold, |value| {
                events.push(GameEvent::ScoreChanged { delta: u64::from(value), append: true });
            });
            outcome.changed |= tick.changed;
            outcome.won |= tick.won;
            outcome.merges += tick.merges;
            outcome.score_delta += tick.score_delta;
        }

        self.score += outcome.score_delta;
        self.reached_win |= outcome.won;
        if outcome.changed {
            self.history.push(before);
            match self.spawn_tiles(1) {
                Some(spawned) => outcome.spawned = spawned,
                None => log::warn!("move {direction} changed the board but no tile could be spawned"),
            }
        }
        outcome.game_over = self.finish_if_locked(outcome.won);
        log::debug!(
            "move {} changed={} merges={} score+{} -> {}",
            direction,
            outcome.changed,
            outcome.merges,
            outcome.score_delta,
            self.score
        );
        Ok(outcome)
    }

    /// Step back to the most recent snapshot. `Ok(false)` when there is none.
    pub fn undo(&mut self) -> Result<bool, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying(self.state));
        }
        match self.history.pop() {
            Some(snapshot) => {
                self.restore(&snapshot)?;
                log::debug!("undo -> score {}", self.score);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear_history(&mut self) { self.history.clear(); }

    /// True iff the board is full and no orthogonal neighbours match.
    #[inline]
    pub fn is_game_over(&self) -> bool { self.grid.is_locked() }

    /// Capture score and every cell value.
    pub fn snapshot(&self) -> Archive { Archive::new(self.score, self.grid.values()) }

    /// Replace board and score with `archive` and re-derive the win flag from
    /// the restored tiles. A cell-count mismatch leaves the game untouched.
    pub fn restore(&mut self, archive: &Archive) -> Result<(), GameError> {
        self.grid.set_values(&archive.cells)?;
        self.set_score(archive.score);
        self.reached_win = self.grid.highest_value() >= self.win_threshold;
        Ok(())
    }

    /// Save the current state. An empty path does nothing.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), GameError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        serialization::write_to_path(path, &self.snapshot())?;
        log::info!("saved game to {}", path.display());
        Ok(())
    }

    /// Load a saved state and resume play. Returns `Ok(false)` when there is
    /// no archive at `path` (or `path` is empty) so the caller can start fresh.
    ///
    /// A loaded board with no moves left finishes the game immediately.
    pub fn load_from<P: AsRef<Path>>(&mut self, path: P) -> Result<bool, GameError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(false);
        }
        let Some(archive) = serialization::read_from_path(path)? else {
            log::info!("no archive at {}", path.display());
            return Ok(false);
        };
        self.restore(&archive)?;
        self.state = GameState::Playing;
        log::info!("loaded {:?} from {} (score {})", archive.name, path.display(), archive.score);
        self.finish_if_locked(self.reached_win);
        Ok(true)
    }

    /// Set one cell; out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, value: u32) { self.grid.set_value(index, value); }

    /// Fill `count` distinct empty cells, chosen uniformly, with weighted
    /// values. Places nothing and returns `None` if fewer than `count` cells
    /// are free.
    pub fn spawn_tiles(&mut self, count: usize) -> Option<Vec<usize>> {
        let mut empty: Vec<usize> = self.grid.empty_cells().iter().map(|c| c.position()).collect();
        if empty.is_empty() {
            return None;
        }
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            if empty.is_empty() {
                break;
            }
            let i = self.rng.gen_range(0..empty.len());
            picked.push(empty.swap_remove(i));
        }
        if picked.len() != count {
            return None;
        }
        let mut placed = Vec::with_capacity(count);
        for &index in &picked {
            let value = self.generator.select(&mut self.rng)?.value;
            placed.push((index, value));
        }
        for (index, value) in placed {
            self.grid.set_value(index, value);
        }
        Some(picked)
    }

    fn set_score(&mut self, score: u64) {
        self.score = score;
        self.events.push(GameEvent::ScoreChanged { delta: score, append: false });
    }

    fn finish_if_locked(&mut self, won: bool) -> bool {
        if !self.grid.is_locked() {
            return false;
        }
        self.state = GameState::Finished;
        self.events.push(GameEvent::GameOver { won });
        log::info!("game over: score {} highest tile {} won={}", self.score, self.grid.highest_value(), won);
        true
    }
}

impl<C: Tile, R> fmt::Display for Game<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}{}", self.score, self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn blank(rows: usize, columns: usize) -> Game {
        let config = GameConfig::new(rows, columns).with_initial_tiles(0);
        let mut game = Game::seeded(&config, 7).unwrap();
        game.start();
        game.drain_events();
        game
    }

    fn blank_with(config: GameConfig) -> Game {
        let mut game = Game::seeded(&config.with_initial_tiles(0), 7).unwrap();
        game.start();
        game.drain_events();
        game
    }

    fn fill(game: &mut Game, values: &[u32]) {
        for (i, &v) in values.iter().enumerate() {
            game.set_value(i, v);
        }
    }

    /// Expected nonzero cells hold their values; exactly one expected-empty
    /// cell received the spawn.
    fn assert_after_spawn(game: &Game, outcome: &MoveOutcome, expected: &[u32]) {
        let values = game.grid().values();
        assert_eq!(outcome.spawned.len(), 1);
        let spawned = outcome.spawned[0];
        assert_eq!(expected[spawned], 0, "spawned onto an occupied cell");
        for (i, (&got, &want)) in values.iter().zip(expected).enumerate() {
            if i == spawned {
                assert!(got == 2 || got == 4);
            } else {
                assert_eq!(got, want, "cell {i}");
            }
        }
    }

    #[test]
    fn start_spawns_opening_tiles() {
        let mut game = Game::seeded(&GameConfig::default(), 1).unwrap();
        assert_eq!(game.state(), GameState::Ready);
        game.start();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().count_empty(), 14);
        assert!(game.grid().values().iter().all(|&v| v == 0 || v == 2 || v == 4));
        assert_eq!(game.drain_events(), vec![GameEvent::ScoreChanged { delta: 0, append: false }]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn moves_rejected_outside_playing() {
        let mut game = Game::seeded(&GameConfig::default(), 1).unwrap();
        assert!(matches!(game.make_move(Move::Left), Err(GameError::NotPlaying(GameState::Ready))));
        assert!(matches!(game.undo(), Err(GameError::NotPlaying(GameState::Ready))));
    }

    #[test]
    fn pair_merges_left() {
        let mut game = blank(1, 4);
        fill(&mut game, &[2, 2, 0, 0]);
        let outcome = game.make_move(Move::Left).unwrap();
        assert!(outcome.changed);
        assert!(!outcome.won);
        assert_eq!(outcome.score_delta, 2);
        assert_eq!(game.score(), 2);
        assert_after_spawn(&game, &outcome, &[4, 0, 0, 0]);
        assert_eq!(game.drain_events(), vec![GameEvent::ScoreChanged { delta: 2, append: true }]);
    }

    #[test]
    fn four_of_a_kind_merges_twice() {
        let mut game = blank(1, 4);
        fill(&mut game, &[2, 2, 2, 2]);
        let outcome = game.make_move(Move::Left).unwrap();
        assert_eq!(outcome.merges, 2);
        assert_eq!(game.score(), 4);
        assert_after_spawn(&game, &outcome, &[4, 4, 0, 0]);
    }

    const SAMPLE: [u32; 9] = [2, 0, 2, 2, 4, 0, 0, 4, 2];

    #[test]
    fn move_right() {
        let mut game = blank(3, 3);
        fill(&mut game, &SAMPLE);
        let outcome = game.make_move(Move::Right).unwrap();
        assert_after_spawn(&game, &outcome, &[0, 0, 4, 0, 2, 4, 0, 4, 2]);
    }

    #[test]
    fn move_left() {
        let mut game = blank(3, 3);
        fill(&mut game, &SAMPLE);
        let outcome = game.make_move(Move::Left).unwrap();
        assert_after_spawn(&game, &outcome, &[4, 0, 0, 2, 4, 0, 4, 2, 0]);
    }

    #[test]
    fn move_down() {
        let mut game = blank(3, 3);
        fill(&mut game, &SAMPLE);
        let outcome = game.make_move(Move::Down).unwrap();
        assert_eq!(outcome.merges, 3);
        assert_after_spawn(&game, &outcome, &[0, 0, 0, 0, 0, 0, 4, 8, 4]);
    }

    #[test]
    fn move_up() {
        let mut game = blank(3, 3);
        fill(&mut game, &SAMPLE);
        let outcome = game.make_move(Move::Up).unwrap();
        assert_after_spawn(&game, &outcome, &[4, 8, 4, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn unchanged_move_spawns_nothing_and_keeps_history() {
        let mut game = blank(2, 2);
        fill(&mut game, &[2, 4, 0, 0]);
        let outcome = game.make_move(Move::Up).unwrap();
        assert!(!outcome.changed);
        assert!(outcome.spawned.is_empty());
        assert!(!outcome.game_over);
        assert!(game.history().is_empty());
        assert_eq!(game.grid().values(), vec![2, 4, 0, 0]);
    }

    #[test]
    fn undo_restores_pre_move_state() {
        let mut game = Game::seeded(&GameConfig::default(), 99).unwrap();
        game.start();
        let mut before = None;
        for dir in Move::ALL {
            let snapshot = game.snapshot();
            if game.make_move(dir).unwrap().changed {
                before = Some(snapshot);
                break;
            }
        }
        let before = before.expect("a two-tile board always has a changing move");
        assert!(game.can_undo());
        game.drain_events();
        assert!(game.undo().unwrap());
        assert_eq!(game.snapshot(), before);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::ScoreChanged { delta: before.score, append: false }]
        );
        assert!(!game.undo().unwrap());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn undo_depth_is_bounded() {
        let mut game = blank_with(GameConfig::new(1, 4).with_undo_depth(2));
        for _ in 0..3 {
            fill(&mut game, &[2, 0, 0, 0]);
            game.make_move(Move::Right).unwrap();
        }
        assert_eq!(game.history().len(), 2);
        assert!(game.undo().unwrap());
        assert!(game.undo().unwrap());
        assert!(!game.undo().unwrap());
    }

    #[test]
    fn locked_board_finishes_game() {
        let config = GameConfig::new(1, 2).with_weights(vec![WeightedItem::new(4, 1)]);
        let mut game = blank_with(config);
        fill(&mut game, &[2, 0]);
        let outcome = game.make_move(Move::Right).unwrap();
        assert_eq!(game.grid().values(), vec![4, 2]);
        assert!(outcome.game_over);
        assert!(game.is_game_over());
        assert_eq!(game.state(), GameState::Finished);
        assert_eq!(game.drain_events(), vec![GameEvent::GameOver { won: false }]);
        assert!(matches!(game.make_move(Move::Left), Err(GameError::NotPlaying(GameState::Finished))));
        assert!(!game.can_undo());
    }

    #[test]
    fn winning_merge_reported() {
        let config = GameConfig::new(1, 2)
            .with_win_threshold(4)
            .with_weights(vec![WeightedItem::new(2, 1)]);
        let mut game = blank_with(config);
        fill(&mut game, &[2, 2]);
        let outcome = game.make_move(Move::Left).unwrap();
        assert!(outcome.won);
        assert!(game.has_won());
        assert_eq!(game.grid().values(), vec![4, 2]);
        assert!(outcome.game_over);
        let events = game.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { won: true }));
    }

    #[test]
    fn full_board_with_pairs_is_not_over() {
        let mut game = blank(2, 2);
        fill(&mut game, &[2, 2, 4, 8]);
        assert!(!game.is_game_over());
        fill(&mut game, &[2, 4, 8, 16]);
        assert!(game.is_game_over());
    }

    #[test]
    fn spawn_tiles_is_all_or_nothing() {
        let mut game = blank(2, 2);
        fill(&mut game, &[2, 0, 4, 0]);
        assert!(game.spawn_tiles(3).is_none());
        assert_eq!(game.grid().count_empty(), 2);
        let picked = game.spawn_tiles(2).unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(game.grid().count_empty(), 0);
        assert!(game.spawn_tiles(1).is_none());
    }

    #[test]
    fn seeded_sessions_replay() {
        let config = GameConfig::default();
        let mut a = Game::seeded(&config, 2024).unwrap();
        let mut b = Game::seeded(&config, 2024).unwrap();
        a.start();
        b.start();
        for dir in [Move::Left, Move::Up, Move::Right, Move::Down, Move::Left] {
            assert_eq!(a.make_move(dir).unwrap(), b.make_move(dir).unwrap());
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn restore_rejects_wrong_cell_count() {
        let mut game = blank(2, 2);
        fill(&mut game, &[2, 0, 0, 0]);
        let err = game.restore(&Archive::new(50, vec![2; 9])).unwrap_err();
        assert!(matches!(err, GameError::CorruptArchive { expected: 4, found: 9 }));
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().values(), vec![2, 0, 0, 0]);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.s2sv");
        let mut game = Game::seeded(&GameConfig::default(), 3).unwrap();
        game.start();
        game.make_move(Move::Down).unwrap();
        game.save_to(&path).unwrap();
        let saved = game.snapshot();

        let mut other = Game::seeded(&GameConfig::default(), 4).unwrap();
        assert!(other.load_from(&path).unwrap());
        assert_eq!(other.state(), GameState::Playing);
        assert_eq!(other.snapshot(), saved);

        assert!(!other.load_from(dir.path().join("missing.s2sv")).unwrap());
        assert!(!other.load_from("").unwrap());
        game.save_to("").unwrap();
    }

    #[test]
    fn load_rejects_other_grid_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.s2sv");
        let mut small = blank(2, 2);
        fill(&mut small, &[2, 4, 8, 16]);
        small.save_to(&path).unwrap();
        let mut big = Game::seeded(&GameConfig::default(), 1).unwrap();
        assert!(matches!(big.load_from(&path), Err(GameError::CorruptArchive { expected: 16, found: 4 })));
        assert_eq!(big.state(), GameState::Ready);
    }

    #[test]
    fn undo_of_winning_move_clears_win() {
        let mut game = blank_with(GameConfig::new(1, 4).with_win_threshold(8));
        fill(&mut game, &[4, 4, 0, 0]);
        let outcome = game.make_move(Move::Left).unwrap();
        assert!(outcome.won);
        assert!(game.has_won());
        assert!(game.undo().unwrap());
        assert_eq!(game.grid().values(), vec![4, 4, 0, 0]);
        assert!(!game.has_won());
    }

    #[test]
    fn loading_locked_board_finishes_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.s2sv");
        let mut saved = blank(2, 2);
        fill(&mut saved, &[2, 4, 8, 16]);
        saved.save_to(&path).unwrap();

        let mut game = Game::seeded(&GameConfig::new(2, 2), 9).unwrap();
        assert!(game.load_from(&path).unwrap());
        assert!(game.is_game_over());
        assert_eq!(game.state(), GameState::Finished);
        assert!(!game.can_undo());
        let overs: Vec<_> = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs, vec![GameEvent::GameOver { won: false }]);
    }

    #[test]
    fn reset_board_only_clears_cells() {
        let mut game = blank(1, 4);
        fill(&mut game, &[2, 2, 0, 0]);
        game.make_move(Move::Left).unwrap();
        game.reset_board();
        assert_eq!(game.grid().count_empty(), 4);
        assert_eq!(game.score(), 2);
        assert_eq!(game.history().len(), 1);
        game.clear_history();
        assert!(game.history().is_empty());
    }

    #[test]
    fn parse_directions() {
        assert_eq!("w".parse::<Move>().unwrap(), Move::Up);
        assert_eq!("LEFT".parse::<Move>().unwrap(), Move::Left);
        assert_eq!(" j ".parse::<Move>().unwrap(), Move::Down);
        assert!("x".parse::<Move>().is_err());
        assert_eq!(Move::Right.to_string(), "right");
    }

    #[test]
    fn display_shows_score_and_board() {
        let mut game = blank(1, 2);
        fill(&mut game, &[2, 4]);
        let text = game.to_string();
        assert!(text.starts_with("Score: 0"));
        assert!(text.contains("   2   |   4   "));
    }
}
