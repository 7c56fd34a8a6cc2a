//! slide-2048: the rules engine of a sliding-tile merge puzzle
//!
//! This crate provides:
//! - A flat, row-major `Grid` of cells with derived row/column views (`grid` module)
//! - The per-line compact/merge/compact tick (`line` module)
//! - Weighted random spawn values (`weighted` module)
//! - A `Game` session with moves, spawns, terminal detection and bounded undo (`engine`, `history`)
//! - A checksummed save-game format (`serialization` module)
//!
//! Quick start:
//! ```
//! use slide_2048::config::GameConfig;
//! use slide_2048::engine::{Game, GameEvent, Move};
//!
//! // Deterministic session with a seeded RNG
//! let mut game = Game::seeded(&GameConfig::default(), 42).unwrap();
//! game.start();
//!
//! let outcome = game.make_move(Move::Left).unwrap();
//! if outcome.changed {
//!     assert!(game.can_undo());
//! }
//! for event in game.drain_events() {
//!     if let GameEvent::GameOver { won } = event {
//!         println!("finished, won = {won}");
//!     }
//! }
//! ```
//!
//! Save and resume
//! ```
//! use slide_2048::config::GameConfig;
//! use slide_2048::engine::Game;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("save.s2sv");
//! let mut game = Game::seeded(&GameConfig::default(), 1).unwrap();
//! game.start();
//! game.save_to(&path).unwrap();
//!
//! let mut resumed = Game::seeded(&GameConfig::default(), 2).unwrap();
//! assert!(resumed.load_from(&path).unwrap());
//! assert_eq!(resumed.snapshot(), game.snapshot());
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod line;
pub mod serialization;
pub mod weighted;

pub use config::GameConfig;
pub use engine::{Game, GameEvent, GameState, Move, MoveOutcome};
pub use error::GameError;
