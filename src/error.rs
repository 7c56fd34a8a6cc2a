use crate::engine::GameState;
use crate::serialization::ArchiveError;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("operation requires a game in progress (state: {0:?})")]
    NotPlaying(GameState),
    #[error("archive holds {found} cells but the grid has {expected}")]
    CorruptArchive { expected: usize, found: usize },
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
}
