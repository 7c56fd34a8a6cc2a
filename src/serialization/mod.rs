//! Save-game archives.
//!
//! Snapshots are written as a framed postcard record with an explicit cell
//! count and a CRC32C trailer. The same [`Archive`] value backs the undo
//! history.

mod archive;

pub use archive::{
    Archive,
    ArchiveError,
    DEFAULT_NAME,
    encode,
    decode,
    write_to_path,
    read_from_path,
};
