use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

const MAGIC: &[u8; 4] = b"S2SV"; // ASCII magic
const VERSION: u8 = 1;
const HEADER_LEN: usize = 4 + 1;
const CHECKSUM_LEN: usize = 4;

/// Label given to snapshots that are not named explicitly.
pub const DEFAULT_NAME: &str = "archive";

/// A captured game state: score plus every cell value in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub name: String,
    pub score: u64,
    pub cells: Vec<u32>,
}

impl Archive {
    pub fn new(score: u64, cells: Vec<u32>) -> Self {
        Archive { name: DEFAULT_NAME.to_string(), score, cells }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// On-disk v1 record. `cell_count` is stored explicitly so a truncated or
/// hand-edited cell list is caught before it reaches a grid.
#[derive(Serialize)]
struct RecordRef<'a> {
    name: &'a str,
    score: u64,
    cell_count: u32,
    cells: &'a [u32],
}

#[derive(Deserialize)]
struct Record {
    name: String,
    score: u64,
    cell_count: u32,
    cells: Vec<u32>,
}

#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("postcard error: {0}")]
    Postcard(#[from] postcard::Error),
    #[error("invalid magic or version")]
    MagicOrVersion,
    #[error("checksum mismatch")]
    Checksum,
    #[error("archive too short or malformed")]
    Malformed,
    #[error("archive declares {declared} cells but holds {actual}")]
    CellCount { declared: u32, actual: usize },
}

/// Encode an archive as `MAGIC | VERSION | postcard record | crc32c`.
pub fn encode(archive: &Archive) -> Result<Vec<u8>, ArchiveError> {
    let cell_count: u32 = archive.cells.len().try_into().map_err(|_| ArchiveError::Malformed)?;
    let record = RecordRef { name: &archive.name, score: archive.score, cell_count, cells: &archive.cells };
    let payload = postcard::to_allocvec(&record)?;
    Ok(frame(&payload))
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(payload);
    let checksum = crc32c::crc32c(&buf);
    buf.extend_from_slice(&checksum.to_le_bytes());
    buf
}

/// Decode bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Archive, ArchiveError> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(ArchiveError::Malformed);
    }
    let (content, trailer) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let file_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    if file_crc != crc32c::crc32c(content) {
        return Err(ArchiveError::Checksum);
    }
    if &content[..4] != MAGIC || content[4] != VERSION {
        return Err(ArchiveError::MagicOrVersion);
    }

    let record: Record = postcard::from_bytes(&content[HEADER_LEN..])?;
    if record.cell_count as usize != record.cells.len() {
        return Err(ArchiveError::CellCount { declared: record.cell_count, actual: record.cells.len() });
    }
    Ok(Archive { name: record.name, score: record.score, cells: record.cells })
}

/// Write an encoded archive to `path`, replacing any existing file.
pub fn write_to_path<P: AsRef<Path>>(path: P, archive: &Archive) -> Result<(), ArchiveError> {
    let bytes = encode(archive)?;
    let mut f = fs::File::create(path)?;
    f.write_all(&bytes)?;
    f.flush()?;
    Ok(())
}

/// Read an archive from `path`; a missing file is `Ok(None)`.
pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Archive>, ArchiveError> {
    let mut f = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    f.read_to_end(&mut bytes)?;
    decode(&bytes).map(Some)
}
