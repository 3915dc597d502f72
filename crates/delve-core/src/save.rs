//! Save-file encoding.
//!
//! Layout: 4 magic bytes, a version byte, a little-endian u32
//! checksum of the payload, then the payload itself: the whole
//! [`GameState`] as gzipped JSON. RNG state rides along, so a restored
//! game replays the same random stream it would have seen.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::error::GameError;
use crate::gameloop::GameState;

pub const SAVE_MAGIC: &[u8; 4] = b"DLVC";
pub const SAVE_VERSION: u8 = 1;

const HEADER_LEN: usize = SAVE_MAGIC.len() + 1 + 4;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("not a save file (bad magic bytes)")]
    InvalidMagic,
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u8, found: u8 },
    #[error("save file corrupted (checksum mismatch)")]
    ChecksumMismatch,
    #[error("save file truncated")]
    Truncated,
}

/// Position-weighted byte sum. Catches truncation and byte swaps that
/// a plain sum would miss.
fn checksum(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        sum = sum.wrapping_add((byte as u32).wrapping_mul((i as u32).wrapping_add(1)));
    }
    sum
}

/// Serialize a game state to the opaque save blob.
pub fn encode(state: &GameState) -> Result<Vec<u8>, SaveError> {
    let json = serde_json::to_vec(state)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let payload = encoder.finish()?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(SAVE_MAGIC);
    out.push(SAVE_VERSION);
    out.extend_from_slice(&checksum(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Restore a game state from a save blob.
pub fn decode(bytes: &[u8]) -> Result<GameState, SaveError> {
    if bytes.len() < HEADER_LEN {
        return Err(SaveError::Truncated);
    }
    let (magic, rest) = bytes.split_at(SAVE_MAGIC.len());
    if magic != SAVE_MAGIC {
        return Err(SaveError::InvalidMagic);
    }
    let version = rest[0];
    if version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: version,
        });
    }
    let mut sum_bytes = [0u8; 4];
    sum_bytes.copy_from_slice(&rest[1..5]);
    let payload = &rest[5..];
    if checksum(payload) != u32::from_le_bytes(sum_bytes) {
        return Err(SaveError::ChecksumMismatch);
    }

    let mut json = Vec::new();
    GzDecoder::new(payload).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Write a game state to disk. File-level failures surface at the
/// fatal tier as [`GameError::Save`].
pub fn save_to_file(path: &Path, state: &GameState) -> Result<(), GameError> {
    let blob = encode(state)?;
    let mut file = File::create(path).map_err(SaveError::Io)?;
    file.write_all(&blob).map_err(SaveError::Io)?;
    Ok(())
}

/// Read a game state back from disk.
pub fn load_from_file(path: &Path) -> Result<GameState, GameError> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(SaveError::Io)?;
    Ok(decode(&bytes)?)
}
