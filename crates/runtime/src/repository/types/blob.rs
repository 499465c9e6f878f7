//! Versioned, checksummed encoding of [`GameState`].
//!
//! The engine never sees this type. The runtime encodes the live state on every
//! save and decodes it on every load; a blob that fails any check decodes to a
//! fresh [`GameState`] instead of an error.

use ballpark_core::GameState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::repository::Result;
use crate::types::SchemaVersion;

/// Layout version written by [`StateBlob::encode`].
pub const STATE_BLOB_VERSION: SchemaVersion = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlob {
    pub version: SchemaVersion,
    /// Hex SHA-256 of `bytes`.
    pub checksum: String,
    /// Bincode-encoded [`GameState`].
    pub bytes: Vec<u8>,
}

/// Reason a blob was rejected on decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobError {
    #[error("state blob version {found} is not supported (expected {expected})")]
    Version {
        found: SchemaVersion,
        expected: SchemaVersion,
    },

    #[error("state blob checksum mismatch")]
    Checksum,

    #[error("state blob is malformed: {0}")]
    Malformed(String),

    #[error("decoded state has fields outside engine ranges")]
    OutOfRange,
}

impl StateBlob {
    pub fn encode(state: &GameState) -> Result<Self> {
        let bytes = bincode::serialize(state)?;
        Ok(Self {
            version: STATE_BLOB_VERSION,
            checksum: checksum(&bytes),
            bytes,
        })
    }

    /// Decodes and validates the blob.
    pub fn decode(&self) -> std::result::Result<GameState, BlobError> {
        if self.version != STATE_BLOB_VERSION {
            return Err(BlobError::Version {
                found: self.version,
                expected: STATE_BLOB_VERSION,
            });
        }
        if checksum(&self.bytes) != self.checksum {
            return Err(BlobError::Checksum);
        }
        let state: GameState = bincode::deserialize(&self.bytes)
            .map_err(|e| BlobError::Malformed(e.to_string()))?;
        if !state.is_well_formed() {
            return Err(BlobError::OutOfRange);
        }
        Ok(state)
    }

    /// Decodes the blob, falling back to the opening state on any failure.
    pub fn decode_or_default(&self) -> GameState {
        match self.decode() {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!("Discarding persisted game state: {}", err);
                GameState::default()
            }
        }
    }
}

fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
