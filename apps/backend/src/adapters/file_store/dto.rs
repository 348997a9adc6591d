//! On-disk layout of the shared room blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::state::Room;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Bump when the blob layout changes incompatibly.
pub const SCHEMA_VERSION: u32 = 1;

/// `{"schemaVersion":1,"revision":n,"rooms":{"ABCD":{...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsBlob {
    pub schema_version: u32,
    /// Incremented on every write; pollers compare it to spot foreign writes.
    pub revision: u64,
    pub rooms: BTreeMap<String, Room>,
}

impl RoomsBlob {
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            revision: 0,
            rooms: BTreeMap::new(),
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::empty());
        }
        let blob: RoomsBlob = serde_json::from_slice(bytes)?;
        if blob.schema_version != SCHEMA_VERSION {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "unsupported room blob schema {} (expected {SCHEMA_VERSION})",
                    blob.schema_version
                ),
            ));
        }
        Ok(blob)
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
