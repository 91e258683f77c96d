//! Continuous memory: an opaque, serializable copy of the engine state.
//!
//! A [`Snapshot`] holds the stack, LastX, storage registers, modes and the
//! RAN# state. Transient state (entry buffer, shift, pending prefix, error
//! display) is not part of it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::{MAX_FORMAT_DIGITS, ModeState};
use crate::number::Number;
use crate::registers::DATA_REGISTERS;
use crate::stack::LEVELS;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur when saving or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse state: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported state version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("state has {found} registers (expected {expected})")]
    Registers { found: usize, expected: usize },

    #[error("state contains a value outside the display range")]
    Value,

    #[error("state has an invalid display format")]
    Format,
}

/// Persistent engine state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// X, Y, Z, T.
    pub stack: [Number; LEVELS],
    pub last_x: Number,
    /// R0–R9, R.0–R.9, then I.
    pub registers: Vec<Number>,
    pub modes: ModeState,
    pub random: u64,
}

impl Snapshot {
    /// Check that the snapshot can be restored.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        let expected = DATA_REGISTERS + 1;
        if self.registers.len() != expected {
            return Err(SnapshotError::Registers {
                found: self.registers.len(),
                expected,
            });
        }
        let values = self
            .stack
            .iter()
            .chain(std::iter::once(&self.last_x))
            .chain(self.registers.iter());
        for value in values {
            if !Number::is_representable(value.value()) {
                return Err(SnapshotError::Value);
            }
        }
        if self.modes.format.digits() > MAX_FORMAT_DIGITS {
            return Err(SnapshotError::Format);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Write the snapshot to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let io_error = |source| SnapshotError::Io {
            path: path.to_owned(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_error)
    }

    /// Read a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Default state file: `<data dir>/rpn15c/state.json`.
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("rpn15c").join("state.json"))
}
