//! Error types shared by every engine in the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Index {index} is out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Add at least one exercise before finishing")]
    EmptySession,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A workout is already in progress")]
    SessionActive,

    #[error("No workout in progress")]
    NoActiveSession,

    #[error("Default exercise {0} cannot be deleted")]
    ProtectedExercise(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize {key}: {source}")]
    Serialization {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl TrackerError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        TrackerError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Bounds check helper used by every positional operation.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(TrackerError::IndexOutOfRange { index, len })
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
