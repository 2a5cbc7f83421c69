//! Persisted mind-map document.
//!
//! # Responsibility
//! - Define the JSON exchange schema.
//! - Convert graph state to/from the schema and build the live preview.
//!
//! # Invariants
//! - Connections are persisted as indices into the `nodes` array.
//! - Parsing completes before any graph mutation; a malformed document
//!   never clears existing state.
//! - Out-of-range connection indices are dropped, not reported.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod io;
pub mod schema;
pub mod serializer;

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Malformed or unreadable document.
#[derive(Debug)]
pub enum DocumentError {
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed mind map document: {err}"),
            Self::Io(err) => write!(f, "mind map document io failed: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
