//! Error types for ZPGen

use std::path::Path;
use thiserror::Error;

/// Result type alias for ZPGen operations
pub type Result<T> = std::result::Result<T, ZpGenError>;

/// Main error type for ZPGen
///
/// A malformed record or an unknown vocabulary aborts the whole run:
/// this is a single-pass batch compiler, and a corrupt record would
/// invalidate the identifier-assignment order for everything after it.
#[derive(Error, Debug)]
pub enum ZpGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error on '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed record ({reason}) in line: {line}")]
    MalformedRecord { reason: String, line: String },

    #[error("Unsupported ontology namespace for id '{0}'")]
    UnsupportedNamespace(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZpGenError {
    /// Create a malformed-record error carrying the offending raw line
    pub fn malformed_record(reason: impl Into<String>, line: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
            line: line.into(),
        }
    }

    /// Create a file error carrying the path that failed
    pub fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
