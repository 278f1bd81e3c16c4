use std::path::PathBuf;

use thiserror::Error;

use crate::migration::VersionRange;
use crate::node::NodeType;
use crate::path::{NodePath, PathSegment};

pub type Result<T, E = ConfettiError> = std::result::Result<T, E>;

/// Boxed cause attached to a [`ConfettiError::Parse`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ConfettiError {
    /// The source text is not a well-formed document.
    #[error("Failed to parse config: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// The source could not be read.
    #[error("Failed to read {}: {source}", display_source(.path))]
    Io {
        path: Option<PathBuf>,
        source: std::io::Error,
    },

    #[error("Node at {path} is {actual} and cannot be used as {expected}")]
    InvalidNodeType {
        expected: NodeType,
        actual: NodeType,
        path: NodePath,
    },

    #[error("Cannot read the {requested} of path segment {segment}")]
    IllegalSegmentAccess {
        requested: &'static str,
        segment: PathSegment,
    },

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Index {index} out of bounds for array of size {size} at {path}")]
    IndexOutOfBounds {
        index: usize,
        size: usize,
        path: NodePath,
    },

    #[error("Value at {path} is {found} and cannot be read as {expected}")]
    TypeCoercion {
        expected: &'static str,
        found: &'static str,
        path: NodePath,
    },

    #[error("Invalid migration range: from ({from}) must be lower than to ({to})")]
    InvalidVersionRange { from: u32, to: u32 },

    #[error("Migration {range} failed: {reason}")]
    Migration { range: VersionRange, reason: String },
}

impl ConfettiError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConfettiError::Parse {
            message: message.into(),
            source: None,
        }
    }

    pub fn parse_with_cause(
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConfettiError::Parse {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// An I/O failure not tied to a file on disk (a caller-supplied stream).
    pub fn io(source: std::io::Error) -> Self {
        ConfettiError::Io { path: None, source }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ConfettiError::Parse { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ConfettiError::Io { .. })
    }
}

fn display_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "input stream".to_string(),
    }
}
