//! Custom error types for survey point processing

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised anywhere in the conversion pipeline
///
/// Every variant is fatal for the run: the pipeline never retries and never
/// produces partial output.
#[derive(Debug)]
pub enum TwdError {
    /// The point source does not exist or is not a regular file
    SourceNotFound(PathBuf),
    /// A row could not be read as `x, y, elevation, name`
    MalformedRecord {
        /// 1-based line number in the source
        line: u64,
        /// What was wrong with the row
        reason: String,
    },
    /// A normalized coordinate does not have the canonical digit width
    InvalidCoordinateWidth {
        /// 0-based row in the cleaned table
        row: usize,
        /// Offending field, `x` or `y`
        field: &'static str,
        /// Value after prefix and postfix were applied
        value: String,
        /// Required width in characters
        expected: usize,
    },
    /// Coordinate reference name not present in the registry
    UnknownReference(String),
    /// Coordinate could not be parsed or lies outside the projection domain
    ProjectionError(String),
    /// GPX document could not be produced
    SerializationError(String),
    /// GPX document could not be written to its destination
    WriteError {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },
    /// Configuration document is invalid
    ConfigError(String),
    /// I/O error
    IoError(io::Error),
}

impl fmt::Display for TwdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwdError::SourceNotFound(path) => write!(f, "Point source not found: {}", path.display()),
            TwdError::MalformedRecord { line, reason } => write!(f, "Malformed record at line {}: {}", line, reason),
            TwdError::InvalidCoordinateWidth { row, field, value, expected } => write!(
                f,
                "Invalid point at row {}: {} = '{}' has {} digits, expected {} (check prefix_{} / post_{})",
                row, field, value, value.chars().count(), expected, field, field
            ),
            TwdError::UnknownReference(name) => write!(f, "Unknown coordinate reference: {}", name),
            TwdError::ProjectionError(msg) => write!(f, "Projection error: {}", msg),
            TwdError::SerializationError(msg) => write!(f, "GPX serialization error: {}", msg),
            TwdError::WriteError { path, source } => write!(f, "Failed to write {}: {}", path.display(), source),
            TwdError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TwdError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TwdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TwdError::WriteError { source, .. } => Some(source),
            TwdError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TwdError {
    fn from(error: io::Error) -> Self {
        TwdError::IoError(error)
    }
}

/// Result type for pipeline operations
pub type TwdResult<T> = Result<T, TwdError>;
