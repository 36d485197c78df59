//! Error types for series lookup and CSV file access.

use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by the plotting core.
///
/// Most recoverable conditions (bad capacity, degenerate views, malformed CSV
/// lines) are repaired in place and only logged. The variants here are the
/// ones a caller may want to act on.
#[derive(Debug)]
pub enum PlotError {
    /// No series is registered under this name.
    NotFound {
        /// The requested series name.
        name: String,
    },

    /// Reading or writing a CSV file failed.
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::NotFound { name } => {
                write!(f, "Series not found: {}", name)
            }
            PlotError::Io { path, source } => {
                write!(f, "IO error on '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io { source, .. } => Some(source),
            PlotError::NotFound { .. } => None,
        }
    }
}

/// Result type alias for plot operations.
pub type PlotResult<T> = Result<T, PlotError>;
