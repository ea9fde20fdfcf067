//! Core types shared across the library
//!
//! The error enum covers both halves of the crate: loading and plotting the
//! results table, and the graph harness that produces it.

use std::path::PathBuf;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while loading, analysing or rendering
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Input file not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Failed to render chart: {0}")]
    RenderError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StatsError {
    /// Map an open failure to `MissingFile` when the path does not exist
    pub(crate) fn from_open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StatsError::MissingFile(path.to_path_buf())
        } else {
            StatsError::IoError(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_not_found_maps_to_missing_file() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let mapped = StatsError::from_open(Path::new("results.csv"), err);
        assert!(matches!(mapped, StatsError::MissingFile(p) if p == Path::new("results.csv")));
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let mapped = StatsError::from_open(Path::new("results.csv"), err);
        assert!(matches!(mapped, StatsError::IoError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = StatsError::MalformedInput("missing required column 'SCC Edges'".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed input: missing required column 'SCC Edges'"
        );
    }
}
