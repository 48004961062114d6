//! Network load error types.

use std::path::PathBuf;

/// Errors that prevent a network source from being read at all.
///
/// Individual bad records are not errors: they are logged, skipped and
/// counted in the `LoadReport`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network definition is not valid JSON for the expected shape
    #[error("invalid network definition in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// CSV matrix is structurally broken
    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV matrix has no header row
    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    /// Background load task did not complete
    #[error("load task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::MissingHeader {
            path: PathBuf::from("data/Fare.csv"),
        };
        assert_eq!(err.to_string(), "data/Fare.csv has no header row");

        let err = LoadError::Io {
            path: PathBuf::from("network.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read network.json: not found");

        let err = LoadError::Task("cancelled".into());
        assert_eq!(err.to_string(), "load task failed: cancelled");
    }
}
