use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::model::DatasetKind;

/// Result alias used by every reader and the catalog.
pub type LoadResult<T> = Result<T, LoadError>;

/// Everything that can go wrong while loading a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not resolve to an existing, regular file.
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but its content violates the expected format.
    #[error("{}: {reason}{}", .path.display(), position_suffix(.line, .column))]
    Format {
        path: PathBuf,
        line: Option<u64>,
        column: Option<u64>,
        reason: String,
    },

    /// Any other I/O failure (permissions, device errors, ...).
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog has no network registered under this name.
    #[error("no dataset registered under '{name}'")]
    UnknownDataset { name: String },

    /// A reader produced a different dataset shape than the catalog expected.
    #[error("expected a {expected} dataset, got a {found}")]
    WrongKind {
        expected: DatasetKind,
        found: DatasetKind,
    },
}

fn position_suffix(line: &Option<u64>, column: &Option<u64>) -> String {
    match (*line, *column) {
        (Some(l), Some(c)) => format!(" at line {l} column {c}"),
        (Some(l), None) => format!(" at line {l}"),
        _ => String::new(),
    }
}

impl LoadError {
    /// Format error without position information.
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoadError::Format {
            path: path.into(),
            line: None,
            column: None,
            reason: reason.into(),
        }
    }

    /// Map an `io::Error` raised while touching `path`.
    ///
    /// `NotFound` is the only kind promoted to its own variant; everything
    /// else stays an `Io` error.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path },
            _ => LoadError::Io { path, source },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format { .. })
    }
}
