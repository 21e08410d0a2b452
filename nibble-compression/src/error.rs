use std::{io, path::PathBuf};

use derive_more::{Display, Error};

/// Failures that stop a run before any data is processed. Both are reported
/// together with the usage line.
#[derive(Debug, Display, Error)]
pub enum CompressionError {
    #[display(fmt = "{}", _0)]
    MalformedArguments(#[error(not(source))] String),

    #[display(fmt = "failed to open {}: {}", "path.display()", source)]
    OpenFailure { path: PathBuf, source: io::Error },
}

impl CompressionError {
    pub fn open_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CompressionError::OpenFailure {
            path: path.into(),
            source,
        }
    }
}
