use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::syntax::SyntaxError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a generator run. None of these are retried.
#[derive(Debug, Error)]
pub enum Error {
    /// `go.mod` missing or unusable, or a path that does not belong to the module.
    #[error("invalid module configuration at '{path}': {message}")]
    Configuration { path: PathBuf, message: String },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk '{root}'")]
    Enumeration {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn parse(path: &Path, error: SyntaxError) -> Self {
        Error::Parse {
            path: path.to_path_buf(),
            line: error.line,
            column: error.column,
            message: error.message,
        }
    }
}
