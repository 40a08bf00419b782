//! All error types for the locale-merge crate.
//!
//! These are the fatal errors: a missing source root, an unreadable file or
//! directory, a broken configuration. Problems found in the fragments themselves are not
//! errors, they are collected as [`crate::issue::Issue`]s.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("source root does not exist or is not a directory: {}", .0.display())]
    SourceRootMissing(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl Error {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
