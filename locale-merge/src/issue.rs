//! Problems found in the fragments themselves.
//!
//! Issues are never returned one at a time: validation and merging collect
//! every issue they find, and a run only fails once all fragments have been
//! looked at. Each issue renders as a single line naming the file(s)
//! involved, and serializes to JSON tagged with its `kind`.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    #[error("{}: invalid JSON: {message}", .path.display())]
    InvalidJson { path: PathBuf, message: String },

    #[error("{}: fragment must contain a JSON object, found {found}", .path.display())]
    NotAnObject { path: PathBuf, found: String },

    #[error(
        "{}: invalid locale filename `{file_name}` (supported: {supported})",
        .path.display()
    )]
    InvalidLocaleFilename {
        path: PathBuf,
        file_name: String,
        supported: String,
    },

    #[error(
        "{}: namespace must be non-empty, fragments cannot sit in the source root's locale directory",
        .path.display()
    )]
    EmptyNamespace { path: PathBuf },

    #[error("{}: {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error(
        "missing locale(s) for component {}: [{}]",
        .component.display(),
        .missing.join(", ")
    )]
    MissingLocales {
        component: PathBuf,
        namespace: String,
        missing: Vec<String>,
    },

    #[error(
        "key conflict in locale `{locale}` at `{namespace}`: {} and {} both define it",
        .first.display(),
        .second.display()
    )]
    KeyConflict {
        locale: String,
        namespace: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(
        "cannot create namespace `{namespace}` in locale `{locale}` for {}: prefix `{prefix}` already holds a value from {}",
        .path.display(),
        .owner.display()
    )]
    PrefixCollision {
        locale: String,
        namespace: String,
        prefix: String,
        path: PathBuf,
        owner: PathBuf,
    },
}

impl Issue {
    /// Stable identifier of the issue type, matching the JSON `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Issue::InvalidJson { .. } => "invalid_json",
            Issue::NotAnObject { .. } => "not_an_object",
            Issue::InvalidLocaleFilename { .. } => "invalid_locale_filename",
            Issue::EmptyNamespace { .. } => "empty_namespace",
            Issue::InvalidPath { .. } => "invalid_path",
            Issue::MissingLocales { .. } => "missing_locales",
            Issue::KeyConflict { .. } => "key_conflict",
            Issue::PrefixCollision { .. } => "prefix_collision",
        }
    }
}
