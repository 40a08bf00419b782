//! Locale fragment discovery.
//!
//! A fragment is any `.json` file whose parent directory is named `locale`,
//! anywhere below the source root.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use ignore::WalkBuilder;
use tracing::debug;

use crate::{config::is_excluded, error::Error};

/// Name of the directory that holds a component's fragments.
pub const LOCALE_DIR: &str = "locale";

/// Walks a source root looking for locale fragments.
#[derive(Debug, Clone)]
pub struct Discoverer {
    root: PathBuf,
    excludes: GlobSet,
    respect_gitignore: bool,
}

impl Discoverer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excludes: GlobSet::empty(),
            respect_gitignore: true,
        }
    }

    pub fn with_excludes(mut self, excludes: GlobSet) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn with_gitignore(mut self, respect_gitignore: bool) -> Self {
        self.respect_gitignore = respect_gitignore;
        self
    }

    /// Returns every fragment path under the root, sorted.
    ///
    /// Fails with [`Error::SourceRootMissing`] when the root is not an
    /// existing directory, and with [`Error::Walk`] on the first entry the
    /// walker cannot read. A partial listing is never returned.
    pub fn discover(&self) -> Result<Vec<PathBuf>, Error> {
        if !self.root.is_dir() {
            return Err(Error::SourceRootMissing(self.root.clone()));
        }

        let root = self.root.clone();
        let excludes = self.excludes.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                !is_excluded(&excludes, relative)
            })
            .build();

        let mut found = Vec::new();
        for dent in walker {
            let dent = dent?;
            if !dent.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if is_fragment_path(dent.path()) {
                debug!(path = %dent.path().display(), "found locale fragment");
                found.push(dent.into_path());
            }
        }

        found.sort();
        Ok(found)
    }
}

/// True for `<anything>/locale/<name>.json`.
pub fn is_fragment_path(path: &Path) -> bool {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "json");
    let in_locale_dir = path
        .parent()
        .and_then(|p| p.file_name())
        .is_some_and(|name| name == LOCALE_DIR);
    is_json && in_locale_dir
}
