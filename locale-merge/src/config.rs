//! Configuration for a merge run.
//!
//! A config can be built in code with the `with_*` methods or loaded from a
//! TOML file:
//!
//! ```toml
//! source_root = "src"
//! output_dir = "messages"
//! locales = ["en", "es", "fr", "de", "nl", "pt"]
//! exclude = ["legacy/**"]
//! respect_gitignore = true
//! ```

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::{
    error::Error,
    locale::{DEFAULT_LOCALES, LocaleSet},
};

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "locale-merge.toml";

/// Where fragments are read from, where merged files go, and which locales
/// are supported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Directory searched recursively for `locale/<code>.json` fragments.
    pub source_root: PathBuf,
    /// Directory receiving one `<code>.json` per supported locale.
    pub output_dir: PathBuf,
    /// Supported locale codes, in reporting order.
    pub locales: Vec<String>,
    /// Glob patterns, relative to `source_root`, for paths to skip.
    pub exclude: Vec<String>,
    /// Whether `.gitignore` rules apply while discovering fragments.
    pub respect_gitignore: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            output_dir: PathBuf::from("messages"),
            locales: DEFAULT_LOCALES.iter().map(|c| c.to_string()).collect(),
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

impl MergeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from TOML text. Relative paths are kept as written.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file. Relative `source_root` and `output_dir` values
    /// are resolved against the directory holding the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.source_root = anchor(base, &config.source_root);
            config.output_dir = anchor(base, &config.output_dir);
        }

        Ok(config)
    }

    pub fn with_source_root(mut self, source_root: impl Into<PathBuf>) -> Self {
        self.source_root = source_root.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Appends exclude patterns to the ones already configured.
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_gitignore(mut self, respect_gitignore: bool) -> Self {
        self.respect_gitignore = respect_gitignore;
        self
    }

    /// The validated supported-locale set.
    pub fn locale_set(&self) -> Result<LocaleSet, Error> {
        LocaleSet::new(&self.locales)
    }

    /// Compiles the exclude patterns. Separators are literal, so `*` never
    /// crosses a directory boundary while `**` does.
    pub fn exclude_set(&self) -> Result<GlobSet, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Checks everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<(), Error> {
        if self.source_root.as_os_str().is_empty() {
            return Err(Error::config_error("source_root must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config_error("output_dir must not be empty"));
        }
        self.locale_set()?;
        self.exclude_set()?;
        Ok(())
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Matches a root-relative path, or any of its ancestors, against the
/// exclude set. Excluding `legacy` therefore skips everything under it.
pub fn is_excluded(excludes: &GlobSet, relative: &Path) -> bool {
    if excludes.is_empty() {
        return false;
    }
    relative
        .ancestors()
        .any(|p| !p.as_os_str().is_empty() && excludes.is_match(p))
}
