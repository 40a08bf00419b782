use std::path::{Path, PathBuf};

use locale_merge::{Error, LocaleSet, MergeConfig, config::DEFAULT_CONFIG_FILE};

/// Values given on the command line, applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub locales: Option<String>,
    pub exclude: Vec<String>,
    pub no_gitignore: bool,
}

/// Builds the effective configuration.
///
/// An explicitly given config file must exist. Otherwise `locale-merge.toml`
/// in `working_dir` is used when present, and the built-in defaults when not.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    working_dir: &Path,
) -> Result<MergeConfig, Error> {
    let mut config = match &overrides.config {
        Some(path) => MergeConfig::from_file(path)?,
        None => {
            let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                MergeConfig::from_file(&default_path)?
            } else {
                MergeConfig::default()
                    .with_source_root(working_dir.join("src"))
                    .with_output_dir(working_dir.join("messages"))
            }
        }
    };

    if let Some(source_root) = &overrides.source_root {
        config = config.with_source_root(source_root);
    }
    if let Some(output_dir) = &overrides.output_dir {
        config = config.with_output_dir(output_dir);
    }
    if let Some(locales) = &overrides.locales {
        let set: LocaleSet = locales.parse()?;
        config = config.with_locales(set.iter().map(str::to_string));
    }
    if !overrides.exclude.is_empty() {
        config = config.with_excludes(overrides.exclude.iter().cloned());
    }
    if overrides.no_gitignore {
        config = config.with_gitignore(false);
    }

    config.validate()?;
    Ok(config)
}
