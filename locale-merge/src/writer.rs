//! Writes merged trees to `<output_dir>/<locale>.json`.

use std::{
    fs::Permissions,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::{error::Error, tree::MergedLocaleTree};

/// A locale whose output file could not be written.
#[derive(Debug)]
pub struct WriteFailure {
    pub locale: String,
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of writing every locale.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output path for one locale.
pub fn output_path(output_dir: &Path, locale: &str) -> PathBuf {
    output_dir.join(format!("{}.json", locale))
}

/// Renders a tree as pretty-printed JSON with a trailing newline.
pub fn render_tree(tree: &MergedLocaleTree) -> Result<String, Error> {
    let mut text = serde_json::to_string_pretty(tree)?;
    text.push('\n');
    Ok(text)
}

/// Writes one file per tree, creating `output_dir` if needed.
///
/// Each file is written to a temporary sibling and then renamed over the
/// target, so a file is either fully replaced or left as it was. A replaced
/// file keeps its permissions; new files are created world-readable. A failing
/// locale does not stop the others; failures are returned in the report.
/// Only failing to create the output directory is an error.
pub fn write_locale_trees(
    output_dir: &Path,
    trees: &[MergedLocaleTree],
) -> Result<WriteReport, Error> {
    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut report = WriteReport::default();
    for tree in trees {
        let path = output_path(output_dir, tree.locale());
        match write_atomically(output_dir, &path, tree) {
            Ok(()) => {
                debug!(locale = tree.locale(), path = %path.display(), "wrote locale file");
                report.written.push(path);
            }
            Err(e) => {
                error!(locale = tree.locale(), "failed to write {}: {}", path.display(), e);
                report.failures.push(WriteFailure {
                    locale: tree.locale().to_string(),
                    path,
                    error: e,
                });
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "wrote locale files to {}",
        output_dir.display()
    );
    Ok(report)
}

fn write_atomically(dir: &Path, path: &Path, tree: &MergedLocaleTree) -> Result<(), Error> {
    let text = render_tree(tree)?;
    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| Error::io(file.path(), e))?;
    if let Some(permissions) = target_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io(file.path(), e))?;
    }
    file.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Mode for a replaced output file: the existing file's, or `0o644` for a new
/// one. Temporary files start out owner-only.
#[cfg(unix)]
fn target_permissions(path: &Path) -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        _ => Some(Permissions::from_mode(0o644)),
    }
}

#[cfg(not(unix))]
fn target_permissions(path: &Path) -> Option<Permissions> {
    std::fs::metadata(path)
        .ok()
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.permissions())
}
