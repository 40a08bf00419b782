//! Namespace derivation from a fragment's location.
//!
//! `components/button/locale/en.json` under the source root becomes the
//! namespace `components.button`: the path relative to the root, minus the
//! `locale` directory and the file name, joined with dots.

use std::path::{Component, Path};

use crate::issue::Issue;

/// Separator between namespace segments.
pub const SEPARATOR: char = '.';

/// Derives the dotted namespace for the fragment at `path`.
///
/// Fragments directly inside `<root>/locale/` have no namespace and are
/// rejected, as are paths whose directory names cannot be used as namespace
/// segments (non UTF-8, or containing the separator).
pub fn derive_namespace(root: &Path, path: &Path) -> Result<String, Issue> {
    let relative = path.strip_prefix(root).map_err(|_| Issue::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("not inside source root {}", root.display()),
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                let segment = segment.to_str().ok_or_else(|| Issue::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "path is not valid UTF-8".to_string(),
                })?;
                segments.push(segment);
            }
            Component::CurDir => {}
            _ => {
                return Err(Issue::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "path must not contain `..` or a root".to_string(),
                });
            }
        }
    }

    // <namespace segments...>/locale/<code>.json
    if segments.len() < 2 {
        return Err(Issue::InvalidPath {
            path: path.to_path_buf(),
            reason: "fragment must live in a `locale` directory".to_string(),
        });
    }
    segments.truncate(segments.len() - 2);

    if segments.is_empty() {
        return Err(Issue::EmptyNamespace {
            path: path.to_path_buf(),
        });
    }

    if let Some(bad) = segments.iter().find(|s| s.contains(SEPARATOR)) {
        return Err(Issue::InvalidPath {
            path: path.to_path_buf(),
            reason: format!(
                "directory `{}` contains `{}` and cannot be a namespace segment",
                bad, SEPARATOR
            ),
        });
    }

    Ok(segments.join(&SEPARATOR.to_string()))
}

/// Splits a namespace into its segments.
pub fn segments(namespace: &str) -> Vec<&str> {
    namespace.split(SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_component_namespace() {
        let root = Path::new("src");
        let path = root.join("components/button/locale/en.json");
        assert_eq!(derive_namespace(root, &path).unwrap(), "components.button");
    }

    #[test]
    fn test_single_segment_namespace() {
        let root = Path::new("/repo/src");
        let path = PathBuf::from("/repo/src/dashboard/locale/es.json");
        assert_eq!(derive_namespace(root, &path).unwrap(), "dashboard");
    }

    #[test]
    fn test_deep_namespace() {
        let root = Path::new("src");
        let path = root.join("app/settings/billing/card/locale/fr.json");
        assert_eq!(
            derive_namespace(root, &path).unwrap(),
            "app.settings.billing.card"
        );
    }

    #[test]
    fn test_root_locale_folder_is_empty_namespace() {
        let root = Path::new("src");
        let path = root.join("locale/en.json");
        assert_eq!(
            derive_namespace(root, &path),
            Err(Issue::EmptyNamespace { path })
        );
    }

    #[test]
    fn test_path_outside_root() {
        let result = derive_namespace(Path::new("src"), Path::new("lib/x/locale/en.json"));
        assert!(matches!(result, Err(Issue::InvalidPath { .. })));
    }

    #[test]
    fn test_dotted_directory_rejected() {
        let root = Path::new("src");
        let path = root.join("components/v1.2/locale/en.json");
        let err = derive_namespace(root, &path).unwrap_err();
        assert!(err.to_string().contains("`v1.2`"));
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("components.button"), vec!["components", "button"]);
        assert_eq!(segments("dashboard"), vec!["dashboard"]);
    }
}
