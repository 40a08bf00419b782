//! Fragment parsing and validation.
//!
//! Every discovered file is checked on its own (locale filename, namespace,
//! JSON content) and then per component, where a component is the directory
//! holding a `locale/` folder. All issues are collected; reading stops only on
//! an I/O error.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{error::Error, issue::Issue, locale::LocaleSet, namespace::derive_namespace};

/// One JSON file holding the translations of one component in one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationFragment {
    pub path: PathBuf,
    pub locale: String,
    pub namespace: String,
    pub content: Map<String, Value>,
}

/// Accepted fragments plus everything wrong with the rest.
#[derive(Debug, Default)]
pub struct Validation {
    pub fragments: Vec<TranslationFragment>,
    pub issues: Vec<Issue>,
}

impl Validation {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Locales seen for one component directory.
#[derive(Debug, Default)]
struct ComponentGroup {
    namespace: String,
    locales: BTreeSet<String>,
}

/// Parses and validates every path, then checks locale coverage per
/// component.
///
/// A file that is malformed but otherwise well placed still counts towards
/// its component's locale coverage, so it is reported once (as malformed)
/// rather than twice.
pub fn validate_fragments(
    root: &Path,
    paths: &[PathBuf],
    locales: &LocaleSet,
) -> Result<Validation, Error> {
    let mut validation = Validation::default();
    let mut groups: BTreeMap<PathBuf, ComponentGroup> = BTreeMap::new();

    for path in paths {
        let locale = match locale_from_file_name(path, locales) {
            Ok(locale) => Some(locale),
            Err(issue) => {
                validation.issues.push(issue);
                None
            }
        };

        let namespace = match derive_namespace(root, path) {
            Ok(namespace) => Some(namespace),
            Err(issue) => {
                validation.issues.push(issue);
                None
            }
        };

        let content = match parse_fragment(path)? {
            Ok(content) => Some(content),
            Err(issue) => {
                validation.issues.push(issue);
                None
            }
        };

        let (Some(locale), Some(namespace)) = (locale, namespace) else {
            continue;
        };

        if let Some(component) = component_dir(path) {
            let group = groups
                .entry(component.to_path_buf())
                .or_insert_with(|| ComponentGroup {
                    namespace: namespace.clone(),
                    locales: BTreeSet::new(),
                });
            group.locales.insert(locale.clone());
        }

        if let Some(content) = content {
            debug!(path = %path.display(), %locale, %namespace, "accepted fragment");
            validation.fragments.push(TranslationFragment {
                path: path.clone(),
                locale,
                namespace,
                content,
            });
        }
    }

    for (component, group) in groups {
        let missing = locales.missing_from(&group.locales);
        if !missing.is_empty() {
            validation.issues.push(Issue::MissingLocales {
                component,
                namespace: group.namespace,
                missing,
            });
        }
    }

    info!(
        files = paths.len(),
        accepted = validation.fragments.len(),
        issues = validation.issues.len(),
        "validated fragments"
    );
    Ok(validation)
}

/// Reads and parses one fragment.
///
/// The outer `Result` carries fatal I/O errors, the inner one content
/// problems that are collected as issues.
pub fn parse_fragment(path: &Path) -> Result<Result<Map<String, Value>, Issue>, Error> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_fragment_bytes(path, &bytes))
}

fn parse_fragment_bytes(path: &Path, bytes: &[u8]) -> Result<Map<String, Value>, Issue> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Issue::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&other).to_string(),
        }),
        Err(e) => Err(Issue::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

fn locale_from_file_name(path: &Path, locales: &LocaleSet) -> Result<String, Issue> {
    let stem = path.file_stem().and_then(|s| s.to_str());
    match stem {
        Some(stem) if locales.contains(stem) => Ok(stem.to_string()),
        _ => Err(Issue::InvalidLocaleFilename {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            supported: locales.to_string(),
        }),
    }
}

/// `<component>/locale/<code>.json` -> `<component>`
fn component_dir(path: &Path) -> Option<&Path> {
    path.parent().and_then(Path::parent)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
