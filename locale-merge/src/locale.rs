//! The closed set of locale codes a merge run supports.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Locales supported when nothing else is configured.
pub const DEFAULT_LOCALES: &[&str] = &["en", "es", "fr", "de", "nl", "pt"];

/// Ordered, duplicate-free list of supported locale codes.
///
/// Codes are kept exactly as configured: a fragment named `pt-BR.json` only
/// matches the code `pt-BR`. Order matters for reporting, missing locales are
/// always listed in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    codes: Vec<String>,
}

impl LocaleSet {
    /// Builds a locale set, validating every code as a BCP 47 identifier.
    pub fn new<I, S>(codes: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            validate_locale_code(code)?;
            if !out.iter().any(|c| c == code) {
                out.push(code.to_string());
            }
        }

        if out.is_empty() {
            return Err(Error::config_error(
                "at least one supported locale is required",
            ));
        }

        Ok(LocaleSet { codes: out })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Supported locales absent from `present`, in set order.
    pub fn missing_from(&self, present: &BTreeSet<String>) -> Vec<String> {
        self.codes
            .iter()
            .filter(|code| !present.contains(*code))
            .cloned()
            .collect()
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        LocaleSet {
            codes: DEFAULT_LOCALES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl FromStr for LocaleSet {
    type Err = Error;

    /// Parses a comma-separated list such as `en,es,pt-BR`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocaleSet::new(s.split(',').filter(|part| !part.trim().is_empty()))
    }
}

impl Display for LocaleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.codes.join(", "))
    }
}

/// Checks that a code can be used both as a language tag and as a file stem.
pub fn validate_locale_code(code: &str) -> Result<(), Error> {
    if code.is_empty() || code.contains(['/', '\\', '.']) {
        return Err(Error::InvalidLocale(code.to_string()));
    }

    code.parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| Error::InvalidLocale(code.to_string()))
}
