#![forbid(unsafe_code)]
//! Build-time merging of per-component locale fragments.
//!
//! Components keep their translations next to their code, one JSON file per
//! locale:
//!
//! ```text
//! src/components/button/locale/en.json   {"label": "Click"}
//! src/components/button/locale/es.json   {"label": "Clic"}
//! ```
//!
//! A merge run finds every `locale/<code>.json` under the source root, derives
//! a namespace from its directory (`components.button`), checks that every
//! component covers every supported locale, and nests each fragment under its
//! namespace in one tree per locale:
//!
//! ```text
//! messages/en.json   {"components": {"button": {"label": "Click"}}}
//! messages/es.json   {"components": {"button": {"label": "Clic"}}}
//! ```
//!
//! Problems are collected rather than returned one by one; if there is any,
//! nothing is written.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locale_merge::{MergeConfig, RunMode, run};
//!
//! let config = MergeConfig::new()
//!     .with_source_root("src")
//!     .with_output_dir("messages")
//!     .with_locales(["en", "es"]);
//!
//! let report = run(&config, RunMode::Write)?;
//! for issue in &report.issues {
//!     eprintln!("{issue}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod fragment;
pub mod issue;
pub mod locale;
pub mod merge;
pub mod namespace;
pub mod pipeline;
pub mod tree;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    config::MergeConfig,
    discover::Discoverer,
    error::Error,
    fragment::{TranslationFragment, Validation, validate_fragments},
    issue::Issue,
    locale::LocaleSet,
    merge::{Merged, merge_fragments},
    namespace::derive_namespace,
    pipeline::{Build, RunMode, RunReport, build, run},
    tree::{MergedLocaleTree, Node},
    writer::{WriteFailure, WriteReport, write_locale_trees},
};
