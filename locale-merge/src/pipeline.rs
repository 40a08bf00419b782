//! End-to-end merge runs: discover, validate, merge, write.

use std::path::PathBuf;

use tracing::info;

use crate::{
    config::MergeConfig,
    discover::Discoverer,
    error::Error,
    fragment::validate_fragments,
    issue::Issue,
    merge::merge_fragments,
    tree::MergedLocaleTree,
    writer::{WriteFailure, write_locale_trees},
};

/// Whether a run may write output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Write,
    /// Validate and merge only.
    Check,
}

/// Everything known after discovering, validating and merging.
#[derive(Debug)]
pub struct Build {
    /// Number of fragment files found.
    pub discovered: usize,
    /// Number of fragments that passed validation.
    pub accepted: usize,
    pub trees: Vec<MergedLocaleTree>,
    /// Validation issues first, then merge issues.
    pub issues: Vec<Issue>,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct RunReport {
    pub mode: RunMode,
    pub discovered: usize,
    pub accepted: usize,
    pub locales: Vec<String>,
    pub issues: Vec<Issue>,
    pub written: Vec<PathBuf>,
    pub write_failures: Vec<WriteFailure>,
}

impl RunReport {
    /// No issues and no failed writes.
    pub fn is_success(&self) -> bool {
        self.issues.is_empty() && self.write_failures.is_empty()
    }
}

/// Discovers, validates and merges without writing anything.
///
/// Accepted fragments are merged even when validation found issues, so a
/// single run reports conflicts alongside broken files.
pub fn build(config: &MergeConfig) -> Result<Build, Error> {
    config.validate()?;
    let locales = config.locale_set()?;

    let paths = Discoverer::new(&config.source_root)
        .with_excludes(config.exclude_set()?)
        .with_gitignore(config.respect_gitignore)
        .discover()?;
    info!(
        count = paths.len(),
        "discovered fragments under {}",
        config.source_root.display()
    );

    let validation = validate_fragments(&config.source_root, &paths, &locales)?;
    let accepted = validation.fragments.len();
    let mut issues = validation.issues;

    let merged = merge_fragments(validation.fragments, &locales);
    issues.extend(merged.issues);

    Ok(Build {
        discovered: paths.len(),
        accepted,
        trees: merged.trees,
        issues,
    })
}

/// Runs the whole pipeline.
///
/// Output files are written only in [`RunMode::Write`] and only when no
/// issue was found; otherwise nothing under `output_dir` is touched.
pub fn run(config: &MergeConfig, mode: RunMode) -> Result<RunReport, Error> {
    let build = build(config)?;

    let mut report = RunReport {
        mode,
        discovered: build.discovered,
        accepted: build.accepted,
        locales: build.trees.iter().map(|t| t.locale().to_string()).collect(),
        issues: build.issues,
        written: Vec::new(),
        write_failures: Vec::new(),
    };

    if !report.issues.is_empty() {
        info!(issues = report.issues.len(), "not writing output");
        return Ok(report);
    }

    if mode == RunMode::Write {
        let written = write_locale_trees(&config.output_dir, &build.trees)?;
        report.written = written.written;
        report.write_failures = written.failures;
    }

    Ok(report)
}
