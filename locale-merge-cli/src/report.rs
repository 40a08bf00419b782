use std::fmt::Write as _;

use locale_merge::{Error, MergeConfig, RunMode, RunReport};
use serde_json::{Value, json};

/// Merged (or checked) without problems.
pub const EXIT_OK: i32 = 0;
/// Validation or merge issues were found; nothing was written.
pub const EXIT_ISSUES: i32 = 1;
/// Configuration error, missing source root or unreadable fragment.
pub const EXIT_FATAL: i32 = 2;
/// At least one locale file could not be written.
pub const EXIT_WRITE_FAILED: i32 = 3;

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// One line per problem, for humans
    #[default]
    Text,
    /// A single JSON document on stdout, for tooling
    Json,
}

pub fn exit_code(report: &RunReport) -> i32 {
    if !report.issues.is_empty() {
        EXIT_ISSUES
    } else if !report.write_failures.is_empty() {
        EXIT_WRITE_FAILED
    } else {
        EXIT_OK
    }
}

pub fn print_report(report: &RunReport, config: &MergeConfig, format: ReportFormat) {
    match format {
        ReportFormat::Json => match serde_json::to_string_pretty(&json_report(report, config)) {
            Ok(body) => println!("{}", body),
            Err(e) => eprintln!("Error serializing report: {}", e),
        },
        ReportFormat::Text => {
            let text = text_report(report, config);
            if report.is_success() {
                print!("{}", text);
            } else {
                eprint!("{}", text);
            }
        }
    }
}

/// Prints a fatal error. In JSON mode stdout still receives a document.
pub fn print_error(error: &Error, format: ReportFormat) {
    match format {
        ReportFormat::Json => println!("{}", json_error(error)),
        ReportFormat::Text => eprintln!("Error: {}", error),
    }
}

pub fn json_error(error: &Error) -> Value {
    json!({
        "success": false,
        "error": error.to_string(),
    })
}

pub fn text_report(report: &RunReport, config: &MergeConfig) -> String {
    let mut out = String::new();

    if !report.issues.is_empty() {
        let _ = writeln!(
            out,
            "Found {} problem(s) in {} fragment file(s) under {}:",
            report.issues.len(),
            report.discovered,
            config.source_root.display()
        );
        for issue in &report.issues {
            let _ = writeln!(out, "  ❌ {}", issue);
        }
        let _ = writeln!(out, "No files were written.");
        return out;
    }

    if !report.write_failures.is_empty() {
        for failure in &report.write_failures {
            let _ = writeln!(
                out,
                "❌ Failed to write {} ({}): {}",
                failure.path.display(),
                failure.locale,
                failure.error
            );
        }
        let _ = writeln!(
            out,
            "Wrote {} of {} locale file(s).",
            report.written.len(),
            report.written.len() + report.write_failures.len()
        );
        return out;
    }

    match report.mode {
        RunMode::Check => {
            let _ = writeln!(
                out,
                "✅ Checked {} fragment(s) for {} locale(s) ({}): no problems found",
                report.accepted,
                report.locales.len(),
                report.locales.join(", ")
            );
        }
        RunMode::Write => {
            let _ = writeln!(
                out,
                "✅ Merged {} fragment(s) into {} locale file(s) in {}",
                report.accepted,
                report.written.len(),
                config.output_dir.display()
            );
        }
    }
    out
}

pub fn json_report(report: &RunReport, config: &MergeConfig) -> Value {
    let write_failures: Vec<Value> = report
        .write_failures
        .iter()
        .map(|f| {
            json!({
                "locale": f.locale,
                "path": f.path.display().to_string(),
                "error": f.error.to_string(),
            })
        })
        .collect();
    let written: Vec<String> = report
        .written
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let mode = match report.mode {
        RunMode::Write => "write",
        RunMode::Check => "check",
    };

    json!({
        "success": report.is_success(),
        "mode": mode,
        "source_root": config.source_root.display().to_string(),
        "output_dir": config.output_dir.display().to_string(),
        "locales": report.locales,
        "discovered": report.discovered,
        "accepted": report.accepted,
        "issues": report.issues,
        "written": written,
        "write_failures": write_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use locale_merge::Issue;
    use std::path::PathBuf;

    fn report(mode: RunMode, issues: Vec<Issue>) -> RunReport {
        RunReport {
            mode,
            discovered: 2,
            accepted: 2,
            locales: vec!["en".to_string(), "es".to_string()],
            issues,
            written: Vec::new(),
            write_failures: Vec::new(),
        }
    }

    fn missing_fr() -> Issue {
        Issue::MissingLocales {
            component: PathBuf::from("src/card"),
            namespace: "card".to_string(),
            missing: vec!["fr".to_string()],
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&report(RunMode::Write, Vec::new())), EXIT_OK);
        assert_eq!(
            exit_code(&report(RunMode::Write, vec![missing_fr()])),
            EXIT_ISSUES
        );

        let mut failed = report(RunMode::Write, Vec::new());
        failed.write_failures.push(locale_merge::WriteFailure {
            locale: "en".to_string(),
            path: PathBuf::from("messages/en.json"),
            error: locale_merge::Error::config_error("boom"),
        });
        assert_eq!(exit_code(&failed), EXIT_WRITE_FAILED);
    }

    #[test]
    fn test_text_report_lists_every_issue() {
        let config = MergeConfig::default();
        let text = text_report(
            &report(RunMode::Write, vec![missing_fr(), missing_fr()]),
            &config,
        );
        assert!(text.starts_with("Found 2 problem(s)"));
        assert_eq!(
            text.matches("missing locale(s) for component src/card: [fr]").count(),
            2
        );
        assert!(text.ends_with("No files were written.\n"));
    }

    #[test]
    fn test_text_report_check_success() {
        let text = text_report(
            &report(RunMode::Check, Vec::new()),
            &MergeConfig::default(),
        );
        assert!(text.contains("Checked 2 fragment(s) for 2 locale(s) (en, es)"));
    }

    #[test]
    fn test_json_report_shape() {
        let value = json_report(
            &report(RunMode::Check, vec![missing_fr()]),
            &MergeConfig::default(),
        );
        assert_eq!(value["success"], false);
        assert_eq!(value["mode"], "check");
        assert_eq!(value["issues"][0]["kind"], "missing_locales");
        assert_eq!(value["issues"][0]["missing"], json!(["fr"]));
        assert_eq!(value["locales"], json!(["en", "es"]));
    }

    #[test]
    fn test_json_error_shape() {
        let value = json_error(&Error::SourceRootMissing(PathBuf::from("src")));
        assert_eq!(value["success"], false);
        assert_eq!(
            value["error"],
            "source root does not exist or is not a directory: src"
        );
    }
}
