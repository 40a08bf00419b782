use std::path::{Path, PathBuf};

use clap::Parser;
use locale_merge::{RunMode, run};
use locale_merge_cli::{
    ConfigOverrides, ReportFormat, exit_code, logging::init_logging, print_error,
    print_report, report::EXIT_FATAL, resolve_config,
};
use tracing::debug;

/// Merge every `<component>/locale/<code>.json` fragment under the source root
/// into one `<code>.json` per supported locale.
///
/// Without arguments, reads `locale-merge.toml` from the current directory if
/// it exists and falls back to `src` -> `messages` with en, es, fr, de, nl, pt.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Config file (default: ./locale-merge.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory searched for locale fragments
    #[arg(short, long, value_name = "DIR")]
    source_root: Option<PathBuf>,

    /// Directory receiving the merged <locale>.json files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Comma-separated supported locales, e.g. `en,es,fr`
    #[arg(short, long, value_name = "CODES")]
    locales: Option<String>,

    /// Glob (relative to the source root) of paths to skip; repeatable
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Do not honor .gitignore files while discovering fragments
    #[arg(long)]
    no_gitignore: bool,

    /// Validate and merge without writing any file
    #[arg(long)]
    check: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let overrides = ConfigOverrides {
        config: args.config,
        source_root: args.source_root,
        output_dir: args.output_dir,
        locales: args.locales,
        exclude: args.exclude,
        no_gitignore: args.no_gitignore,
    };

    let config = match resolve_config(&overrides, Path::new("")) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e, args.format);
            std::process::exit(EXIT_FATAL);
        }
    };

    debug!(?config, "resolved configuration");

    let mode = if args.check {
        RunMode::Check
    } else {
        RunMode::Write
    };

    match run(&config, mode) {
        Ok(report) => {
            print_report(&report, &config, args.format);
            std::process::exit(exit_code(&report));
        }
        Err(e) => {
            print_error(&e, args.format);
            std::process::exit(EXIT_FATAL);
        }
    }
}
