//! CLI library for testing purposes

pub mod logging;
pub mod report;
pub mod settings;

pub use report::{ReportFormat, exit_code, print_error, print_report};
pub use settings::{ConfigOverrides, resolve_config};
