//! User-facing terminal messages
//!
//! Errors and warnings go to stderr in color so that stdout carries only
//! the `Created ...` lines or the JSON report.

use owo_colors::OwoColorize;

/// Display a warning message in yellow
pub fn warn(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Display an error message in red
///
/// # Example
/// ```ignore
/// output::error("Error: Failed to read bundle all_certs.pem: No such file or directory");
/// ```
pub fn error(message: &str) {
    eprintln!("{}", message.red());
}
