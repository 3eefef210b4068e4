//! ## Features
//!
//! - Leveled logging (info, warn, error, debug, success, verbose) to stderr
//! - Multi-line message support with a consistent prefix on every line
//! - Banner and headline helpers for report sections
//! - Score meters for rendering 0-100 values in a terminal
//!
//! ## Usage
//!
//! Functions: `info()`, `warn()`, `error()`, `debug()`, `success()`, `verbose()`
//!
//! Macros take `format!` arguments: `marquee::info!("scored {} entries", n)`

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable `verbose` and `debug` output
pub fn set_verbose(enabled: bool) {
  VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
  VERBOSE.load(Ordering::Relaxed)
}

/// Core logging function that handles the actual output
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Format a colored prefix for log messages
fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]{:<width$}", prefix.color(color).bold(), "", width = 7 - prefix.len() - 2)
}

fn log_with_prefix(color: Color, prefix: &str, message: &str) {
  let prefix = format_prefix(color, prefix);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Render a message between two banner lines, one string per output line
pub fn banner(message: &str, width: usize, border_char: char) -> Vec<String> {
  let border = banner_line(width, border_char);
  let mut lines = vec![border.clone()];
  lines.extend(message.lines().map(str::to_string));
  lines.push(border);
  lines
}

pub fn verbose(message: &str) {
  if is_verbose() {
    log_with_prefix(Color::Cyan, "verb", message);
  }
}

/// Info level logging - general information
pub fn info(message: &str) {
  log_with_prefix(Color::Blue, "info", message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  log_with_prefix(Color::Yellow, "warn", message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  log_with_prefix(Color::Red, "error", message);
}

/// Debug level logging, only shown in verbose mode
pub fn debug(message: &str) {
  if is_verbose() {
    log_with_prefix(Color::Magenta, "debug", message);
  }
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  log_with_prefix(Color::Green, "sccs", message);
}

/// Section headline for rendered reports (returned, not printed)
pub fn headline(title: &str) -> String {
  let rule = banner_line(title.chars().count().max(8), '─');
  format!("{}\n{}", title.bold(), rule.dimmed())
}

/// Color used for a 0-100 score
pub fn score_color(score: u8) -> Color {
  match score {
    75..=u8::MAX => Color::Green,
    50..=74 => Color::Yellow,
    _ => Color::Red,
  }
}

/// Plain-text meter such as `███████░░░` for a 0-100 score
pub fn meter_plain(score: u8, width: usize) -> String {
  let clamped = score.min(100) as usize;
  let filled = (clamped * width + 50) / 100;
  format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Colored meter followed by the numeric score
pub fn meter(score: u8, width: usize) -> String {
  let bar = meter_plain(score, width).color(score_color(score));
  format!("{bar} {score:>3}")
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::info(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => {
    $crate::warn(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::error(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! verbose {
  ($($arg:tt)*) => {
    $crate::verbose(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => {
    $crate::debug(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => {
    $crate::success(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}
