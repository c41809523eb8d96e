//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream, Style};
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode to all subsequent colored output
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave terminal detection to owo-colors
      ColorMode::Auto => owo_colors::unset_override(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Emoji prefix for a status line, styled when `stream` supports color
fn message_prefix(name: &str, default: &str, style: Style, stream: Stream) -> String {
  let prefix = get_emoji_or_default(name, default);
  prefix.if_supports_color(stream, |p| p.style(style)).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = message_prefix("check_mark", "✓", Style::new().green().bold(), Stream::Stdout);
  println!("{check} {message}");
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = message_prefix("cross_mark", "✗", Style::new().red().bold(), Stream::Stderr);
  eprintln!("{cross} {message}");
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = message_prefix("warning", "⚠", Style::new().yellow().bold(), Stream::Stdout);
  println!("{warning} {message}");
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = message_prefix("information", "ℹ", Style::new().blue().bold(), Stream::Stdout);
  println!("{info} {message}");
}

/// Format an optional timestamp, rendering absent values as `-`
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
  match timestamp {
    Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    None => "-".to_string(),
  }
}

/// Format a bundle lifecycle status
pub fn format_bundle_status(status: &str) -> String {
  match status {
    "Done" => status.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    "Started" | "InProgress" => status.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
    "Failed" => status.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
    "Canceled" | "Deleted" => status.if_supports_color(Stream::Stdout, |s| s.bright_black()).to_string(),
    _ => status.to_string(),
  }
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.if_supports_color(Stream::Stdout, |c| c.purple()).to_string()
}
