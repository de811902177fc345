//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages and the configure-style check listing.

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
}

/// Width the check labels are padded to, so results line up.
const CHECK_LABEL_WIDTH: usize = 44;

pub fn yes_no(value: bool) -> &'static str {
  if value { "yes" } else { "no" }
}

pub fn format_check_line(label: &str, found: bool) -> String {
  let text = format!("Checking for {}", label);
  format!(
    "{:<width$} : {}",
    text,
    if found { "yes" } else { "not found" },
    width = CHECK_LABEL_WIDTH
  )
}

pub fn print_check(label: &str, found: bool, mandatory: bool) {
  let line = format_check_line(label, found);
  if found {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.green()));
  } else if mandatory {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.red()));
  } else {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.yellow()));
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
