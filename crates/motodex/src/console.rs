//! Terminal output helpers
//!
//! Status lines go to stderr with a short colored prefix so stdout stays
//! free for report and query output. Diagnostics from library code flow
//! through `tracing` and are only shown when [`init_tracing`] enables them.

use colored::*;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Sets up the diagnostic subscriber; `RUST_LOG` wins over `verbose`
pub fn init_tracing(verbose: bool) {
  let fallback = if verbose { "motodex=debug,warn" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();
}

fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]{:<width$}", prefix.color(color).bold(), "", width = 7 - prefix.len() - 2)
}

fn prefixed(color: Color, prefix: &str, message: &str) {
  let prefix = format_prefix(color, prefix);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

pub fn info(message: &str) {
  prefixed(Color::Blue, "info", message);
}

pub fn warn(message: &str) {
  prefixed(Color::Yellow, "warn", message);
}

pub fn error(message: &str) {
  prefixed(Color::Red, "error", message);
}

pub fn success(message: &str) {
  prefixed(Color::Green, "sccs", message);
}

pub fn banner_line(length: usize, ch: char) -> String {
  ch.to_string().repeat(length)
}

/// Bold title between two rules, printed to stdout
pub fn announce(title: &str) {
  let rule = banner_line(60, '=');
  println!("{}", rule.cyan());
  println!("{}", title.bold());
  println!("{}", rule.cyan());
}

/// Section heading inside a report
pub fn heading(title: &str) {
  println!();
  println!("{}", title.bold().underline());
}
