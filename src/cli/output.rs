//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::OwoColorize;
use rust_decimal::Decimal;

/// Print the application header with name and version.
pub fn header(version: &str) {
    println!("{} {}", "crypto-monitor".bold(), version.dimmed());
}

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<14} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {}", "×".red(), message);
}

/// Print an indented note.
pub fn note(message: &str) {
    println!("  {}", message.dimmed());
}

/// Print a rendered table, indented to match the other output.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}

#[must_use]
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.cyan())
}

#[must_use]
pub fn muted(value: impl Display) -> String {
    format!("{}", value.dimmed())
}

/// Green for gains, red for losses.
#[must_use]
pub fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        format!("{}", value.red())
    } else {
        format!("{}", value.green())
    }
}

/// Mask a secret, keeping a short prefix and suffix.
#[must_use]
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() >= 15 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{head}...{tail}")
    } else {
        let head: String = chars.iter().take(4).collect();
        format!("{head}...")
    }
}
