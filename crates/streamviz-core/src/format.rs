//! Formatting helpers shared by the renderer and driver

use crate::style::{Style, Styler};
use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;

/// Current wall-clock time as `[HH:MM:SS]`, muted
pub fn timestamp(styler: &dyn Styler) -> String {
    styler.paint(&format_clock(&Local::now()), Style::Muted)
}

fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}]", time.format("%H:%M:%S"))
}

/// Prefix every line of `text` with `level` * 2 spaces.
///
/// Splits on `\n` only, so a trailing newline yields a trailing
/// indented empty line.
pub fn indent(text: &str, level: usize) -> String {
    if level == 0 {
        return text.to_string();
    }
    let spaces = "  ".repeat(level);
    text.split('\n')
        .map(|line| format!("{spaces}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-space pretty JSON, indented as a block. Keys keep source order.
pub fn pretty_print(value: &Value, level: usize) -> String {
    indent(&to_pretty_json(value), level)
}

/// Two-space pretty JSON without extra indentation
pub fn to_pretty_json(value: &Value) -> String {
    // Serializing a `Value` to a String cannot fail
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// First `max_chars` characters of `s`, never splitting a code point
pub fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
