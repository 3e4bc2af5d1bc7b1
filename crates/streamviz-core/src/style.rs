//! Text styling service
//!
//! Renderers ask for a named [`Style`]; the [`Styler`] decides how (or
//! whether) to color it. Styling never changes the text itself.

use colored::*;

/// Named styles used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Secondary text: ids, timestamps, separators, keepalives
    Muted,
    /// Message lifecycle banners
    Banner,
    /// Tool invocation header
    Tool,
    /// Tool result header
    Success,
    /// Stop reason, mode label
    Warning,
    /// Streamed assistant text and tool result bodies
    Text,
    /// Streamed tool argument fragments
    ToolInput,
    /// Thinking segment header
    ThinkingHeader,
    /// Streamed thinking text
    Thinking,
    /// Error header
    ErrorHeader,
    /// Error body and parse failures
    Error,
    /// Startup banner, fallback header, end of stream
    Accent,
}

/// Applies a named style to a string
pub trait Styler: Send + Sync {
    /// Return `text` decorated for `style`
    fn paint(&self, text: &str, style: Style) -> String;
}

/// ANSI styling through the `colored` crate.
///
/// Honors `colored::control` overrides as well as `NO_COLOR` and
/// `CLICOLOR`, so a disabled terminal gets plain text back.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColoredStyler;

impl ColoredStyler {
    /// Create a new styler
    pub fn new() -> Self {
        Self
    }

    fn apply(&self, text: &str, style: Style) -> ColoredString {
        match style {
            Style::Muted => text.bright_black(),
            Style::Banner => text.magenta().bold(),
            Style::Tool => text.blue().bold(),
            Style::Success => text.green().bold(),
            Style::Warning => text.yellow(),
            Style::Text => text.white(),
            Style::ToolInput => text.cyan(),
            Style::ThinkingHeader => text.yellow().bold(),
            Style::Thinking => text.yellow(),
            Style::ErrorHeader => text.red().bold(),
            Style::Error => text.red(),
            Style::Accent => text.cyan().bold(),
        }
    }
}

impl Styler for ColoredStyler {
    fn paint(&self, text: &str, style: Style) -> String {
        self.apply(text, style).to_string()
    }
}

/// No-op styler for tests and plain output
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}
