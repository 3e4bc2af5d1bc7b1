//! CLI argument definitions using clap
//!
//! - streamviz                 # Render stdin events
//! - streamviz --compact       # Hide low-value output
//! - streamviz --raw           # Echo events as pretty JSON

use clap::{Parser, ValueEnum};
use streamviz_core::config::{DEFAULT_MAX_RESULT_LINES, DEFAULT_PREVIEW_CHARS};
use streamviz_core::{RenderConfig, RenderMode, VizResult};

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal (default)
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "streamviz")]
#[command(about = "Render streamed LLM message events from stdin as colorized terminal output")]
#[command(
    long_about = r#"Render streamed LLM message events from stdin as colorized terminal output

Reads one JSON event per line (message_start, content_block_delta,
tool_result, ping, ...) and prints each as it arrives.

USAGE:
  producer | streamviz              # Full rendering
  producer | streamviz --compact    # Hide tool input, thinking, pings
  producer | streamviz --raw        # Pretty-print each event as JSON"#
)]
#[command(version)]
pub struct Cli {
    /// Echo each event as pretty-printed JSON (overrides --compact)
    #[arg(long)]
    pub raw: bool,

    /// Suppress tool input, thinking text, keepalives and parse errors
    #[arg(long)]
    pub compact: bool,

    /// Prefix event headers with the local time
    #[arg(long)]
    pub timestamps: bool,

    /// Color output: auto, always, never
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Tool result lines shown before truncating
    #[arg(
        long,
        env = "STREAMVIZ_MAX_RESULT_LINES",
        default_value_t = DEFAULT_MAX_RESULT_LINES
    )]
    pub max_result_lines: usize,

    /// Characters of a malformed line shown in parse errors
    #[arg(long, env = "STREAMVIZ_PREVIEW_CHARS", default_value_t = DEFAULT_PREVIEW_CHARS)]
    pub preview_chars: usize,

    /// Diagnostic log filter on stderr, e.g. "debug" (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Render mode from `--raw` and `--compact`
    pub fn mode(&self) -> RenderMode {
        RenderMode::from_flags(self.raw, self.compact)
    }

    /// Build and validate the render configuration
    pub fn render_config(&self) -> VizResult<RenderConfig> {
        let mut config = RenderConfig::new(self.mode())
            .with_max_result_lines(self.max_result_lines)
            .with_preview_chars(self.preview_chars);
        if self.timestamps {
            config = config.with_timestamps();
        }
        config.validate()
    }
}
