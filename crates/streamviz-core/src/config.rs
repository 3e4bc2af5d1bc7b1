//! Render configuration
//!
//! Built once at startup and passed by reference into the driver and
//! renderer. Nothing mutates it afterwards.

use crate::error::{VizError, VizResult};

/// Default number of tool result lines shown before truncating
pub const DEFAULT_MAX_RESULT_LINES: usize = 10;

/// Default number of characters of a malformed line echoed back
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// How events are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Full rendering of every event kind
    #[default]
    Normal,
    /// Echo parsed input as pretty JSON, bypassing the renderer
    Raw,
    /// Suppress tool input, thinking text, keepalives and parse errors
    Compact,
}

impl RenderMode {
    /// Resolve mode from invocation flags. Raw wins over compact.
    pub fn from_flags(raw: bool, compact: bool) -> Self {
        if raw {
            RenderMode::Raw
        } else if compact {
            RenderMode::Compact
        } else {
            RenderMode::Normal
        }
    }

    /// Echo input as JSON instead of rendering
    pub fn is_raw(self) -> bool {
        self == RenderMode::Raw
    }

    /// Hide low-value output
    pub fn is_compact(self) -> bool {
        self == RenderMode::Compact
    }

    /// Label printed in the startup banner, if any
    pub fn banner_label(self) -> Option<&'static str> {
        match self {
            RenderMode::Normal => None,
            RenderMode::Raw => Some("Raw JSON"),
            RenderMode::Compact => Some("Compact"),
        }
    }
}

/// Immutable rendering settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub mode: RenderMode,
    /// Hard cap on rendered tool result lines
    pub max_result_lines: usize,
    /// Characters of a malformed line shown in the parse error
    pub preview_chars: usize,
    /// Prefix structural headers with a wall-clock timestamp
    pub show_timestamps: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Normal,
            max_result_lines: DEFAULT_MAX_RESULT_LINES,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            show_timestamps: false,
        }
    }
}

impl RenderConfig {
    /// Default caps for the given mode
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the tool result line cap
    pub fn with_max_result_lines(mut self, lines: usize) -> Self {
        self.max_result_lines = lines;
        self
    }

    /// Set the parse error preview length
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Enable header timestamps
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Reject settings that would hide all content
    pub fn validate(self) -> VizResult<Self> {
        if self.max_result_lines == 0 {
            return Err(VizError::config_field(
                "tool result line cap must be at least 1",
                "max_result_lines",
            ));
        }
        if self.preview_chars == 0 {
            return Err(VizError::config_field(
                "parse error preview must be at least 1 character",
                "preview_chars",
            ));
        }
        Ok(self)
    }

    /// Shortcut for `mode.is_compact()`
    pub fn is_compact(&self) -> bool {
        self.mode.is_compact()
    }
}
