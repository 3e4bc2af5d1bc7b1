//! Terminal color policy

use crate::args::ColorChoice;
use std::io::IsTerminal;

impl ColorChoice {
    /// Forced on/off, or `None` to keep the `colored` crate's own
    /// environment detection (`NO_COLOR`, `CLICOLOR`)
    pub fn color_override(self, stdout_is_terminal: bool) -> Option<bool> {
        match self {
            ColorChoice::Always => Some(true),
            ColorChoice::Never => Some(false),
            ColorChoice::Auto if stdout_is_terminal => None,
            ColorChoice::Auto => Some(false),
        }
    }
}

/// Apply the color policy process-wide before any output
pub fn configure_color(choice: ColorChoice) {
    let is_terminal = std::io::stdout().is_terminal();
    if let Some(enabled) = choice.color_override(is_terminal) {
        colored::control::set_override(enabled);
    }
    tracing::debug!(?choice, is_terminal, "color policy applied");
}
