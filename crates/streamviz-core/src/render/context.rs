//! Output context handed to every handler

use crate::config::RenderConfig;
use crate::format::timestamp;
use crate::style::{Style, Styler};
use std::io::{self, Write};

/// Output sink, configuration and styler for one render call
pub struct RenderContext<'a> {
    out: &'a mut dyn Write,
    config: &'a RenderConfig,
    styler: &'a dyn Styler,
}

impl<'a> RenderContext<'a> {
    /// Wrap an output sink for one render call
    pub fn new(out: &'a mut dyn Write, config: &'a RenderConfig, styler: &'a dyn Styler) -> Self {
        Self {
            out,
            config,
            styler,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Whether compact mode is active
    pub fn is_compact(&self) -> bool {
        self.config.is_compact()
    }

    /// Style text without writing it
    pub fn paint(&self, text: &str, style: Style) -> String {
        self.styler.paint(text, style)
    }

    /// Timestamp prefix for header lines, empty unless enabled
    fn stamp(&self) -> String {
        if self.config.show_timestamps {
            format!("{} ", timestamp(self.styler))
        } else {
            String::new()
        }
    }

    /// Blank line, then a header line
    pub fn section(&mut self, text: &str, style: Style) -> io::Result<()> {
        let line = format!("{}{}", self.stamp(), self.paint(text, style));
        writeln!(self.out)?;
        writeln!(self.out, "{line}")
    }

    /// Header line without the leading blank line
    pub fn title(&mut self, text: &str, style: Style) -> io::Result<()> {
        let line = format!("{}{}", self.stamp(), self.paint(text, style));
        writeln!(self.out, "{line}")
    }

    /// Styled line
    pub fn line(&mut self, text: &str, style: Style) -> io::Result<()> {
        let line = self.paint(text, style);
        writeln!(self.out, "{line}")
    }

    /// Unstyled line
    pub fn plain(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Styled text with no newline; consecutive calls continue the line
    pub fn inline(&mut self, text: &str, style: Style) -> io::Result<()> {
        let text = self.paint(text, style);
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Bare line break
    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }
}
