//! Core error type for streamviz

use thiserror::Error;

/// Result type alias for streamviz operations
pub type VizResult<T> = Result<T, VizError>;

/// Main error type for streamviz
#[derive(Error, Debug)]
pub enum VizError {
    /// Reading from the line source failed
    #[error("Stdin error: {message}")]
    Input {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A line could not be parsed as JSON
    #[error("Error parsing JSON: {message}")]
    Parse {
        message: String,
        /// Leading characters of the offending line
        preview: String,
    },

    /// Writing rendered output failed
    #[error("Output error: {message}")]
    Output {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: Option<String>,
    },
}

impl VizError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VizError::Input { .. } => "VIZ_INPUT",
            VizError::Parse { .. } => "VIZ_PARSE",
            VizError::Output { .. } => "VIZ_OUTPUT",
            VizError::Config { .. } => "VIZ_CONFIG",
        }
    }

    /// Whether the driver can continue with the next line
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VizError::Parse { .. })
    }

    /// Human-readable message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            VizError::Input { message, .. }
            | VizError::Parse { message, .. }
            | VizError::Output { message, .. }
            | VizError::Config { message, .. } => message,
        }
    }
}
