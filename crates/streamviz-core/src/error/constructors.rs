//! Constructor methods for VizError

use super::types::VizError;

impl VizError {
    /// Create a new input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            source: None,
        }
    }

    /// Create an input error wrapping the underlying io error
    pub fn input_from(source: std::io::Error) -> Self {
        Self::Input {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>, preview: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            preview: preview.into(),
        }
    }

    /// Create a configuration error naming the offending field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
