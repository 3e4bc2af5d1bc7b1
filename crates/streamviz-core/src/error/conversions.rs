//! From trait implementations for VizError conversions

use super::types::VizError;

// Write failures are the only io errors that reach `?` directly; reads go
// through `VizError::input_from` at the line source.
impl From<std::io::Error> for VizError {
    fn from(error: std::io::Error) -> Self {
        Self::Output {
            message: error.to_string(),
            source: Some(error),
        }
    }
}
