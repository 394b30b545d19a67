//! Error types for form rendering.

use thiserror::Error;

/// Form rendering errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field was rendered with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// Select options could not be enumerated.
    #[error("invalid select options: {0}")]
    InvalidOptions(String),

    /// A configuration option name is not recognised.
    #[error("unknown configuration option: {0}")]
    UnknownOption(String),

    /// A configuration document could not be read.
    #[error("failed to parse configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::EmptyFieldName.to_string(),
            "field name must not be empty"
        );
        assert_eq!(
            FormError::UnknownOption("colour".to_string()).to_string(),
            "unknown configuration option: colour"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FormError::from(err);
        assert!(matches!(err, FormError::Config(_)));
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }
}
