//! Error types for the multiselect descriptor.
//!
//! - [`ValidityError`] - candidate value rejected by [`check_validity`](crate::MultiselectDescriptor::check_validity)
//! - [`FilterError`] - filter expression could not be generated
//! - [`DefinitionError`] - class definition document could not be loaded
//! - [`ConfigError`] - conversion settings could not be read
//!
//! Representation conversions are total and never return an error.

use thiserror::Error;

// =============================================================================
// Validity Errors
// =============================================================================

/// Errors raised while checking a candidate value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidityError {
    /// Mandatory attribute received an empty value.
    #[error("Empty mandatory field [ {field} ]")]
    MandatoryFieldEmpty { field: String },

    /// Non-empty value that is not an ordered sequence.
    #[error("Invalid multiselect data")]
    InvalidType { field: String },
}

impl ValidityError {
    /// Name of the attribute that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::MandatoryFieldEmpty { field } | Self::InvalidType { field } => field,
        }
    }
}

// =============================================================================
// Filter Errors
// =============================================================================

/// Errors from filter expression generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The operator has no filter semantics for this attribute type.
    #[error("Unsupported filter operator: {0}")]
    UnsupportedOperator(String),
}

// =============================================================================
// Definition Errors
// =============================================================================

/// Errors while loading a serialized descriptor.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Failed to read the definition file.
    #[error("Failed to read definition: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or wrong shape.
    #[error("Definition JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document does not match the embedded definition schema.
    #[error("Definition schema validation failed: {errors:?}")]
    Schema { errors: Vec<String> },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while reading conversion settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting carries a value outside its allowed set.
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validity checks.
pub type ValidityResult<T> = Result<T, ValidityError>;

/// Result type for filter generation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type for definition loading.
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Result type for settings.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_message_names_field() {
        let err = ValidityError::MandatoryFieldEmpty { field: "tags".into() };
        assert_eq!(err.to_string(), "Empty mandatory field [ tags ]");
        assert_eq!(err.field(), "tags");
    }

    #[test]
    fn test_definition_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DefinitionError = json_err.into();
        assert!(err.to_string().starts_with("Definition JSON error"));
    }

    #[test]
    fn test_config_error_format() {
        let err = ConfigError::InvalidValue {
            key: "MULTISELECT_EDIT_PROTOCOL".into(),
            value: "widget".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("MULTISELECT_EDIT_PROTOCOL"));
        assert!(msg.contains("widget"));
    }
}
