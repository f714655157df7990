//! Validation of candidate values and of definition documents.
//!
//! # Candidate values
//!
//! [`MultiselectDescriptor::check_validity`] accepts an empty value (unless
//! the attribute is mandatory) or a sequence. Anything else is rejected,
//! mandatory or not.
//!
//! # Definition documents
//!
//! Serialized descriptors are checked against the embedded JSON Schema
//! (Draft 7) `schemas/multiselect-definition.json` before they are
//! deserialized.
//!
//! ```rust
//! use serde_json::json;
//! use multiselect::{MultiselectDescriptor, ValidityError};
//!
//! let mut tags = MultiselectDescriptor::new("tags");
//! tags.set_mandatory(true);
//!
//! assert!(tags.check_validity(&json!(["a"]), false).is_ok());
//! assert!(matches!(
//!     tags.check_validity(&json!([]), false),
//!     Err(ValidityError::MandatoryFieldEmpty { .. })
//! ));
//! assert!(tags.check_validity(&json!([]), true).is_ok());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::coerce;
use crate::descriptor::MultiselectDescriptor;
use crate::error::{ValidityError, ValidityResult};

static DEFINITION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/multiselect-definition.json"))
        .expect("Invalid embedded schema")
});

impl MultiselectDescriptor {
    /// Check whether `data` may be stored in this attribute.
    ///
    /// `null`, `""` and `[]` are empty. With `omit_mandatory_check` set the
    /// mandatory flag is ignored (drafts, partial saves).
    pub fn check_validity(&self, data: &Value, omit_mandatory_check: bool) -> ValidityResult<()> {
        let empty = coerce::is_empty(data);

        if !omit_mandatory_check && self.is_mandatory() && empty {
            return Err(ValidityError::MandatoryFieldEmpty {
                field: self.name().to_string(),
            });
        }

        if !empty && !data.is_array() {
            return Err(ValidityError::InvalidType {
                field: self.name().to_string(),
            });
        }

        Ok(())
    }
}

/// Validate a JSON document against a JSON Schema.
///
/// Returns every validation message when the document does not match.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a serialized multiselect descriptor.
pub fn validate_definition(data: &Value) -> Result<(), Vec<String>> {
    validate(&DEFINITION_SCHEMA, data)
}

/// Quick check against the definition schema.
pub fn is_valid_definition(data: &Value) -> bool {
    jsonschema::draft7::is_valid(&DEFINITION_SCHEMA, data)
}
