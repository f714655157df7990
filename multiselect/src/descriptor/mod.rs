//! The multiselect attribute descriptor.
//!
//! One [`MultiselectDescriptor`] exists per attribute definition. It owns the
//! option list and UI sizing hints, embeds the base [`FieldDefinition`], and
//! is read-only while values are converted: conversions take `&self`, setters
//! take `&mut self`, so the borrow checker enforces the single-writer,
//! many-reader discipline. Share it across threads behind an `Arc` once the
//! definition is loaded.
//!
//! # Example
//!
//! ```rust
//! use multiselect::{MultiselectDescriptor, SelectOption};
//!
//! let mut colors = MultiselectDescriptor::new("colors");
//! colors.set_options(vec![SelectOption::new("Red", "r"), SelectOption::new("Blue", "b")]);
//! colors.set_width(&serde_json::json!("300"));
//! assert_eq!(colors.width(), Some(300));
//! assert_eq!(colors.option_label("b"), Some("Blue"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::coerce;
use crate::error::{DefinitionError, DefinitionResult};
use crate::models::{ColumnType, FieldDefinition, FieldType, SelectOption};
use crate::validation::validate_definition;

/// Type hint for the logical value, used by code generators.
const VALUE_TYPE_HINT: &str = "array";

/// Configuration of one multi-value selection attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MultiselectDescriptor {
    #[serde(default)]
    fieldtype: FieldType,

    #[serde(flatten)]
    base: FieldDefinition,

    #[serde(default, deserialize_with = "nullable_options")]
    options: Vec<SelectOption>,

    #[serde(
        default,
        deserialize_with = "coerce::deserialize_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    width: Option<i64>,

    #[serde(
        default,
        deserialize_with = "coerce::deserialize_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    height: Option<i64>,

    #[serde(default)]
    query_column_type: ColumnType,

    #[serde(default)]
    column_type: ColumnType,
}

fn nullable_options<'de, D>(deserializer: D) -> Result<Vec<SelectOption>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SelectOption>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MultiselectDescriptor {
    /// Create a descriptor with an empty option list.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_base(FieldDefinition::new(name))
    }

    /// Create a descriptor around an existing base configuration.
    pub fn with_base(base: FieldDefinition) -> Self {
        Self {
            fieldtype: FieldType::Multiselect,
            base,
            options: Vec::new(),
            width: None,
            height: None,
            query_column_type: ColumnType::Text,
            column_type: ColumnType::Text,
        }
    }

    // -------------------------------------------------------------------------
    // Base configuration
    // -------------------------------------------------------------------------

    pub fn base(&self) -> &FieldDefinition {
        &self.base
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.base.name = name.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.base.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.base.title = title.into();
        self
    }

    pub fn is_mandatory(&self) -> bool {
        self.base.mandatory
    }

    pub fn set_mandatory(&mut self, mandatory: bool) -> &mut Self {
        self.base.mandatory = mandatory;
        self
    }

    // -------------------------------------------------------------------------
    // Type metadata
    // -------------------------------------------------------------------------

    pub fn field_type(&self) -> &'static str {
        self.fieldtype.as_str()
    }

    /// Column type of the storage form.
    pub fn column_type(&self) -> &'static str {
        self.column_type.as_str()
    }

    /// Column type of the query form.
    pub fn query_column_type(&self) -> &'static str {
        self.query_column_type.as_str()
    }

    pub fn value_type_hint(&self) -> &'static str {
        VALUE_TYPE_HINT
    }

    /// Values of this type may be changed from the diff/merge view.
    pub fn is_diff_change_allowed(&self) -> bool {
        true
    }

    // -------------------------------------------------------------------------
    // Options and sizing
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replace the option list wholesale.
    pub fn set_options(&mut self, options: Vec<SelectOption>) -> &mut Self {
        self.options = options;
        self
    }

    pub fn width(&self) -> Option<i64> {
        self.width
    }

    /// Set the width hint through the integer cast (`"300"` -> `300`, `"wide"` -> `0`).
    pub fn set_width(&mut self, width: &Value) -> &mut Self {
        self.width = coerce::integer_cast(width);
        self
    }

    pub fn height(&self) -> Option<i64> {
        self.height
    }

    /// Set the height hint through the integer cast.
    pub fn set_height(&mut self, height: &Value) -> &mut Self {
        self.height = coerce::integer_cast(height);
        self
    }

    /// Label of the first option carrying `token`.
    pub fn option_label(&self, token: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == token)
            .map(|o| o.key.as_str())
    }

    pub fn has_option(&self, token: &str) -> bool {
        self.option_label(token).is_some()
    }

    /// Tokens of `selection` that are not in the option list, in input order.
    ///
    /// Informational only: validation does not reject unknown tokens.
    pub fn unknown_tokens<'a>(&self, selection: &'a [String]) -> Vec<&'a str> {
        let known: HashSet<&str> = self.options.iter().map(|o| o.value.as_str()).collect();
        selection
            .iter()
            .map(String::as_str)
            .filter(|t| !known.contains(t))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Layered definitions
    // -------------------------------------------------------------------------

    /// Take over the option list of the master definition.
    ///
    /// Sizing hints and base configuration stay local.
    pub fn synchronize_with_master_definition(&mut self, master: &MultiselectDescriptor) {
        log::info!(
            "synchronizing options of '{}' from master '{}' ({} options)",
            self.name(),
            master.name(),
            master.options.len()
        );
        self.options = master.options.clone();
    }

    // -------------------------------------------------------------------------
    // Definition documents
    // -------------------------------------------------------------------------

    /// Load from a class definition fragment, checked against the definition schema.
    pub fn from_value(value: &Value) -> DefinitionResult<Self> {
        validate_definition(value).map_err(|errors| DefinitionError::Schema { errors })?;
        Ok(Self::deserialize(value)?)
    }

    pub fn from_json(json: &str) -> DefinitionResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_file(path: impl AsRef<Path>) -> DefinitionResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use std::sync::Arc;

    fn colors() -> MultiselectDescriptor {
        let mut d = MultiselectDescriptor::new("colors");
        d.set_options(vec![SelectOption::new("Red", "r"), SelectOption::new("Blue", "b")]);
        d
    }

    #[test]
    fn test_type_metadata() {
        let d = colors();
        assert_eq!(d.field_type(), "multiselect");
        assert_eq!(d.column_type(), "text");
        assert_eq!(d.query_column_type(), "text");
        assert_eq!(d.value_type_hint(), "array");
        assert!(d.is_diff_change_allowed());
    }

    #[test]
    fn test_dimension_setters_cast() {
        let mut d = colors();
        d.set_width(&json!("300")).set_height(&json!(120.7));
        assert_eq!(d.width(), Some(300));
        assert_eq!(d.height(), Some(120));

        d.set_width(&json!("wide"));
        assert_eq!(d.width(), Some(0));

        d.set_height(&json!(""));
        assert_eq!(d.height(), None);
    }

    #[test]
    fn test_option_lookups() {
        let d = colors();
        assert_eq!(d.option_label("r"), Some("Red"));
        assert!(d.has_option("b"));
        assert!(!d.has_option("g"));

        let selection = vec!["g".to_string(), "r".to_string(), "x".to_string()];
        assert_eq!(d.unknown_tokens(&selection), vec!["g", "x"]);
    }

    #[test]
    fn test_synchronize_with_master() {
        let mut master = MultiselectDescriptor::new("colors");
        master.set_options(vec![SelectOption::new("Green", "g")]);
        master.set_width(&json!(500));

        let mut local = colors();
        local.set_width(&json!(200)).set_height(&json!(80)).set_mandatory(true);

        local.synchronize_with_master_definition(&master);

        assert_eq!(local.options(), master.options());
        assert_eq!(local.width(), Some(200));
        assert_eq!(local.height(), Some(80));
        assert!(local.is_mandatory());
    }

    #[test]
    fn test_from_value_class_definition() {
        let d = MultiselectDescriptor::from_value(&json!({
            "fieldtype": "multiselect",
            "name": "colors",
            "title": "Colors",
            "mandatory": true,
            "options": [{"key": "Red", "value": "r"}, {"key": "Blue", "value": "b"}],
            "width": "250",
            "height": null,
            "queryColumnType": "text",
            "columnType": "text"
        }))
        .unwrap();

        assert_eq!(d.name(), "colors");
        assert_eq!(d.title(), "Colors");
        assert!(d.is_mandatory());
        assert_eq!(d.options().len(), 2);
        assert_eq!(d.width(), Some(250));
        assert_eq!(d.height(), None);
    }

    #[test]
    fn test_from_value_rejects_wrong_field_type() {
        let err = MultiselectDescriptor::from_value(&json!({
            "fieldtype": "select",
            "name": "colors"
        }))
        .unwrap_err();
        assert!(matches!(err, DefinitionError::Schema { .. }));
    }

    #[test]
    fn test_null_options_load_as_empty() {
        let d = MultiselectDescriptor::from_value(&json!({"name": "colors", "options": null})).unwrap();
        assert!(d.options().is_empty());
    }

    #[test]
    fn test_json_roundtrip_keeps_configuration() {
        let mut d = colors();
        d.set_width(&json!(300)).set_title("Colors");
        let reloaded = MultiselectDescriptor::from_json(&d.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, d);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "colors", "options": [{{"key": "Red", "value": "r"}}]}}"#).unwrap();

        let d = MultiselectDescriptor::from_file(file.path()).unwrap();
        assert_eq!(d.option_label("r"), Some("Red"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = MultiselectDescriptor::from_file("/nonexistent/colors.json").unwrap_err();
        assert!(matches!(err, DefinitionError::Io(_)));
    }

    #[test]
    fn test_shared_reads_across_threads() {
        let d = Arc::new(colors());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let d = Arc::clone(&d);
                std::thread::spawn(move || {
                    let value = json!(["r", format!("t{i}")]);
                    d.get_data_for_resource(&value)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(format!("r,t{i}")));
        }
    }
}
