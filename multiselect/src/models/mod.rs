//! Data shapes exchanged with the surrounding object framework.
//!
//! - [`SelectOption`] - one entry of the option list (label + token)
//! - [`FieldDefinition`] - base attribute configuration shared by all attribute types
//! - [`FieldType`] / [`ColumnType`] - fixed type tags written into class definitions
//! - [`DiffPreview`] - rendering handed to the diff/version viewer

use serde::{Deserialize, Serialize, Serializer};

use crate::coerce;

/// Logical value of a multiselect attribute: selected tokens in order.
pub type Selection = Vec<String>;

// =============================================================================
// Option list
// =============================================================================

/// A selectable option.
///
/// `key` is the label shown to editors, `value` the token that gets stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    /// Display label.
    #[serde(deserialize_with = "coerce::deserialize_token")]
    pub key: String,
    /// Stored token.
    #[serde(deserialize_with = "coerce::deserialize_token")]
    pub value: String,
}

impl SelectOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Type tags
// =============================================================================

/// Attribute type tag (`"fieldtype"` in class definitions).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Multiselect,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multiselect => "multiselect",
        }
    }
}

/// Column type declared to the persistence layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
        }
    }
}

// =============================================================================
// Base attribute configuration
// =============================================================================

/// Configuration every attribute type carries, regardless of its data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FieldDefinition {
    /// Attribute identifier, also the column name.
    pub name: String,
    /// Editor label.
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Empty values fail validation.
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, rename = "noteditable")]
    pub not_editable: bool,
    #[serde(default)]
    pub invisible: bool,
    /// The persistence layer should index the column.
    #[serde(default)]
    pub index: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Diff preview
// =============================================================================

/// Kind tag telling the viewer how to render preview content.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PreviewKind {
    /// Pre-formatted markup, not plain text.
    #[serde(rename = "html")]
    Markup,
}

/// Markup rendering of a selection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MarkupPreview {
    #[serde(rename = "html")]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: PreviewKind,
}

/// Rendering handed to the diff/version viewer.
///
/// Serializes as `""` when empty and as `{"html": ..., "type": "html"}`
/// otherwise, which is the shape the viewer expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffPreview {
    Empty,
    Markup(MarkupPreview),
}

impl DiffPreview {
    pub fn markup(content: impl Into<String>) -> Self {
        Self::Markup(MarkupPreview {
            content: content.into(),
            kind: PreviewKind::Markup,
        })
    }

    /// Markup content, `None` for the empty marker.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Markup(m) => Some(&m.content),
        }
    }
}

impl Serialize for DiffPreview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Markup(m) => m.serialize(serializer),
        }
    }
}
