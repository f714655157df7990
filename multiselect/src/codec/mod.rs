//! Conversions between the logical value and its encoded forms.
//!
//! | form | encode | decode |
//! |------|--------|--------|
//! | storage | `a,b` | split non-empty text, else `None` |
//! | query | `,a,b,` | - |
//! | edit | `a,b` | structured pass-through or split, see [`EditProtocol`] |
//! | csv | `a,b` | split, empty field per [`CsvEmptyPolicy`] |
//! | version preview | `a,b` | - |
//!
//! Every conversion is total: anything that is not a sequence encodes to
//! `None`, and sequence elements that are not strings are coerced to text.
//! Tokens are not escaped, so a token must not contain the separator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::coerce::{self, SEPARATOR};
use crate::descriptor::MultiselectDescriptor;
use crate::models::Selection;

// =============================================================================
// Protocol flags
// =============================================================================

/// Shape of the values the editing surface sends back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditProtocol {
    /// Comma-joined text.
    #[default]
    Legacy,
    /// Already a JSON sequence; passed through.
    Structured,
}

impl FromStr for EditProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "text" => Ok(Self::Legacy),
            "structured" | "array" => Ok(Self::Structured),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for EditProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// What an empty CSV field imports as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvEmptyPolicy {
    /// Split unconditionally: `""` -> `[""]`.
    Split,
    /// `""` -> `None`, like the storage form.
    #[default]
    Null,
    /// `""` -> `[]`.
    Empty,
}

impl FromStr for CsvEmptyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "null" | "none" => Ok(Self::Null),
            "empty" => Ok(Self::Empty),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for CsvEmptyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Null => write!(f, "null"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

static NULL: Value = Value::Null;

/// Comma-join a sequence; `None` for non-sequences and empty sequences.
fn join_sequence(data: &Value) -> Option<String> {
    coerce::tokens(data)
        .filter(|tokens| !tokens.is_empty())
        .map(|tokens| coerce::join(&tokens))
}

/// Split non-empty text; `None` for the empty string.
fn split_non_empty(text: &str) -> Option<Selection> {
    if text.is_empty() {
        None
    } else {
        Some(coerce::split(text))
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl MultiselectDescriptor {
    /// Logical value -> storage column text.
    pub fn get_data_for_resource(&self, data: &Value) -> Option<String> {
        join_sequence(data)
    }

    /// Storage column text -> logical value.
    ///
    /// Absent or empty text decodes to `None`, never to an empty selection.
    pub fn get_data_from_resource(&self, data: Option<&str>) -> Option<Selection> {
        data.and_then(split_non_empty)
    }

    /// Logical value -> query column text, bracketed as `,a,b,`.
    ///
    /// Every token is delimited on both sides so `LIKE '%,a,%'` matches
    /// whole tokens only.
    pub fn get_data_for_query_resource(&self, data: &Value) -> Option<String> {
        if coerce::is_empty(data) {
            return None;
        }
        join_sequence(data).map(|joined| format!("{SEPARATOR}{joined}{SEPARATOR}"))
    }

    /// Logical value -> editing surface.
    pub fn get_data_for_editmode(&self, data: &Value) -> Option<String> {
        join_sequence(data)
    }

    /// Editing surface -> logical value.
    ///
    /// Under [`EditProtocol::Structured`] a sequence is passed through as is.
    /// Text is split on the separator under either protocol, so a structured
    /// surface that still posts text keeps working.
    pub fn get_data_from_editmode(&self, data: &Value, protocol: EditProtocol) -> Option<Selection> {
        match (data, protocol) {
            (Value::Null, _) => None,
            (Value::Array(_), EditProtocol::Structured) => coerce::tokens(data),
            (Value::Array(_), EditProtocol::Legacy) => {
                log::debug!("'{}': sequence received under legacy edit protocol", self.name());
                coerce::tokens(data)
            }
            (other, EditProtocol::Structured) => {
                log::debug!("'{}': text received under structured edit protocol", self.name());
                split_non_empty(&coerce::token(other))
            }
            (other, EditProtocol::Legacy) => split_non_empty(&coerce::token(other)),
        }
    }

    /// Plain-text version preview.
    pub fn get_version_preview(&self, data: &Value) -> Option<String> {
        join_sequence(data)
    }

    /// Value of this attribute in an object record keyed by attribute name.
    pub fn get_data_from_object_param<'a>(&self, object: &'a Value) -> &'a Value {
        object.get(self.name()).unwrap_or(&NULL)
    }

    /// Object record -> CSV field.
    pub fn get_for_csv_export(&self, object: &Value) -> Option<String> {
        self.csv_export(self.get_data_from_object_param(object))
    }

    /// Logical value -> CSV field.
    pub fn csv_export(&self, data: &Value) -> Option<String> {
        join_sequence(data)
    }

    /// CSV field -> logical value.
    ///
    /// Non-empty fields are always split. The empty field follows `policy`.
    pub fn get_from_csv_import(&self, import_value: &str, policy: CsvEmptyPolicy) -> Option<Selection> {
        if !import_value.is_empty() {
            return Some(coerce::split(import_value));
        }
        match policy {
            CsvEmptyPolicy::Split => Some(vec![String::new()]),
            CsvEmptyPolicy::Null => None,
            CsvEmptyPolicy::Empty => Some(Vec::new()),
        }
    }
}
