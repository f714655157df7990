//! # Multiselect - multi-value selection attribute descriptor
//!
//! A multiselect attribute stores a set of tokens picked from a fixed option
//! list. The [`MultiselectDescriptor`] converts that logical value between
//! the representations its collaborators exchange, validates candidate
//! values and builds filter fragments for listings.
//!
//! ## Representations
//!
//! ```text
//!                      ┌──────────────┐
//!   storage  "a,b"  ◀──┤              ├──▶  edit      "a,b" / ["a","b"]
//!   query   ",a,b," ◀──┤  ["a", "b"]  ├──▶  csv       "a,b"
//!   filter  LIKE    ◀──┤              ├──▶  diff      <ul><li>A</li>…
//!                      └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use multiselect::{EditProtocol, MultiselectDescriptor, SelectOption};
//! use serde_json::json;
//!
//! let mut colors = MultiselectDescriptor::new("colors");
//! colors.set_options(vec![SelectOption::new("Red", "r"), SelectOption::new("Blue", "b")]);
//!
//! let stored = colors.get_data_for_resource(&json!(["r", "b"]));
//! assert_eq!(stored.as_deref(), Some("r,b"));
//! assert_eq!(colors.get_data_from_resource(stored.as_deref()), Some(vec!["r".into(), "b".into()]));
//! assert_eq!(colors.get_data_for_query_resource(&json!(["r", "b"])).as_deref(), Some(",r,b,"));
//! assert_eq!(
//!     colors.get_data_from_editmode(&json!(["b"]), EditProtocol::Structured),
//!     Some(vec!["b".to_string()])
//! );
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Option list, base configuration, preview shapes
//! - [`coerce`] - Lenient token and integer coercion
//! - [`descriptor`] - The descriptor and its configuration
//! - [`codec`] - Representation conversions
//! - [`validation`] - Value validity and definition schema checks
//! - [`filter`] - Filter fragment generation
//! - [`preview`] - Diff/version markup preview
//! - [`config`] - Conversion settings

// Core modules
pub mod error;
pub mod models;
pub mod coerce;

// Descriptor
pub mod descriptor;

// Conversions
pub mod codec;
pub mod preview;

// Validation and filtering
pub mod validation;
pub mod filter;

// Settings
pub mod config;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ConfigError,
    DefinitionError,
    FilterError,
    ValidityError,
};

pub use models::{
    ColumnType,
    DiffPreview,
    FieldDefinition,
    FieldType,
    MarkupPreview,
    PreviewKind,
    SelectOption,
    Selection,
};

pub use descriptor::MultiselectDescriptor;

pub use codec::{CsvEmptyPolicy, EditProtocol};

pub use validation::{is_valid_definition, validate_definition};

pub use filter::{FilterOperator, FilterParams, FilterTarget};

pub use config::ConversionSettings;
