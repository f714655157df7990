//! Lenient value coercion shared by the conversions.
//!
//! Collaborators hand the descriptor loosely typed [`Value`]s (form posts,
//! import rows, stored records). These helpers turn them into tokens and
//! integers without ever failing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Separator between tokens in every text encoding.
pub const SEPARATOR: &str = ",";

/// Leading numeric prefix of a string, e.g. `"  12.5px"` -> `12.5`.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid numeric prefix regex")
});

/// Integer cast used for UI sizing hints.
///
/// `null` and the empty string mean "unset" and yield `None`. Everything
/// else yields a number: numeric prefixes of strings are truncated toward
/// zero, non-numeric strings give `0`, booleans give `0`/`1`, containers
/// give `0` when empty and `1` otherwise.
pub fn integer_cast(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(
            NUMERIC_PREFIX
                .find(s)
                .and_then(|m| m.as_str().trim().parse::<f64>().ok())
                .map(truncate)
                .unwrap_or(0),
        ),
        Value::Number(n) => Some(n.as_i64().unwrap_or_else(|| n.as_f64().map(truncate).unwrap_or(0))),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Array(items) => Some(i64::from(!items.is_empty())),
        Value::Object(map) => Some(i64::from(!map.is_empty())),
    }
}

fn truncate(f: f64) -> i64 {
    // saturating, NaN -> 0
    f.trunc() as i64
}

/// Emptiness rule used by validation and query encoding.
///
/// `null`, `""` and `[]` are empty. Any other value, including `0`,
/// `false` and `"0"`, is not.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Coerce one element of a selection into its token text.
///
/// Booleans follow the string-join convention of the host framework
/// (`true` -> `"1"`, `false` -> `""`), `null` becomes `""` and nested
/// containers are rendered as compact JSON.
pub fn token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => {
            log::debug!("coercing non-scalar selection element to JSON text");
            other.to_string()
        }
    }
}

/// Tokens of a sequence value, or `None` when the value is not a sequence.
pub fn tokens(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| items.iter().map(token).collect())
}

/// Join tokens with [`SEPARATOR`].
pub fn join(tokens: &[String]) -> String {
    tokens.join(SEPARATOR)
}

/// Split text on [`SEPARATOR`] unconditionally (`""` -> `[""]`).
pub fn split(text: &str) -> Vec<String> {
    text.split(SEPARATOR).map(str::to_string).collect()
}

// =============================================================================
// Serde helpers
// =============================================================================

/// Deserialize a UI dimension through [`integer_cast`].
pub fn deserialize_dimension<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(integer_cast))
}

/// Deserialize an option token or label that may have been stored as a number.
pub fn deserialize_token<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(token(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_cast_strings() {
        assert_eq!(integer_cast(&json!("300")), Some(300));
        assert_eq!(integer_cast(&json!(" 12.9px")), Some(12));
        assert_eq!(integer_cast(&json!("-4")), Some(-4));
        assert_eq!(integer_cast(&json!("1e3")), Some(1000));
        assert_eq!(integer_cast(&json!("wide")), Some(0));
        assert_eq!(integer_cast(&json!("")), None);
    }

    #[test]
    fn test_integer_cast_other_types() {
        assert_eq!(integer_cast(&Value::Null), None);
        assert_eq!(integer_cast(&json!(250)), Some(250));
        assert_eq!(integer_cast(&json!(99.99)), Some(99));
        assert_eq!(integer_cast(&json!(-7.5)), Some(-7));
        assert_eq!(integer_cast(&json!(true)), Some(1));
        assert_eq!(integer_cast(&json!([])), Some(0));
        assert_eq!(integer_cast(&json!([5])), Some(1));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!("0")));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!(["a"])));
    }

    #[test]
    fn test_tokens_coerce_elements() {
        let value = json!(["a", 2, true, false, null, 1.5]);
        assert_eq!(
            tokens(&value),
            Some(vec!["a".into(), "2".into(), "1".into(), "".into(), "".into(), "1.5".into()])
        );
        assert_eq!(tokens(&json!("a,b")), None);
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        assert_eq!(split(""), vec![String::new()]);
        assert_eq!(split("a,,b"), vec!["a".to_string(), String::new(), "b".to_string()]);
    }
}
