//! SQL filter fragments over a multiselect column.
//!
//! Only equality has filter semantics for a set of tokens: `=` means "the
//! selection contains this value". Any other operator is reported as
//! [`FilterError::UnsupportedOperator`] so callers can tell it apart from a
//! filter they do not need.
//!
//! Two physical columns can be targeted:
//!
//! - [`FilterTarget::Storage`] - plain substring match over `a,b`.
//!   Compatible with existing listings, but `a` also matches `cat`.
//! - [`FilterTarget::Query`] - delimited match over `,a,b,`, which
//!   only matches whole tokens.
//!
//! ```rust
//! use multiselect::{FilterError, MultiselectDescriptor};
//!
//! let tags = MultiselectDescriptor::new("tags");
//! assert_eq!(tags.get_filter_condition("a", "=").unwrap(), "`tags` LIKE '%a%' ");
//! assert!(matches!(tags.get_filter_condition("a", ">"), Err(FilterError::UnsupportedOperator(_))));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::coerce::SEPARATOR;
use crate::descriptor::MultiselectDescriptor;
use crate::error::{FilterError, FilterResult};

/// Operators a listing may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    In,
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "=" => Ok(Self::Eq),
            "!=" | "<>" => Ok(Self::NotEq),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "LIKE" => Ok(Self::Like),
            "IN" => Ok(Self::In),
            _ => Err(FilterError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Like => "LIKE",
            Self::In => "IN",
        };
        write!(f, "{}", op)
    }
}

/// Column the filter matches against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterTarget {
    /// Comma-joined storage column, unbracketed substring match.
    #[default]
    Storage,
    /// Bracketed query column, whole-token match.
    Query,
}

impl FromStr for FilterTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "storage" => Ok(Self::Storage),
            "query" => Ok(Self::Query),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for FilterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage => write!(f, "storage"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Optional overrides for [`MultiselectDescriptor::get_filter_condition_ext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Column identifier; the attribute name when unset or empty.
    pub name: Option<String>,
    pub target: FilterTarget,
}

impl FilterParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_target(mut self, target: FilterTarget) -> Self {
        self.target = target;
        self
    }
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl MultiselectDescriptor {
    /// Filter fragment over this attribute's storage column.
    pub fn get_filter_condition(&self, value: &str, operator: &str) -> FilterResult<String> {
        self.get_filter_condition_ext(value, operator, &FilterParams::default())
    }

    /// Filter fragment with an explicit column name and target.
    ///
    /// The fragment ends with a space so callers can append further
    /// conditions directly.
    pub fn get_filter_condition_ext(
        &self,
        value: &str,
        operator: &str,
        params: &FilterParams,
    ) -> FilterResult<String> {
        let op: FilterOperator = operator.parse()?;
        if op != FilterOperator::Eq {
            log::warn!("'{}': no filter for operator {}", self.name(), op);
            return Err(FilterError::UnsupportedOperator(operator.to_string()));
        }

        let name = params
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(self.name());

        let pattern = match params.target {
            FilterTarget::Storage => format!("%{value}%"),
            FilterTarget::Query => format!("%{SEPARATOR}{value}{SEPARATOR}%"),
        };

        Ok(format!("{} LIKE {} ", quote_identifier(name), quote_literal(&pattern)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> MultiselectDescriptor {
        MultiselectDescriptor::new("tags")
    }

    #[test]
    fn test_equality_on_storage_column() {
        let condition = tags().get_filter_condition("a", "=").unwrap();
        assert_eq!(condition, "`tags` LIKE '%a%' ");
    }

    #[test]
    fn test_unsupported_operators() {
        let d = tags();
        for op in [">", "<", "!=", "LIKE", "IN", "~"] {
            assert_eq!(
                d.get_filter_condition("a", op),
                Err(FilterError::UnsupportedOperator(op.to_string()))
            );
        }
    }

    #[test]
    fn test_column_name_override() {
        let d = tags();
        let params = FilterParams::default().with_name("o_tags");
        assert_eq!(
            d.get_filter_condition_ext("a", "=", &params).unwrap(),
            "`o_tags` LIKE '%a%' "
        );

        let empty_name = FilterParams::default().with_name("");
        assert!(d
            .get_filter_condition_ext("a", "=", &empty_name)
            .unwrap()
            .starts_with("`tags`"));
    }

    #[test]
    fn test_query_column_matches_whole_tokens() {
        let params = FilterParams::default().with_target(FilterTarget::Query);
        assert_eq!(
            tags().get_filter_condition_ext("a", "=", &params).unwrap(),
            "`tags` LIKE '%,a,%' "
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let d = tags();
        assert_eq!(d.get_filter_condition("it's", "=").unwrap(), "`tags` LIKE '%it''s%' ");

        let params = FilterParams::default().with_name("we`ird");
        assert!(d
            .get_filter_condition_ext("a", "=", &params)
            .unwrap()
            .starts_with("`we``ird`"));
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("=".parse::<FilterOperator>(), Ok(FilterOperator::Eq));
        assert_eq!("like".parse::<FilterOperator>(), Ok(FilterOperator::Like));
        assert_eq!("<>".parse::<FilterOperator>(), Ok(FilterOperator::NotEq));
        assert!("~".parse::<FilterOperator>().is_err());
        assert_eq!("query".parse::<FilterTarget>(), Ok(FilterTarget::Query));
    }
}
