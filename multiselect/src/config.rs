//! Conversion settings chosen by the calling collaborator.
//!
//! The descriptor never inspects its environment. Hosts resolve these
//! settings once (typically with [`ConversionSettings::from_env`] after
//! loading `.env`) and pass the relevant flag into each conversion call.
//!
//! | variable | values | default |
//! |----------|--------|---------|
//! | `MULTISELECT_EDIT_PROTOCOL` | `legacy`, `structured` | `legacy` |
//! | `MULTISELECT_FILTER_TARGET` | `storage`, `query` | `storage` |
//! | `MULTISELECT_CSV_EMPTY` | `split`, `null`, `empty` | `null` |

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::codec::{CsvEmptyPolicy, EditProtocol};
use crate::error::{ConfigError, ConfigResult};
use crate::filter::{FilterParams, FilterTarget};

pub const EDIT_PROTOCOL_VAR: &str = "MULTISELECT_EDIT_PROTOCOL";
pub const FILTER_TARGET_VAR: &str = "MULTISELECT_FILTER_TARGET";
pub const CSV_EMPTY_VAR: &str = "MULTISELECT_CSV_EMPTY";

/// Flags selecting between the supported wire conventions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConversionSettings {
    #[serde(default)]
    pub edit_protocol: EditProtocol,
    #[serde(default)]
    pub filter_target: FilterTarget,
    #[serde(default)]
    pub csv_empty: CsvEmptyPolicy,
}

impl ConversionSettings {
    /// Read settings from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup. Unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            edit_protocol: parse_setting(&lookup, EDIT_PROTOCOL_VAR)?,
            filter_target: parse_setting(&lookup, FILTER_TARGET_VAR)?,
            csv_empty: parse_setting(&lookup, CSV_EMPTY_VAR)?,
        })
    }

    /// Filter parameters for the configured target.
    pub fn filter_params(&self) -> FilterParams {
        FilterParams::default().with_target(self.filter_target)
    }
}

fn parse_setting<T, F>(lookup: &F, key: &str) -> ConfigResult<T>
where
    T: FromStr + Default,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        _ => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = ConversionSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, ConversionSettings::default());
        assert_eq!(settings.edit_protocol, EditProtocol::Legacy);
        assert_eq!(settings.filter_target, FilterTarget::Storage);
        assert_eq!(settings.csv_empty, CsvEmptyPolicy::Null);
    }

    #[test]
    fn test_values_parsed() {
        let settings = ConversionSettings::from_lookup(lookup(&[
            (EDIT_PROTOCOL_VAR, "structured"),
            (FILTER_TARGET_VAR, "QUERY"),
            (CSV_EMPTY_VAR, "split"),
        ]))
        .unwrap();
        assert_eq!(settings.edit_protocol, EditProtocol::Structured);
        assert_eq!(settings.filter_target, FilterTarget::Query);
        assert_eq!(settings.csv_empty, CsvEmptyPolicy::Split);
        assert_eq!(settings.filter_params().target, FilterTarget::Query);
    }

    #[test]
    fn test_invalid_value_reported() {
        let err = ConversionSettings::from_lookup(lookup(&[(EDIT_PROTOCOL_VAR, "widget")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: EDIT_PROTOCOL_VAR.into(),
                value: "widget".into()
            }
        );
    }

    #[test]
    fn test_blank_value_uses_default() {
        let settings = ConversionSettings::from_lookup(lookup(&[(CSV_EMPTY_VAR, "  ")])).unwrap();
        assert_eq!(settings.csv_empty, CsvEmptyPolicy::Null);
    }
}
