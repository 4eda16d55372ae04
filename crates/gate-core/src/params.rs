//! Parsing of the free-form `extra` request header.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{CoreError, Result};

/// Provider specific parameters sent as `key=value` pairs.
///
/// Pairs are separated by `,` or `;`. Later duplicates override earlier ones
/// while keeping the position of the first occurrence.
///
/// # Example
///
/// ```
/// use gate_core::ExtraParams;
///
/// let params = ExtraParams::parse("location=eastus; resource_group = swm").unwrap();
/// assert_eq!(params.get("location"), Some("eastus"));
/// assert_eq!(params.get("resource_group"), Some("swm"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtraParams(IndexMap<String, String>);

impl ExtraParams {
    /// Parses a raw header value.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut map = IndexMap::new();

        for segment in raw.split([',', ';']) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let Some((key, value)) = segment.split_once('=') else {
                return Err(CoreError::invalid_parameter(segment, "expected key=value"));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CoreError::invalid_parameter(segment, "empty key"));
            }

            map.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self(map))
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the non-empty value for `key` or a missing parameter error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CoreError::missing_parameter(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
