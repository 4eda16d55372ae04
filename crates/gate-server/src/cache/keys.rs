//! Composite cache keys.

use std::fmt;

/// Ordered sequence of strings identifying a cached list.
///
/// Parts are kept verbatim: two keys are equal only when they have the same
/// parts in the same order.
///
/// # Examples
///
/// ```
/// use gate_server::cache::CacheKey;
///
/// let key = CacheKey::new(["azure", "eastus"]);
/// assert_eq!(key.parts(), ["azure", "eastus"]);
/// assert_eq!(key.to_string(), "azure/eastus");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Vec<String>);

impl CacheKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CacheKey {
    fn from(part: &str) -> Self {
        Self(vec![part.to_string()])
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
