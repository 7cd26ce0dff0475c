//! Case-insensitive metadata bags
//!
//! Every [`Outcome`](crate::Outcome) and every reason carries a [`Metadata`] map:
//! string keys compared case-insensitively, values kept in insertion order,
//! last write wins.
//!
//! # Examples
//!
//! ```
//! use verdict::{Metadata, MetadataValue};
//!
//! let mut meta = Metadata::new();
//! meta.insert("RequestId", "abc-123");
//! meta.insert("attempt", 2);
//! meta.insert("requestid", "def-456");
//!
//! assert_eq!(meta.len(), 2);
//! assert_eq!(meta.get("REQUESTID"), Some(&MetadataValue::from("def-456")));
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::Semigroup;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Free-form text
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Boolean(bool),
}

impl MetadataValue {
    /// Returns the text value, if this is `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) => f.write_str(s),
            MetadataValue::Integer(n) => write!(f, "{}", n),
            MetadataValue::Float(x) => write!(f, "{}", x),
            MetadataValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Integer(i64::from(value))
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Integer(i64::from(value))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Boolean(value)
    }
}

/// Ordered string-keyed map with case-insensitive keys.
///
/// The first spelling of a key is the one reported by [`Metadata::iter`];
/// later writes under any casing replace the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    // folded key -> (key as first written, value)
    entries: IndexMap<String, (String, MetadataValue)>,
}

fn fold_key(key: &str) -> String {
    key.to_lowercase()
}

impl Metadata {
    /// Create an empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a value, returning the previous value stored under the same key
    /// (compared case-insensitively).
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Metadata;
    ///
    /// let mut meta = Metadata::new();
    /// assert!(meta.insert("User", "alice").is_none());
    /// assert!(meta.insert("user", "bob").is_some());
    /// assert_eq!(meta.iter().next().map(|(k, _)| k), Some("User"));
    /// ```
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&fold_key(&key)) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(fold_key(&key), (key, value));
                None
            }
        }
    }

    /// Look up a value by key, ignoring case.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(&fold_key(key)).map(|(_, v)| v)
    }

    /// Returns `true` if the key is present, ignoring case.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold_key(key))
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every entry of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Metadata) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Copy only the entries of `other` whose keys are absent from `self`.
    pub fn merge_missing(&mut self, other: &Metadata) {
        for (key, value) in other.iter() {
            if !self.contains_key(key) {
                self.insert(key, value.clone());
            }
        }
    }
}

impl Semigroup for Metadata {
    fn combine(mut self, other: Self) -> Self {
        self.merge(&other);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Metadata::new();
        for (k, v) in iter {
            meta.insert(k, v);
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut meta = Metadata::new();
        meta.insert("TraceId", "t-1");

        assert!(meta.contains_key("traceid"));
        assert!(meta.contains_key("TRACEID"));
        assert_eq!(meta.get("traceId"), Some(&MetadataValue::from("t-1")));
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut meta = Metadata::new();
        meta.insert("a", 1);
        meta.insert("b", 2);
        let previous = meta.insert("A", 3);

        assert_eq!(previous, Some(MetadataValue::Integer(1)));
        let entries: Vec<_> = meta.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), MetadataValue::Integer(3)),
                ("b".to_string(), MetadataValue::Integer(2)),
            ]
        );
    }

    #[test]
    fn test_merge_overwrites() {
        let mut left: Metadata = [("k", "old"), ("x", "1")].into_iter().collect();
        let right: Metadata = [("K", "new")].into_iter().collect();
        left.merge(&right);

        assert_eq!(left.get("k"), Some(&MetadataValue::from("new")));
        assert_eq!(left.len(), 2);
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut left: Metadata = [("k", "mine")].into_iter().collect();
        let right: Metadata = [("K", "theirs"), ("other", "1")].into_iter().collect();
        left.merge_missing(&right);

        assert_eq!(left.get("k"), Some(&MetadataValue::from("mine")));
        assert_eq!(left.get("other"), Some(&MetadataValue::from("1")));
    }

    #[test]
    fn test_combine_is_associative() {
        let a: Metadata = [("k", 1)].into_iter().collect();
        let b: Metadata = [("k", 2), ("j", 1)].into_iter().collect();
        let c: Metadata = [("J", 3)].into_iter().collect();

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));
        assert_eq!(left, right);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(MetadataValue::from("x").to_string(), "x");
        assert_eq!(MetadataValue::from(7).to_string(), "7");
        assert_eq!(MetadataValue::from(true).to_string(), "true");
        assert_eq!(MetadataValue::from(1.5).to_string(), "1.5");
    }
}
