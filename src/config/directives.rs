//! Profile directive lookup.
//!
//! The resolver never parses profile text. It only asks for the raw argument
//! strings of a directive by name, through [`DirectiveLookup`].

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Lookup-by-name over parsed profile directives.
///
/// Each occurrence of a directive contributes one raw argument string, in
/// profile order. Flag directives such as `persist-tun` contribute an empty
/// string.
pub trait DirectiveLookup {
    /// Every occurrence of `name`, in profile order.
    fn occurrences(&self, name: &str) -> &[String];

    /// The last occurrence of `name`, which wins for single-valued
    /// directives.
    fn last(&self, name: &str) -> Option<&str> {
        self.occurrences(name).last().map(String::as_str)
    }

    /// Returns `true` if the directive appears at least once.
    fn contains(&self, name: &str) -> bool {
        !self.occurrences(name).is_empty()
    }
}

impl DirectiveLookup for IndexMap<String, Vec<String>> {
    fn occurrences(&self, name: &str) -> &[String] {
        self.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Ordered, multi-valued directive map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDirectives {
    entries: IndexMap<String, Vec<String>>,
}

impl ProfileDirectives {
    /// Creates an empty directive map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(name, argument)` pairs in profile order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut out = Self::new();
        for (name, value) in pairs {
            out.push(name, value);
        }
        out
    }

    /// Appends one occurrence of a directive.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        self.entries
            .entry(name.trim().to_string())
            .or_default()
            .push(value.trim().to_string());
    }

    /// Appends every occurrence in `other` after the existing entries.
    pub fn append(&mut self, other: &Self) {
        for (name, values) in &other.entries {
            self.entries
                .entry(name.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }

    /// Number of distinct directive names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no directives are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct directive names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl DirectiveLookup for ProfileDirectives {
    fn occurrences(&self, name: &str) -> &[String] {
        self.entries.occurrences(name)
    }
}

/// Splits a raw argument string into whitespace-separated tokens.
#[must_use]
pub fn tokens(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

// ============================================================================
// Deserialization
// ============================================================================

/// A YAML scalar directive argument.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl RawScalar {
    fn into_argument(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            // Debug keeps the fraction, so `1.0` stays `1.0`
            Self::Float(f) => format!("{f:?}"),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One directive in a YAML profile: a flag, one argument, or repeated
/// occurrences.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Flag(()),
    One(RawScalar),
    Many(Vec<Option<RawScalar>>),
}

impl<'de> Deserialize<'de> for ProfileDirectives {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: IndexMap<String, RawEntry> = IndexMap::deserialize(deserializer)?;
        let mut out = Self::new();
        for (name, entry) in raw {
            match entry {
                RawEntry::Flag(()) => out.push(name, ""),
                RawEntry::One(v) => out.push(name, v.into_argument()),
                RawEntry::Many(values) => {
                    for v in values {
                        out.push(
                            name.as_str(),
                            v.map_or_else(String::new, RawScalar::into_argument),
                        );
                    }
                }
            }
        }
        Ok(out)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_occurrence_wins() {
        let d = ProfileDirectives::from_pairs([("proto", "udp"), ("proto", "tcp")]);
        assert_eq!(d.last("proto"), Some("tcp"));
        assert_eq!(d.occurrences("proto").len(), 2);
    }

    #[test]
    fn test_missing_directive() {
        let d = ProfileDirectives::new();
        assert!(d.occurrences("remote").is_empty());
        assert_eq!(d.last("remote"), None);
        assert!(!d.contains("remote"));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut d = ProfileDirectives::from_pairs([("remote", "a.example 1194 udp")]);
        let settings =
            ProfileDirectives::from_pairs([("remote", "b.example 443 tcp"), ("persist-tun", "")]);
        d.append(&settings);
        assert_eq!(
            d.occurrences("remote"),
            ["a.example 1194 udp".to_string(), "b.example 443 tcp".to_string()]
        );
        assert!(d.contains("persist-tun"));
        let names: Vec<_> = d.names().collect();
        assert_eq!(names, vec!["remote", "persist-tun"]);
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("  vpn.example.com  1194\tudp "), vec!["vpn.example.com", "1194", "udp"]);
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_deserialize_yaml_shapes() {
        let yaml = r"
remote:
  - vpn1.example.com 1194 udp
  - vpn2.example.com 443 tcp
persist-tun:
key-direction: 1
tls-version-min: 1.2
comp-lzo: no
";
        let d: ProfileDirectives = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(d.occurrences("remote").len(), 2);
        assert_eq!(d.last("persist-tun"), Some(""));
        assert_eq!(d.last("key-direction"), Some("1"));
        assert_eq!(d.last("tls-version-min"), Some("1.2"));
        assert_eq!(d.last("comp-lzo"), Some("no"));
    }

    #[test]
    fn test_deserialize_float_keeps_fraction() {
        let d: ProfileDirectives = serde_yaml::from_str("tls-version-min: 1.0").unwrap();
        assert_eq!(d.last("tls-version-min"), Some("1.0"));
    }

    #[test]
    fn test_indexmap_lookup() {
        let mut m: IndexMap<String, Vec<String>> = IndexMap::new();
        m.insert("proto".to_string(), vec!["udp".to_string()]);
        assert_eq!(DirectiveLookup::last(&m, "proto"), Some("udp"));
        assert!(m.occurrences("remote").is_empty());
    }
}
