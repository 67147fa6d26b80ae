//! Outbound peer-info composition.
//!
//! The peer-info map is sent to the server during the handshake. It starts
//! from the builtin identity pairs and layers caller-supplied pairs on top.

use indexmap::IndexMap;
use serde::Serialize;

/// Key carrying the client identity string.
pub const GUI_VERSION_KEY: &str = "IV_GUI_VER";

/// Ordered key/value pairs sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PeerInfo(IndexMap<String, String>);

impl PeerInfo {
    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no pairs are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates pairs in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in transmission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Renders the `KEY=value` lines sent on the wire.
    #[must_use]
    pub fn to_wire_lines(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }
}

impl From<IndexMap<String, String>> for PeerInfo {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a PeerInfo {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Identity pairs every client sends.
#[must_use]
pub fn builtin_identity(gui_version: &str) -> PeerInfo {
    let mut map = IndexMap::with_capacity(1);
    map.insert(GUI_VERSION_KEY.to_string(), gui_version.to_string());
    PeerInfo(map)
}

/// Merges caller pairs over the builtin identity.
///
/// Builtin keys keep their position and take the caller value on collision.
/// Caller-only keys follow in caller order.
#[must_use]
pub fn compose(builtin: &PeerInfo, overrides: &IndexMap<String, String>) -> PeerInfo {
    let mut out = builtin.0.clone();
    for (key, value) in overrides {
        // IndexMap::insert keeps the existing slot for known keys
        out.insert(key.clone(), value.clone());
    }
    PeerInfo(out)
}

/// Caller keys that replace a builtin identity key.
pub fn shadowed_keys<'a>(
    builtin: &'a PeerInfo,
    overrides: &'a IndexMap<String, String>,
) -> impl Iterator<Item = &'a str> {
    builtin
        .keys()
        .filter(move |k| overrides.contains_key(*k))
}

// ============================================================================
// Tests
// ============================================================================
