//! Ordered attribute set.

/// Attributes of an element, kept in insertion order.
///
/// Setting a key that is already present replaces its value in place: the
/// attribute keeps the position of its first write and the value of its last.
/// Fixed attribute tables in the project document rely on this to override
/// an earlier default further down the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, last writer wins.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_writer_wins_keeps_first_position() {
        let attrs: Attributes = [
            ("Index", "0"),
            ("IsPrinted", "true"),
            ("TreeRefId", "1"),
            ("IsPrinted", "false"),
            ("TreeRefId", "1"),
        ]
        .into_iter()
        .collect();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("IsPrinted"), Some("false"));
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, ["Index", "IsPrinted", "TreeRefId"]);
    }

    #[test]
    fn test_get_missing() {
        let attrs = Attributes::new();
        assert!(attrs.is_empty());
        assert_eq!(attrs.get("Name"), None);
    }
}
