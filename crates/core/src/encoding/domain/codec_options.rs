use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Codec-private options as string key/value pairs.
///
/// Encoders expose tuning knobs (CRF, presets, profiles) through an untyped
/// option dictionary rather than typed context fields. Opening a codec
/// consumes the keys it recognizes; [`CodecOptions::apply_unconsumed`]
/// records what was left so callers can report rejected or ignored options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodecOptions {
    entries: BTreeMap<String, String>,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces the contents with `leftovers`, the entries a codec did not
    /// consume, and returns the keys that were consumed.
    pub fn apply_unconsumed<I, K, V>(&mut self, leftovers: I) -> Vec<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let remaining: BTreeMap<String, String> = leftovers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let consumed = self
            .entries
            .keys()
            .filter(|k| !remaining.contains_key(*k))
            .cloned()
            .collect();
        self.entries = remaining;
        consumed
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CodecOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_existing_value() {
        let mut opts = CodecOptions::new();
        assert_eq!(opts.set("crf", "23"), None);
        assert_eq!(opts.set("crf", "18"), Some("23".to_string()));
        assert_eq!(opts.get("crf"), Some("18"));
        assert_eq!(opts.len(), 1);
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let opts: CodecOptions = [("tune", "film"), ("crf", "20"), ("preset", "slow")]
            .into_iter()
            .collect();
        let keys: Vec<_> = opts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["crf", "preset", "tune"]);
    }

    #[test]
    fn test_apply_unconsumed_reports_consumed_keys() {
        let mut opts: CodecOptions = [("crf", "23"), ("preset", "fast"), ("bogus", "1")]
            .into_iter()
            .collect();

        let consumed = opts.apply_unconsumed([("bogus", "1")]);

        assert_eq!(consumed, vec!["crf".to_string(), "preset".to_string()]);
        assert_eq!(opts.len(), 1);
        assert_eq!(opts.get("bogus"), Some("1"));
        assert!(!opts.contains_key("crf"));
    }

    #[test]
    fn test_apply_unconsumed_with_nothing_consumed() {
        let mut opts: CodecOptions = [("a", "1")].into_iter().collect();
        let consumed = opts.apply_unconsumed([("a", "1")]);
        assert!(consumed.is_empty());
        assert_eq!(opts.get("a"), Some("1"));
    }

    #[test]
    fn test_apply_unconsumed_with_everything_consumed() {
        let mut opts: CodecOptions = [("a", "1"), ("b", "2")].into_iter().collect();
        let consumed = opts.apply_unconsumed(Vec::<(String, String)>::new());
        assert_eq!(consumed.len(), 2);
        assert!(opts.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let opts: CodecOptions = [("crf", "23")].into_iter().collect();
        assert_eq!(serde_json::to_string(&opts).unwrap(), r#"{"crf":"23"}"#);
    }
}
