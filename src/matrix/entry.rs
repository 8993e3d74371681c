//! Matrix entry: one assignment of values to named dimensions.
//!
//! Example: {"arch": "amd64", "kernel": "linux"}
//!
//! Backed by a BTreeMap so every rendering is sorted by key regardless of the
//! order the dimensions were assigned in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(pub BTreeMap<String, String>);

impl Entry {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True if every key in `subset` is present here with the same value.
    ///
    /// An empty subset only matches an empty entry.
    pub fn matches(&self, subset: &Entry) -> bool {
        if subset.is_empty() {
            return self.is_empty();
        }

        subset
            .iter()
            .all(|(k, v)| self.get(k).is_some_and(|own| own == v))
    }

    pub fn matches_kv(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Filter-tuple matching: keys of `tuple` this entry does not carry are
    /// not constraints, the ones it does carry must agree.
    pub fn accepted_by(&self, tuple: &Entry) -> bool {
        tuple
            .iter()
            .all(|(k, v)| self.get(k).is_none_or(|own| own == v))
    }

    /// Values only, sorted by key, joined by `/`.
    pub fn brief(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join("/")
    }

    /// Per-run environment for a task executed under this entry.
    ///
    /// kernel=linux => MATRIX_KERNEL=linux
    pub fn env_vars(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (env_name(k), v.to_string()))
            .collect()
    }
}

fn env_name(key: &str) -> String {
    let upper: String = key
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("MATRIX_{}", upper)
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Entry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(pairs: &[(&str, &str)]) -> Entry {
        pairs.iter().copied().collect()
    }

    #[test]
    fn matches_subset_with_extra_keys() {
        let e = entry(&[("kernel", "linux"), ("arch", "amd64")]);
        assert!(e.matches(&entry(&[("kernel", "linux")])));
        assert!(e.matches(&entry(&[("arch", "amd64"), ("kernel", "linux")])));
        assert!(!e.matches(&entry(&[("kernel", "darwin")])));
        assert!(!e.matches(&entry(&[("kernel", "linux"), ("foo", "a")])));
    }

    #[test]
    fn empty_subset_matches_only_empty_entry() {
        assert!(Entry::default().matches(&Entry::default()));
        assert!(!entry(&[("kernel", "linux")]).matches(&Entry::default()));
    }

    #[test]
    fn matches_kv_requires_present_key() {
        let e = entry(&[("kernel", "linux")]);
        assert!(e.matches_kv("kernel", "linux"));
        assert!(!e.matches_kv("kernel", "windows"));
        assert!(!e.matches_kv("arch", ""));
    }

    #[test]
    fn accepted_by_ignores_missing_keys() {
        let e = entry(&[("a", "a1")]);
        assert!(e.accepted_by(&entry(&[("a", "a1"), ("b", "b")])));
        assert!(!e.accepted_by(&entry(&[("a", "a2"), ("b", "b")])));
    }

    #[test]
    fn equality_is_structural() {
        let a = entry(&[("kernel", "linux"), ("arch", "amd64")]);
        let b = entry(&[("arch", "amd64"), ("kernel", "linux")]);
        assert_eq!(a, b);
        assert_ne!(a, entry(&[("kernel", "linux")]));
    }

    #[test]
    fn renders_sorted_by_key() {
        let e = entry(&[("kernel", "linux"), ("arch", "amd64"), ("foo", "a")]);
        assert_eq!(e.to_string(), "arch: amd64, foo: a, kernel: linux");
        assert_eq!(e.brief(), "amd64/a/linux");
        assert_eq!(Entry::default().to_string(), "");
    }

    #[test]
    fn env_vars_are_prefixed_and_normalized() {
        let e = entry(&[("kernel", "linux"), ("go-version", "1.22")]);
        assert_eq!(
            e.env_vars(),
            vec![
                ("MATRIX_GO_VERSION".to_string(), "1.22".to_string()),
                ("MATRIX_KERNEL".to_string(), "linux".to_string()),
            ]
        );
    }
}
