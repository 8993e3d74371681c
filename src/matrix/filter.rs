//! Runtime matrix filter, built from repeated `-m` tokens.
//!
//! Token shapes:
//!   key=value   => match (allow-list per key, OR within a key)
//!   key!=value  => ignore (exact veto pair)
//!
//! Anything else is dropped.

use crate::matrix::{DimensionSet, Entry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    matches: DimensionSet,
    ignores: Vec<(String, String)>,
}

impl Filter {
    /// Parse CLI tokens left to right. `!=` is checked first since it
    /// contains `=`.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Filter::default();
        for token in tokens {
            let token = token.as_ref();
            if let Some((k, v)) = token.split_once("!=") {
                filter.add_ignore(k, v);
            } else if let Some((k, v)) = token.split_once('=') {
                filter.add_match(k, v);
            }
        }
        filter
    }

    pub fn add_match(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.matches
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    pub fn add_ignore(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ignores.push((key.into(), value.into()));
    }

    pub fn matches(&self) -> &DimensionSet {
        &self.matches
    }

    pub fn ignores(&self) -> &[(String, String)] {
        &self.ignores
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.ignores.is_empty()
    }

    /// Collapse the match lists into one entry, one value per key.
    ///
    /// Returns None when some key carries more than one value, since picking
    /// one of them would silently drop the rest.
    pub fn as_entry(&self) -> Option<Entry> {
        let mut out = Entry::default();
        for (k, values) in &self.matches {
            if values.len() > 1 {
                return None;
            }
            let v = values.first().cloned().unwrap_or_default();
            out.0.insert(k.clone(), v);
        }
        Some(out)
    }
}
