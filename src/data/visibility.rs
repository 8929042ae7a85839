//! Shown/hidden flags per sample, keyed by logical name.
//!
//! Flags are not tied to a category: hiding `sample1` while looking at RMSD keeps
//! it hidden after switching to gyration.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    flags: BTreeMap<String, bool>,
}

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names never seen before count as visible.
    pub fn is_visible(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(true)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) {
        self.flags.insert(name.to_string(), visible);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self, name: &str) -> bool {
        let next = !self.is_visible(name);
        self.set_visible(name, next);
        next
    }

    /// Register unseen names as visible. Known names keep their flag.
    pub fn ensure_known<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.flags.entry(name.to_string()).or_insert(true);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
