use super::MatchRule;
use crate::catalog::{Catalog, ResourceEntry};
use std::borrow::Cow;

/// Dotted accessor references in templates and compiled sources:
/// `{type}ResourceDictionary.{name}`, compared case-insensitively.
pub struct GenericRule {
    /// Lower-cased accessor per catalog entry
    needles: Vec<String>,
}

impl GenericRule {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            needles: catalog
                .entries()
                .iter()
                .map(|entry| Self::accessor(entry).to_lowercase())
                .collect(),
        }
    }

    /// The accessor expression referencing `entry`
    pub fn accessor(entry: &ResourceEntry) -> String {
        format!("{}ResourceDictionary.{}", entry.resource_type, entry.name)
    }
}

impl MatchRule for GenericRule {
    fn prepare<'a>(&self, content: &'a str) -> Cow<'a, str> {
        Cow::Owned(content.to_lowercase())
    }

    fn matches(&self, prepared: &str, index: usize) -> bool {
        self.needles
            .get(index)
            .map(|needle| prepared.contains(needle.as_str()))
            .unwrap_or(false)
    }
}
