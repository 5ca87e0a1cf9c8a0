//! Resource catalog
//!
//! The catalog holds the ordered resource entries for one run. During the scan
//! phase workers share it by reference and record matches through per-entry
//! atomic counters; [`Catalog::finalize`] then consumes it into a plain,
//! read-only [`FinalizedCatalog`].

mod loader;

pub use loader::load_catalog;

use std::sync::atomic::{AtomicUsize, Ordering};

/// A localized resource key
#[derive(Debug)]
pub struct ResourceEntry {
    /// Resource category (e.g. "Cart")
    pub resource_type: String,
    /// Resource name within the category (e.g. "AddItem")
    pub name: String,
    matches: AtomicUsize,
}

impl ResourceEntry {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            matches: AtomicUsize::new(0),
        }
    }

    /// Number of recorded matches so far
    pub fn match_count(&self) -> usize {
        self.matches.load(Ordering::Relaxed)
    }

    pub fn is_matched(&self) -> bool {
        self.match_count() > 0
    }
}

/// Ordered collection of resource entries with shared match state
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<ResourceEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<ResourceEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Lazily yield `(index, entry)` for entries that have not matched yet.
    ///
    /// Each entry is checked when the iterator reaches it, so matches recorded
    /// by other workers mid-iteration are picked up.
    pub fn pending(&self) -> impl Iterator<Item = (usize, &ResourceEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_matched())
    }

    /// Record that `entry` was found in a file.
    ///
    /// Safe to call from any number of workers at once; the increment is a
    /// single atomic operation so no update is lost.
    pub fn record_match(&self, entry: &ResourceEntry) {
        // The scan barrier (thread join) orders these writes before any read of the final state
        entry.matches.fetch_add(1, Ordering::Relaxed);
    }

    /// End the scan phase and freeze the match state
    pub fn finalize(self) -> FinalizedCatalog {
        FinalizedCatalog {
            entries: self
                .entries
                .into_iter()
                .map(|entry| ResourceUsage {
                    resource_type: entry.resource_type,
                    name: entry.name,
                    matches: entry.matches.into_inner(),
                })
                .collect(),
        }
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(resource_type, name)| ResourceEntry::new(resource_type, name))
                .collect(),
        )
    }
}

/// A resource entry after scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUsage {
    pub resource_type: String,
    pub name: String,
    pub matches: usize,
}

impl ResourceUsage {
    pub fn is_used(&self) -> bool {
        self.matches > 0
    }
}

/// Read-only catalog state once all workers have finished
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizedCatalog {
    entries: Vec<ResourceUsage>,
}

impl FinalizedCatalog {
    pub fn entries(&self) -> &[ResourceUsage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn used_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_used()).count()
    }
}
