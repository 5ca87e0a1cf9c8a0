//! Parallel scan of source files against the resource catalog
//!
//! The file list is split once into contiguous, near-equal partitions, one per
//! worker. Workers share the catalog by reference and only write to it through
//! its atomic per-entry match counters.

mod coordinator;
mod partition;

pub use coordinator::{ScanCoordinator, ScanOutcome, ScanPhase};
pub use partition::partition;
