//! DeadResources - Fast unused localization resource detection
//!
//! This library finds resource entries (a `type` and `name` pair) that no
//! source file of a project references, so they can be removed safely.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Catalog Loading** - Read the resource entries from a JSON catalog
//! 2. **File Discovery** - Walk the working directory or a git snapshot and
//!    classify files as generic (templates, compiled sources) or script
//! 3. **Scanning** - Match every file against the pending entries on a fixed
//!    pool of workers, recording matches atomically
//! 4. **Reporting** - List entries that never matched, in catalog order

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod matching;
pub mod report;
pub mod scan;

pub use catalog::{load_catalog, Catalog, FinalizedCatalog, ResourceEntry};
pub use config::Config;
pub use discovery::{discover, FileClass, FileClassifier, FileFinder, GitTreeReader, SourceFile};
pub use error::{FileReadError, SetupError, WriteError};
pub use matching::{GenericRule, MatchRule, RuleSet, ScriptRule};
pub use report::{ReportFormat, Reporter, UnusedReport};
pub use scan::{ScanCoordinator, ScanOutcome, ScanPhase};
