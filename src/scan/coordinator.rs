use super::partition::partition;
use crate::catalog::{Catalog, FinalizedCatalog};
use crate::discovery::SourceFile;
use crate::error::{FileReadError, SetupError};
use crate::matching::RuleSet;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Lifecycle of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Partitioning,
    Scanning,
    Aggregated,
    Done,
}

/// Result of a completed scan
#[derive(Debug)]
pub struct ScanOutcome {
    /// Final match state of every resource entry
    pub catalog: FinalizedCatalog,
    /// Files whose contents were tested
    pub files_scanned: usize,
    /// Files that could not be read and contributed no matches
    pub failures: Vec<FileReadError>,
    pub elapsed: Duration,
}

/// Runs match rules over source files on a fixed pool of workers
pub struct ScanCoordinator {
    workers: usize,
    phase: ScanPhase,
    progress: Option<ProgressBar>,
}

impl ScanCoordinator {
    pub fn new(workers: usize) -> Result<Self, SetupError> {
        if workers == 0 {
            return Err(SetupError::InvalidWorkerCount { count: workers });
        }
        Ok(Self {
            workers,
            phase: ScanPhase::Idle,
            progress: None,
        })
    }

    /// Advance a progress bar by one for every processed file
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Scan `files` against `catalog` and return the frozen result
    pub fn run(&mut self, catalog: Catalog, files: &[SourceFile]) -> Result<ScanOutcome, SetupError> {
        let start = Instant::now();

        let rules = RuleSet::new(&catalog)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("scan-worker-{}", i))
            .build()
            .map_err(|e| SetupError::ThreadPool {
                reason: e.to_string(),
            })?;

        self.transition(ScanPhase::Partitioning);
        let ranges = partition(files.len(), self.workers);
        debug!(
            "Partitioned {} files into {} ranges: {:?}",
            files.len(),
            ranges.len(),
            ranges
        );

        self.transition(ScanPhase::Scanning);
        info!(
            "Scanning {} files for {} resources with {} workers...",
            files.len(),
            catalog.len(),
            self.workers
        );

        let progress = self.progress.clone();
        // install() returns only after every partition has been processed
        let failures: Vec<FileReadError> = pool.install(|| {
            ranges
                .par_iter()
                .flat_map_iter(|range| {
                    scan_partition(&files[range.clone()], &catalog, &rules, progress.as_ref())
                })
                .collect()
        });
        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }
        self.transition(ScanPhase::Aggregated);

        let catalog = catalog.finalize();
        self.transition(ScanPhase::Done);

        let outcome = ScanOutcome {
            files_scanned: files.len() - failures.len(),
            catalog,
            failures,
            elapsed: start.elapsed(),
        };

        info!(
            "Scan complete: {} of {} resources referenced, {} unreadable files",
            outcome.catalog.used_count(),
            outcome.catalog.len(),
            outcome.failures.len()
        );

        Ok(outcome)
    }

    fn transition(&mut self, next: ScanPhase) {
        debug!("Scan phase: {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// One worker's pass over its partition. Returns the files it could not read.
fn scan_partition(
    files: &[SourceFile],
    catalog: &Catalog,
    rules: &RuleSet,
    progress: Option<&ProgressBar>,
) -> Vec<FileReadError> {
    let mut failures = Vec::new();

    for file in files {
        match file.read_contents() {
            Ok(content) => {
                let rule = rules.for_class(file.class);
                let prepared = rule.prepare(&content);
                let mut found = 0;
                for (index, entry) in catalog.pending() {
                    if rule.matches(&prepared, index) {
                        catalog.record_match(entry);
                        found += 1;
                    }
                }
                trace!("{}: {} new matches", file.path.display(), found);
            }
            Err(e) => {
                warn!("{}", e);
                failures.push(e);
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    failures
}
