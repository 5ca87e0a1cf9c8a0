use super::UnusedReport;
use crate::discovery::FileStats;
use crate::error::FileReadError;
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// Everything the console summary needs to know about a run
pub struct RunSummary<'a> {
    pub stats: FileStats,
    pub report: &'a UnusedReport,
    pub failures: &'a [FileReadError],
    pub elapsed: Duration,
    pub output_path: &'a Path,
}

/// Console summary with colored output
pub struct TerminalReporter {
    /// Also list each unused resource on the console
    show_unused: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_unused: false }
    }

    pub fn with_unused(mut self, show: bool) -> Self {
        self.show_unused = show;
        self
    }

    pub fn report(&self, summary: &RunSummary<'_>) {
        let report = summary.report;

        println!();
        println!(
            "{}",
            format!(
                "Analyzed {} files ({} generic, {} script) and {} resources in {} ms.",
                summary.stats.total(),
                summary.stats.generic_files,
                summary.stats.script_files,
                report.total_resources,
                summary.elapsed.as_millis()
            )
            .dimmed()
        );

        if report.unused.is_empty() {
            println!("{}", "No unused resources found!".green().bold());
        } else {
            println!(
                "{}",
                format!("Found {} unused resources", report.unused.len())
                    .yellow()
                    .bold()
            );
            if self.show_unused {
                for resource in &report.unused {
                    println!(
                        "  {} {}, {}",
                        "○".dimmed(),
                        resource.resource_type.cyan(),
                        resource.name
                    );
                }
            }
        }

        if !summary.failures.is_empty() {
            println!();
            println!(
                "{}",
                format!(
                    "⚠ {} files could not be read and were treated as containing no references:",
                    summary.failures.len()
                )
                .yellow()
            );
            for failure in summary.failures {
                println!("  {} {}", "→".dimmed(), failure);
            }
        }

        println!(
            "Unused resources list saved in {}",
            summary.output_path.display().to_string().cyan()
        );
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
