mod json;
mod terminal;
mod text;

pub use json::JsonReporter;
pub use terminal::{RunSummary, TerminalReporter};
pub use text::TextReporter;

use crate::catalog::FinalizedCatalog;
use crate::error::WriteError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// One `type, name` line per unused resource
    #[default]
    Text,
    Json,
}

/// A resource never referenced by any scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
}

/// Unused resources in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedReport {
    pub total_resources: usize,
    pub unused: Vec<UnusedResource>,
}

impl UnusedReport {
    /// Collect every entry with no recorded match, preserving catalog order
    pub fn build(catalog: &FinalizedCatalog) -> Self {
        Self {
            total_resources: catalog.len(),
            unused: catalog
                .entries()
                .iter()
                .filter(|entry| !entry.is_used())
                .map(|entry| UnusedResource {
                    resource_type: entry.resource_type.clone(),
                    name: entry.name.clone(),
                })
                .collect(),
        }
    }
}

/// Writes the unused resource report to a file
pub struct Reporter {
    format: ReportFormat,
    output_path: PathBuf,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: PathBuf) -> Self {
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Render and persist the report
    pub fn report(&self, report: &UnusedReport) -> Result<(), WriteError> {
        let rendered = match self.format {
            ReportFormat::Text => TextReporter::render(report),
            ReportFormat::Json => JsonReporter::render(report),
        };

        std::fs::write(&self.output_path, rendered).map_err(|source| WriteError {
            path: self.output_path.clone(),
            source,
        })
    }
}
