use super::{UnusedReport, UnusedResource};
use serde::Serialize;

/// JSON reporter for programmatic output
pub struct JsonReporter;

impl JsonReporter {
    pub fn render(report: &UnusedReport) -> String {
        let json = JsonReport {
            version: "1.0",
            total_resources: report.total_resources,
            unused_count: report.unused.len(),
            unused: &report.unused,
        };
        // Plain strings and integers always serialize
        let mut out = serde_json::to_string_pretty(&json).unwrap_or_default();
        out.push('\n');
        out
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_resources: usize,
    unused_count: usize,
    unused: &'a [UnusedResource],
}
