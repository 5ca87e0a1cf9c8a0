use super::UnusedReport;

/// Plain-text report, one `type, name` line per unused resource
pub struct TextReporter;

impl TextReporter {
    pub fn render(report: &UnusedReport) -> String {
        let mut out = String::new();
        for resource in &report.unused {
            out.push_str(&resource.resource_type);
            out.push_str(", ");
            out.push_str(&resource.name);
            out.push('\n');
        }
        out
    }
}
