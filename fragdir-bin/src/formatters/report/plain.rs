use anyhow::Result;

use super::ReportFormatter;
use crate::process::Report;

/// One normalized URL or `#:~:` fragment per successful input.
/// Failed inputs are reported through the logger only.
pub(crate) struct Plain;

impl Plain {
    pub(crate) const fn new() -> Self {
        Self {}
    }
}

impl ReportFormatter for Plain {
    fn format(&self, reports: &[Report]) -> Result<String> {
        Ok(reports
            .iter()
            .filter_map(Report::output)
            .map(|output| format!("{output}\n"))
            .collect())
    }
}
