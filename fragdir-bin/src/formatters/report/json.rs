use anyhow::{Context, Result};

use super::ReportFormatter;
use crate::process::Report;

pub(crate) struct Json;

impl Json {
    pub(crate) const fn new() -> Self {
        Self {}
    }
}

impl ReportFormatter for Json {
    /// Format reports as a JSON array
    fn format(&self, reports: &[Report]) -> Result<String> {
        serde_json::to_string_pretty(reports)
            .map(|json| json + "\n")
            .context("Cannot format reports as JSON")
    }
}
