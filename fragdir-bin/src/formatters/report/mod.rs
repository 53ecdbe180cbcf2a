mod json;
mod markdown;
mod plain;

pub(crate) use json::Json;
pub(crate) use markdown::Markdown;
pub(crate) use plain::Plain;

use crate::process::Report;
use anyhow::Result;

pub(crate) trait ReportFormatter {
    /// Format the reports of all inputs for stdout
    fn format(&self, reports: &[Report]) -> Result<String>;
}
