use std::fmt::Write;

use anyhow::Result;

use super::ReportFormatter;
use crate::process::{DirectiveReport, Report};

/// A section per input with a table of its directives
pub(crate) struct Markdown;

impl Markdown {
    pub(crate) const fn new() -> Self {
        Self {}
    }
}

/// Escape characters with a meaning inside a Markdown table cell
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('`', "\\`")
}

fn write_directive(out: &mut String, index: usize, directive: &DirectiveReport) -> std::fmt::Result {
    let text = directive.text.as_ref();
    let field = |value: Option<&String>| value.map(|v| escape_cell(v)).unwrap_or_default();

    writeln!(
        out,
        "| {index} | {} | {} | {} | {} | {} |",
        escape_cell(&directive.name),
        field(text.and_then(|t| t.prefix.as_ref())),
        field(text.map(|t| &t.start).or(Some(&directive.value))),
        field(text.and_then(|t| t.end.as_ref())),
        field(text.and_then(|t| t.suffix.as_ref())),
    )
}

impl ReportFormatter for Markdown {
    fn format(&self, reports: &[Report]) -> Result<String> {
        let mut out = String::new();

        for report in reports {
            writeln!(out, "## {}\n", escape_cell(&report.input))?;

            if let Some(error) = &report.error {
                writeln!(out, "Error: {error}\n")?;
                continue;
            }
            if let Some(output) = report.output() {
                writeln!(out, "`{output}`\n")?;
            }
            if report.directives.is_empty() {
                writeln!(out, "No directives\n")?;
                continue;
            }

            writeln!(out, "| # | Name | Prefix | Start / Value | End | Suffix |")?;
            writeln!(out, "|---|------|--------|---------------|-----|--------|")?;
            for (index, directive) in report.directives.iter().enumerate() {
                write_directive(&mut out, index, directive)?;
            }
            writeln!(out)?;
        }

        Ok(out)
    }
}
