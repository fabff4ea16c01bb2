//! Output formatting module

mod json;
mod text;

use std::path::Path;

use miette::Result;
use typolens_core::{PatternRule, ScanResult};

use crate::cli::OutputFormat;

pub fn output_result(
    path: &Path,
    rule: &PatternRule,
    result: &ScanResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(path, rule, result)?,
        OutputFormat::Text => text::output_text(path, rule, result),
    }
    Ok(())
}
