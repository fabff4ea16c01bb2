//! JSON output formatter

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use typolens_core::{PatternRule, ScanResult};

pub fn output_json(path: &Path, rule: &PatternRule, result: &ScanResult) -> Result<()> {
    let output = serde_json::json!({
        "path": path.display().to_string(),
        "rule": rule.id(),
        "decorations": result.decorations,
        "summary": result.summary(rule),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
