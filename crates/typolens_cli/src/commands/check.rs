//! Check command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;
use typolens_core::{PatternRule, scan_file};

use crate::cli::OutputFormat;
use crate::output::output_result;

/// Scans one file. Returns true if any occurrence was found.
pub fn run_check(path: &Path, format: OutputFormat) -> Result<bool> {
    let rule = PatternRule::builtin().into_diagnostic()?;

    debug!("Checking {}", path.display());
    let result = scan_file(&rule, path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to check {}", path.display()))?;

    output_result(path, &rule, &result, format)?;

    Ok(!result.is_empty())
}
