//! Text output formatter

use std::path::Path;

use typolens_core::{PatternRule, ScanResult};

/// Prints one line per occurrence with 1-based `line:column` bounds.
pub fn output_text(path: &Path, rule: &PatternRule, result: &ScanResult) {
    if result.is_empty() {
        println!("No occurrences found in {}", path.display());
        return;
    }

    println!("{}:", path.display());
    for decoration in &result.decorations {
        println!(
            "  {}:{}-{}:{} [{}]: {}",
            decoration.start.line + 1,
            decoration.start.character + 1,
            decoration.end.line + 1,
            decoration.end.character + 1,
            rule.id(),
            decoration.hover_message
        );
    }

    if let Some(summary) = result.summary(rule) {
        println!();
        println!("{}", summary);
    }
    println!("Found {} occurrence(s)", result.decorations.len());
}
