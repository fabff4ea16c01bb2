//! # typolens_core
//!
//! Host-independent core of typolens.
//!
//! This crate provides:
//! - Pattern rules and their message templates
//! - Scanning document text for occurrences
//! - Planning line/column decorations for each occurrence
//!
//! ## Example
//!
//! ```rust
//! use typolens_core::{PatternRule, scan};
//!
//! let rule = PatternRule::builtin().unwrap();
//! let result = scan(&rule, "hieght: 10px; height: 20px;");
//!
//! assert_eq!(result.decorations.len(), 1);
//! assert_eq!(
//!     result.summary(&rule).as_deref(),
//!     Some("Line 1: using hieght instead of height")
//! );
//! ```

mod error;
mod matcher;
mod planner;
mod rule;
mod style;
mod template;

use std::path::Path;

pub use error::ScanError;
pub use matcher::{Match, ScanResult, find_matches, scan};
pub use planner::{DecorationSpan, Position, offset_to_position, plan};
pub use rule::{BUILTIN_RULE_ID, PatternRule};
pub use style::{DecorationStyle, OverviewRulerLane, ThemableStyle};
pub use template::MessageTemplate;

/// Reads a file and scans its contents.
pub fn scan_file(rule: &PatternRule, path: &Path) -> Result<ScanResult, ScanError> {
    let text = std::fs::read_to_string(path)?;
    Ok(scan(rule, &text))
}
