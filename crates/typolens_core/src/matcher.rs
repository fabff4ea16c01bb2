//! Pattern matching over document text.

use serde::Serialize;
use tracing::debug;

use crate::planner::{DecorationSpan, plan};
use crate::rule::PatternRule;

/// A located occurrence of a rule's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Start byte offset.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
    /// The matched text.
    pub text: String,
    /// Capture groups 1..N. `None` when the group did not participate.
    pub captures: Vec<Option<String>>,
}

impl Match {
    /// End byte offset (exclusive).
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Returns the first capture group, if it participated in the match.
    pub fn first_capture(&self) -> Option<&str> {
        self.captures.first().and_then(|c| c.as_deref())
    }

    /// Looks up group `index` (0 is the whole match).
    ///
    /// Returns `None` when the pattern does not define the group and
    /// `Some(None)` when the group is defined but did not participate.
    pub fn group(&self, index: usize) -> Option<Option<&str>> {
        if index == 0 {
            return Some(Some(self.text.as_str()));
        }
        self.captures.get(index - 1).map(|c| c.as_deref())
    }
}

/// Finds all non-overlapping occurrences of the rule's pattern in `text`.
pub fn find_matches(rule: &PatternRule, text: &str) -> Vec<Match> {
    let mut matches = Vec::new();

    for caps in rule.regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let captures = (1..caps.len())
            .map(|i| caps.get(i).map(|g| g.as_str().to_string()))
            .collect();

        matches.push(Match {
            offset: whole.start(),
            length: whole.len(),
            text: whole.as_str().to_string(),
            captures,
        });
    }

    matches
}

/// The outcome of scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// One decoration per occurrence, in document order.
    pub decorations: Vec<DecorationSpan>,
    /// First capture group of each occurrence.
    pub captured: Vec<Option<String>>,
    /// 1-based line of the first occurrence.
    pub first_line: Option<u32>,
}

impl ScanResult {
    /// Returns true if the scan found nothing.
    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Formats the advisory message, or `None` if nothing was found.
    pub fn summary(&self, rule: &PatternRule) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let line = self.first_line?;
        let message = rule
            .popup()
            .render_joined(&self.captured, rule.has_captures());
        Some(format!("Line {}: {}", line, message))
    }
}

/// Scans `text` with `rule` and plans decorations for every occurrence.
pub fn scan(rule: &PatternRule, text: &str) -> ScanResult {
    let matches = find_matches(rule, text);
    debug!(
        "Rule '{}' found {} occurrence(s) in {} bytes",
        rule.id(),
        matches.len(),
        text.len()
    );

    let captured = matches
        .iter()
        .map(|m| m.first_capture().map(str::to_string))
        .collect();

    let decorations = plan(rule, text, &matches);
    let first_line = decorations.first().map(|d| d.start.line + 1);

    ScanResult {
        decorations,
        captured,
        first_line,
    }
}
