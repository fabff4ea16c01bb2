//! Pattern rules.

use regex::{Regex, RegexBuilder};

use crate::error::ScanError;
use crate::template::MessageTemplate;

/// Identifier of the built-in rule.
pub const BUILTIN_RULE_ID: &str = "hieght";

const BUILTIN_PATTERN: &str = "hieght";
const BUILTIN_HOVER: &str = "Did you mean height?";
const BUILTIN_POPUP: &str = "using hieght instead of height";

/// A case-insensitive pattern with its hover and popup messages.
#[derive(Debug, Clone)]
pub struct PatternRule {
    id: String,
    regex: Regex,
    hover: MessageTemplate,
    popup: MessageTemplate,
}

impl PatternRule {
    /// Compiles a rule. The pattern always matches case-insensitively.
    pub fn new(
        id: impl Into<String>,
        pattern: &str,
        hover: &str,
        popup: &str,
    ) -> Result<Self, ScanError> {
        let id = id.into();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ScanError::invalid_pattern(id.clone(), e))?;

        Ok(Self {
            id,
            regex,
            hover: MessageTemplate::parse(hover),
            popup: MessageTemplate::parse(popup),
        })
    }

    /// The built-in `hieght` rule.
    pub fn builtin() -> Result<Self, ScanError> {
        Self::new(BUILTIN_RULE_ID, BUILTIN_PATTERN, BUILTIN_HOVER, BUILTIN_POPUP)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn hover(&self) -> &MessageTemplate {
        &self.hover
    }

    pub fn popup(&self) -> &MessageTemplate {
        &self.popup
    }

    /// Returns true if the pattern defines at least one capture group.
    pub fn has_captures(&self) -> bool {
        self.regex.captures_len() > 1
    }
}
