//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use typolens_core::{DecorationSpan, Position as TypolensPosition};

use crate::host::DecorationOptions;

/// Diagnostic source reported to the client.
pub const DIAGNOSTIC_SOURCE: &str = "typolens";

/// Converts a core position to an LSP position.
pub fn to_lsp_position(pos: TypolensPosition) -> Position {
    Position::new(pos.line, pos.character)
}

/// Converts a decoration's bounds to an LSP range.
pub fn to_lsp_range(span: &DecorationSpan) -> Range {
    Range::new(to_lsp_position(span.start), to_lsp_position(span.end))
}

/// Converts a decoration to an informational LSP diagnostic.
pub fn to_lsp_diagnostic(span: &DecorationSpan, rule_id: &str) -> Diagnostic {
    Diagnostic {
        range: to_lsp_range(span),
        severity: Some(DiagnosticSeverity::INFORMATION),
        code: Some(NumberOrString::String(rule_id.to_string())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: span.hover_message.clone(),
        ..Default::default()
    }
}

/// Converts a decoration to the payload of `typolens/setDecorations`.
pub fn to_decoration_options(span: &DecorationSpan) -> DecorationOptions {
    DecorationOptions {
        range: to_lsp_range(span),
        hover_message: span.hover_message.clone(),
    }
}
