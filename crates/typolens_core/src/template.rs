//! Message templates with capture placeholders.
//!
//! A template is parsed once into literal text and placeholders:
//!
//! - `${match[N]}`: capture group `N` of the current occurrence
//!   (`N = 0` is the whole match).
//! - `${errors.join(", ")}`: the first capture group of every occurrence,
//!   joined with `", "`.
//!
//! Placeholders that cannot be resolved are rendered as their literal source
//! text.

use crate::matcher::Match;

const PLACEHOLDER_OPEN: &str = "${";
const CAPTURE_PREFIX: &str = "${match[";
const CAPTURE_SUFFIX: &str = "]}";
const JOINED_PLACEHOLDER: &str = "${errors.join(\", \")}";
const JOIN_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture { index: usize, raw: String },
    Joined,
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parses a template string.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(pos) = rest.find(PLACEHOLDER_OPEN) {
            literal.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(after) = rest.strip_prefix(JOINED_PLACEHOLDER) {
                flush(&mut literal, &mut segments);
                segments.push(Segment::Joined);
                rest = after;
            } else if let Some((index, raw_len)) = parse_capture(rest) {
                flush(&mut literal, &mut segments);
                segments.push(Segment::Capture {
                    index,
                    raw: rest[..raw_len].to_string(),
                });
                rest = &rest[raw_len..];
            } else {
                literal.push_str(PLACEHOLDER_OPEN);
                rest = &rest[PLACEHOLDER_OPEN.len()..];
            }
        }

        literal.push_str(rest);
        flush(&mut literal, &mut segments);

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// Returns the unparsed template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders the template for a single occurrence.
    ///
    /// `${errors.join(", ")}` has no meaning per occurrence and stays literal.
    pub fn render_match(&self, m: &Match) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Capture { index, raw } => match m.group(*index) {
                    Some(value) => out.push_str(value.unwrap_or_default()),
                    None => out.push_str(raw),
                },
                Segment::Joined => out.push_str(JOINED_PLACEHOLDER),
            }
        }
        out
    }

    /// Renders the template once for a whole scan.
    ///
    /// `values` holds the first capture of each occurrence. When the pattern
    /// defines no capture group the joined placeholder stays literal.
    pub fn render_joined(&self, values: &[Option<String>], has_captures: bool) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Capture { raw, .. } => out.push_str(raw),
                Segment::Joined if has_captures => {
                    let joined = values
                        .iter()
                        .map(|v| v.as_deref().unwrap_or_default())
                        .collect::<Vec<_>>()
                        .join(JOIN_SEPARATOR);
                    out.push_str(&joined);
                }
                Segment::Joined => out.push_str(JOINED_PLACEHOLDER),
            }
        }
        out
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Parses `${match[N]}` at the start of `input`, returning `N` and the
/// placeholder's byte length.
fn parse_capture(input: &str) -> Option<(usize, usize)> {
    let digits_and_rest = input.strip_prefix(CAPTURE_PREFIX)?;
    let digits_len = digits_and_rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 || !digits_and_rest[digits_len..].starts_with(CAPTURE_SUFFIX) {
        return None;
    }
    let index = digits_and_rest[..digits_len].parse().ok()?;
    Some((
        index,
        CAPTURE_PREFIX.len() + digits_len + CAPTURE_SUFFIX.len(),
    ))
}
