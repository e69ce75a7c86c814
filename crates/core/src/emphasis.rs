//! Inline emphasis parsing.
//!
//! The LLM marks emphasis with Markdown-style `**bold**` and `*italic*`
//! spans. This module splits a line into formatted runs; it never fails on
//! malformed markup — unterminated markers simply pass through as text.

use crate::normalize::strip_step_marker;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the next bold or italic span. Group 2 captures bold text,
/// group 3 italic text; the alternation keeps spans non-overlapping and
/// left-to-right.
static EMPHASIS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*\*(.*?)\*\*|\*(.*?)\*)").unwrap());

/// A contiguous span of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// The span text with markers removed.
    pub text: String,

    /// Whether the span was marked `**bold**`.
    pub bold: bool,

    /// Whether the span was marked `*italic*`.
    pub italic: bool,
}

impl TextRun {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }
}

/// Split a line into styled runs.
///
/// A leading step marker (">> ") is stripped before parsing. Text outside
/// emphasis spans becomes plain runs; empty spans (`****`, `**`) emit no run.
/// Concatenating the returned run texts reproduces the input minus markers.
pub fn runs(text: &str) -> Vec<TextRun> {
    let text = strip_step_marker(text);
    let mut out = Vec::new();
    let mut last_end = 0;

    for captures in EMPHASIS_REGEX.captures_iter(text) {
        let span = captures.get(1).expect("group 1 always participates");

        if span.start() > last_end {
            out.push(TextRun::plain(&text[last_end..span.start()]));
        }

        if let Some(bold) = captures.get(2) {
            if !bold.as_str().is_empty() {
                out.push(TextRun::bold(bold.as_str()));
            }
        } else if let Some(italic) = captures.get(3) {
            if !italic.as_str().is_empty() {
                out.push(TextRun::italic(italic.as_str()));
            }
        }

        last_end = span.end();
    }

    if last_end < text.len() {
        out.push(TextRun::plain(&text[last_end..]));
    }

    out
}
