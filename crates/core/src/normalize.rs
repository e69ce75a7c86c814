//! Bullet content normalization.
//!
//! Flattens the nested bullet tree into ordered (text, depth) pairs and
//! cleans up artifacts the upstream LLM leaves in headings and step lists.

use crate::types::{BulletNode, FlatBullet};
use regex::Regex;
use std::sync::LazyLock;

/// Prefix marking an item as a process step, e.g. ">> Collect data".
pub const STEP_MARKER: &str = ">> ";

/// Regex matching a "Slide N:" prefix on a heading.
static SLIDE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^slide[ ]+\d+:").unwrap());

/// Remove a leading "Slide N:" prefix from a heading, if present.
///
/// The LLM numbers headings even when asked not to; the number is noise in
/// a rendered title.
pub fn strip_slide_number(heading: &str) -> &str {
    match SLIDE_NUMBER_REGEX.find(heading) {
        Some(m) => heading[m.end()..].trim_start(),
        None => heading,
    }
}

/// Remove the step marker prefix from an item, if present.
pub fn strip_step_marker(text: &str) -> &str {
    text.strip_prefix(STEP_MARKER).unwrap_or(text)
}

/// Flatten a bullet tree into an ordered list of (text, depth) pairs.
///
/// Leaves emit one entry at their depth; groups recurse one level deeper;
/// empty groups emit nothing. Column pairs are the double-column renderer's
/// concern and emit nothing here — each column's own bullets are flattened
/// independently when that layout renders.
pub fn flatten(node: &BulletNode) -> Vec<FlatBullet> {
    let mut out = Vec::new();
    match node {
        BulletNode::Leaf(text) => out.push(FlatBullet::new(text.clone(), 0)),
        BulletNode::Group(children) => flatten_into(children, 0, &mut out),
        BulletNode::ColumnPair(..) => {}
    }
    out
}

fn flatten_into(children: &[BulletNode], level: usize, out: &mut Vec<FlatBullet>) {
    for child in children {
        match child {
            BulletNode::Leaf(text) => out.push(FlatBullet::new(text.clone(), level)),
            BulletNode::Group(nested) => flatten_into(nested, level + 1, out),
            BulletNode::ColumnPair(..) => {}
        }
    }
}
