//! Layout classification: which of the five slide layouts fits a spec.
//!
//! Predicates are evaluated in strict priority order and the first match
//! wins. That order is a contract: a slide satisfying both the icon-grid
//! and the default shape must render as an icon grid.

use crate::options::LayoutOptions;
use deckgen_core::{SlideSpec, TableSpec, STEP_MARKER};
use regex::Regex;
use std::sync::LazyLock;

/// Layout index of the title slide layout.
pub const TITLE_LAYOUT: usize = 0;
/// Layout index of the title-and-body layout.
pub const BODY_LAYOUT: usize = 1;
/// Layout index of the two-column comparison layout.
pub const COMPARISON_LAYOUT: usize = 4;
/// Layout index of the title-only layout.
pub const TITLE_ONLY_LAYOUT: usize = 5;
/// Layout index of the picture-with-caption layout.
pub const PICTURE_LAYOUT: usize = 8;

/// Start of an "[[icon]] caption" item.
const ICON_MARKER: &str = "[[";

/// Splits an item into its icon name and caption.
static ICON_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]\s*(.*)").unwrap());

/// The five slide layouts, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// A row of icon+caption pairs.
    IconGrid,
    /// A table grid with a bold header row.
    Table,
    /// Two side-by-side columns with headings.
    DoubleColumn,
    /// An ordered sequence of chevron or pentagon step shapes.
    StepProcess,
    /// Plain bullets, optionally decorated with a photo.
    Bullets,
}

/// Decide which layout a slide spec gets. Pure and deterministic: the same
/// spec and options always classify the same way.
pub fn classify(spec: &SlideSpec, options: &LayoutOptions) -> LayoutKind {
    if is_icon_grid(spec, options) {
        LayoutKind::IconGrid
    } else if spec.table.as_ref().is_some_and(TableSpec::is_renderable) {
        LayoutKind::Table
    } else if spec.bullet_points.as_column_pair().is_some() {
        LayoutKind::DoubleColumn
    } else if is_step_process(spec, options) {
        LayoutKind::StepProcess
    } else {
        LayoutKind::Bullets
    }
}

/// An icon-grid item split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconItem {
    /// The requested icon name; may be empty ("[[]] caption").
    pub icon: String,
    /// The text shown beneath the icon.
    pub caption: String,
}

/// Split an "[[icon]] caption" item. Items without the marker become a
/// caption with an empty icon name, which the icon matcher then fills in.
pub fn parse_icon_item(text: &str) -> IconItem {
    match ICON_ITEM_REGEX.captures(text) {
        Some(captures) => IconItem {
            icon: captures[1].trim().to_string(),
            caption: captures[2].to_string(),
        },
        None => IconItem {
            icon: String::new(),
            caption: text.to_string(),
        },
    }
}

fn is_icon_grid(spec: &SlideSpec, options: &LayoutOptions) -> bool {
    let Some(items) = spec.bullet_points.top_leaves() else {
        return false;
    };
    if items.is_empty() {
        return false;
    }

    let marked = items.iter().filter(|s| s.starts_with(ICON_MARKER)).count();
    marked as f64 / items.len() as f64 >= options.icon_coverage
}

fn is_step_process(spec: &SlideSpec, options: &LayoutOptions) -> bool {
    let Some(steps) = spec.bullet_points.top_leaves() else {
        return false;
    };
    if steps.is_empty() {
        return false;
    }

    let unmarked = steps
        .iter()
        .filter(|s| !s.starts_with(STEP_MARKER))
        .count();
    let heading = spec.heading.to_lowercase();
    let waived = heading.contains("step-by-step") || heading.contains("step by step");

    if unmarked as f64 / steps.len() as f64 > options.step_marker_slack && !waived {
        return false;
    }

    (options.min_steps..=options.max_steps).contains(&steps.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: serde_json::Value) -> SlideSpec {
        serde_json::from_value(json).unwrap()
    }

    fn kind(json: serde_json::Value) -> LayoutKind {
        classify(&spec(json), &LayoutOptions::default())
    }

    #[test]
    fn test_icon_grid_requires_every_item_marked() {
        assert_eq!(
            kind(serde_json::json!({
                "heading": "Aspects",
                "bullet_points": ["[[brain]] Intelligence", "[[robot]] Automation"]
            })),
            LayoutKind::IconGrid
        );
        assert_eq!(
            kind(serde_json::json!({
                "heading": "Aspects",
                "bullet_points": ["[[brain]] Intelligence", "Automation"]
            })),
            LayoutKind::Bullets
        );
    }

    #[test]
    fn test_icon_grid_beats_default_bullets() {
        // Marked items also satisfy the default shape; priority decides.
        let s = spec(serde_json::json!({
            "heading": "H",
            "bullet_points": ["[[a]] one", "[[b]] two", "[[c]] three"],
            "img_keywords": "anything"
        }));
        assert_eq!(classify(&s, &LayoutOptions::default()), LayoutKind::IconGrid);
    }

    #[test]
    fn test_icon_grid_beats_step_process() {
        let s = spec(serde_json::json!({
            "heading": "H",
            "bullet_points": ["[[a]] one", "[[b]] two", "[[c]] three"]
        }));
        // Three flat strings would be step-eligible were they marked; the
        // icon predicate runs first.
        assert_eq!(classify(&s, &LayoutOptions::default()), LayoutKind::IconGrid);
    }

    #[test]
    fn test_table_beats_double_column() {
        assert_eq!(
            kind(serde_json::json!({
                "heading": "H",
                "table": {"headers": ["A"], "rows": [["1"]]},
                "bullet_points": [
                    {"heading": "L", "bullet_points": ["x"]},
                    {"heading": "R", "bullet_points": ["y"]}
                ]
            })),
            LayoutKind::Table
        );
    }

    #[test]
    fn test_empty_table_is_not_a_table() {
        assert_eq!(
            kind(serde_json::json!({
                "heading": "H",
                "table": {"headers": ["A"], "rows": []},
                "bullet_points": ["a"]
            })),
            LayoutKind::Bullets
        );
    }

    #[test]
    fn test_double_column_shape() {
        assert_eq!(
            kind(serde_json::json!({
                "heading": "H",
                "bullet_points": [
                    {"heading": "L", "bullet_points": ["x"]},
                    {"heading": "R", "bullet_points": ["y"]}
                ]
            })),
            LayoutKind::DoubleColumn
        );
    }

    #[test]
    fn test_step_process_bounds() {
        let steps = |n: usize| {
            let items: Vec<String> = (0..n).map(|i| format!(">> step {i}")).collect();
            kind(serde_json::json!({"heading": "H", "bullet_points": items}))
        };

        assert_eq!(steps(2), LayoutKind::Bullets);
        assert_eq!(steps(3), LayoutKind::StepProcess);
        assert_eq!(steps(6), LayoutKind::StepProcess);
        assert_eq!(steps(7), LayoutKind::Bullets);
    }

    #[test]
    fn test_step_marker_slack_boundary() {
        // 1 of 4 unmarked = 25%, which is within the slack.
        assert_eq!(
            kind(serde_json::json!({
                "heading": "H",
                "bullet_points": ["no marker", ">> b", ">> c", ">> d"]
            })),
            LayoutKind::StepProcess
        );
        // 2 of 4 unmarked exceeds it.
        assert_eq!(
            kind(serde_json::json!({
                "heading": "H",
                "bullet_points": ["no marker", "also none", ">> c", ">> d"]
            })),
            LayoutKind::Bullets
        );
    }

    #[test]
    fn test_step_heading_waives_marker_threshold() {
        assert_eq!(
            kind(serde_json::json!({
                "heading": "Step-by-Step Process: Creating a Legacy",
                "bullet_points": ["one", "two", "three", "four"]
            })),
            LayoutKind::StepProcess
        );
        assert_eq!(
            kind(serde_json::json!({
                "heading": "A step by step guide",
                "bullet_points": ["one", "two", "three"]
            })),
            LayoutKind::StepProcess
        );
    }

    #[test]
    fn test_nested_bullets_are_never_steps() {
        assert_eq!(
            kind(serde_json::json!({
                "heading": "H",
                "bullet_points": [">> a", [">> nested"], ">> c"]
            })),
            LayoutKind::Bullets
        );
    }

    #[test]
    fn test_parse_icon_item() {
        assert_eq!(
            parse_icon_item("[[brain]] Human-like intelligence"),
            IconItem {
                icon: "brain".into(),
                caption: "Human-like intelligence".into()
            }
        );
        assert_eq!(
            parse_icon_item("[[]] Data processing"),
            IconItem {
                icon: String::new(),
                caption: "Data processing".into()
            }
        );
        assert_eq!(
            parse_icon_item("no marker here"),
            IconItem {
                icon: String::new(),
                caption: "no marker here".into()
            }
        );
    }
}
