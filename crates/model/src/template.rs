//! Built-in presentation templates.
//!
//! A template names a visual theme and describes its slide layouts. The
//! layouts follow the conventional master ordering: 0 title, 1 title and
//! content, 4 comparison, 5 title only, 8 picture with caption. Placeholder
//! indices are not list positions — the title is always 0 and hand-edited
//! themes number their placeholders from 10 up, which is why the engine
//! resolves placeholders by name when an expected index is missing.

use crate::geometry::{Emu, Rect};
use serde::{Deserialize, Serialize};

/// What a placeholder region is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderKind {
    Title,
    Subtitle,
    Body,
    Picture,
    Text,
}

/// One placeholder region of a slide layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderDef {
    /// Placeholder index used for lookups; 0 is always the title.
    pub idx: u32,

    /// Display name, e.g. "Content Placeholder 2".
    pub name: String,

    pub kind: PlaceholderKind,

    pub bounds: Rect,
}

impl PlaceholderDef {
    fn new(idx: u32, name: &str, kind: PlaceholderKind, bounds: Rect) -> Self {
        Self {
            idx,
            name: name.to_string(),
            kind,
            bounds,
        }
    }
}

/// One slide layout of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLayout {
    /// Position in the template's layout list.
    pub index: usize,

    /// Layout name, e.g. "Picture with Caption".
    pub name: String,

    pub placeholders: Vec<PlaceholderDef>,
}

impl SlideLayout {
    /// Look up a placeholder by index.
    pub fn placeholder(&self, idx: u32) -> Option<&PlaceholderDef> {
        self.placeholders.iter().find(|p| p.idx == idx)
    }

    /// All placeholders except the title, as (idx, lowercase name) pairs in
    /// ascending index order. This is the input to name-based placeholder
    /// resolution.
    pub fn non_title_placeholders(&self) -> Vec<(u32, String)> {
        let mut pairs: Vec<(u32, String)> = self
            .placeholders
            .iter()
            .filter(|p| p.idx != 0)
            .map(|p| (p.idx, p.name.to_lowercase()))
            .collect();
        pairs.sort_by_key(|(idx, _)| *idx);
        pairs
    }
}

/// A named visual theme: slide dimensions plus layout definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Stable identifier, e.g. "ion-boardroom".
    pub id: String,

    /// Human-readable name.
    pub name: String,

    pub slide_width: Emu,

    pub slide_height: Emu,

    pub layouts: Vec<SlideLayout>,
}

impl Template {
    /// Look up a built-in template by identifier.
    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "basic" => Some(standard_template(id, "Basic")),
            "ion-boardroom" => Some(standard_template(id, "Ion Boardroom")),
            "minimalist-sales-pitch" => {
                Some(standard_template(id, "Minimalist Sales Pitch"))
            }
            "urban-monochrome" => Some(edited_template(id, "Urban Monochrome")),
            _ => None,
        }
    }

    /// Identifiers of all built-in templates.
    pub fn builtin_ids() -> &'static [&'static str] {
        &[
            "basic",
            "ion-boardroom",
            "minimalist-sales-pitch",
            "urban-monochrome",
        ]
    }

    /// Look up a layout by its index.
    pub fn layout(&self, index: usize) -> Option<&SlideLayout> {
        self.layouts.iter().find(|l| l.index == index)
    }
}

const SLIDE_WIDTH_IN: f64 = 13.333;
const SLIDE_HEIGHT_IN: f64 = 7.5;

fn title_bounds() -> Rect {
    Rect::from_inches(0.92, 0.37, 11.5, 1.25)
}

fn body_bounds() -> Rect {
    Rect::from_inches(0.92, 1.75, 11.5, 4.8)
}

fn half_heading_bounds(left: f64) -> Rect {
    Rect::from_inches(left, 1.75, 5.6, 0.7)
}

fn half_body_bounds(left: f64) -> Rect {
    Rect::from_inches(left, 2.5, 5.6, 4.0)
}

/// A template whose layouts keep the stock placeholder indices.
fn standard_template(id: &str, name: &str) -> Template {
    use PlaceholderKind::*;

    let layouts = vec![
        SlideLayout {
            index: 0,
            name: "Title Slide".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, Rect::from_inches(0.92, 2.3, 11.5, 1.6)),
                PlaceholderDef::new(
                    1,
                    "Subtitle 2",
                    Subtitle,
                    Rect::from_inches(0.92, 4.0, 11.5, 1.0),
                ),
            ],
        },
        SlideLayout {
            index: 1,
            name: "Title and Content".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(1, "Content Placeholder 2", Body, body_bounds()),
            ],
        },
        SlideLayout {
            index: 2,
            name: "Section Header".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, Rect::from_inches(0.92, 2.9, 11.5, 1.6)),
                PlaceholderDef::new(
                    1,
                    "Text Placeholder 2",
                    Text,
                    Rect::from_inches(0.92, 4.6, 11.5, 1.0),
                ),
            ],
        },
        SlideLayout {
            index: 3,
            name: "Two Content".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(1, "Content Placeholder 2", Body, half_body_bounds(0.92)),
                PlaceholderDef::new(2, "Content Placeholder 3", Body, half_body_bounds(6.82)),
            ],
        },
        SlideLayout {
            index: 4,
            name: "Comparison".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(1, "Text Placeholder 2", Text, half_heading_bounds(0.92)),
                PlaceholderDef::new(2, "Content Placeholder 3", Body, half_body_bounds(0.92)),
                PlaceholderDef::new(3, "Text Placeholder 4", Text, half_heading_bounds(6.82)),
                PlaceholderDef::new(4, "Content Placeholder 5", Body, half_body_bounds(6.82)),
            ],
        },
        SlideLayout {
            index: 5,
            name: "Title Only".into(),
            placeholders: vec![PlaceholderDef::new(0, "Title 1", Title, title_bounds())],
        },
        SlideLayout {
            index: 6,
            name: "Blank".into(),
            placeholders: vec![],
        },
        SlideLayout {
            index: 7,
            name: "Content with Caption".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(
                    1,
                    "Content Placeholder 2",
                    Body,
                    Rect::from_inches(0.92, 1.75, 7.8, 4.8),
                ),
                PlaceholderDef::new(
                    2,
                    "Text Placeholder 3",
                    Text,
                    Rect::from_inches(9.0, 1.75, 3.4, 4.8),
                ),
            ],
        },
        SlideLayout {
            index: 8,
            name: "Picture with Caption".into(),
            placeholders: vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(
                    1,
                    "Picture Placeholder 2",
                    Picture,
                    Rect::from_inches(0.92, 1.75, 5.9, 4.8),
                ),
                PlaceholderDef::new(
                    2,
                    "Content Placeholder 3",
                    Body,
                    Rect::from_inches(7.1, 1.75, 5.3, 4.8),
                ),
            ],
        },
    ];

    Template {
        id: id.to_string(),
        name: name.to_string(),
        slide_width: Emu::from_inches(SLIDE_WIDTH_IN),
        slide_height: Emu::from_inches(SLIDE_HEIGHT_IN),
        layouts,
    }
}

/// A template whose content layouts were hand-edited in an authoring tool:
/// the original placeholders were deleted and re-added, so their indices
/// start at 10 and only the names identify what each region is for.
fn edited_template(id: &str, name: &str) -> Template {
    use PlaceholderKind::*;

    let mut template = standard_template(id, name);

    for layout in &mut template.layouts {
        let replacement = match layout.index {
            1 => vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(10, "Content Placeholder 10", Body, body_bounds()),
            ],
            4 => vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(10, "Text Placeholder 10", Text, half_heading_bounds(0.92)),
                PlaceholderDef::new(11, "Content Placeholder 11", Body, half_body_bounds(0.92)),
                PlaceholderDef::new(12, "Text Placeholder 12", Text, half_heading_bounds(6.82)),
                PlaceholderDef::new(13, "Content Placeholder 13", Body, half_body_bounds(6.82)),
            ],
            8 => vec![
                PlaceholderDef::new(0, "Title 1", Title, title_bounds()),
                PlaceholderDef::new(
                    10,
                    "Picture Placeholder 10",
                    Picture,
                    Rect::from_inches(0.92, 1.75, 5.9, 4.8),
                ),
                PlaceholderDef::new(
                    11,
                    "Content Placeholder 11",
                    Body,
                    Rect::from_inches(7.1, 1.75, 5.3, 4.8),
                ),
            ],
            _ => continue,
        };
        layout.placeholders = replacement;
    }

    template
}
