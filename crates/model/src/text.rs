//! Text frames, paragraphs, and styled runs.

use serde::{Deserialize, Serialize};

/// A color reference: explicit RGB or a slot in the template theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Six-digit uppercase hex, no leading '#'.
    Rgb(String),
    /// A named theme slot resolved by the template at display time.
    Theme(ThemeColor),
}

impl Color {
    /// An RGB color from a six-digit hex string.
    pub fn rgb(hex: impl Into<String>) -> Self {
        Self::Rgb(hex.into())
    }
}

/// Theme color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeColor {
    Text1,
    Text2,
    Accent1,
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Vertical anchoring of a text frame within its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Top,
    Middle,
    Bottom,
}

/// A contiguous span of identically styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_pt: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
}

impl Run {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: None,
            size_pt: None,
            color: None,
            hyperlink: None,
        }
    }
}

/// One paragraph: a bullet level plus its runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,

    /// Bullet nesting depth; 0 for top-level text.
    #[serde(default)]
    pub level: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    /// Append a run to this paragraph.
    pub fn add_run(&mut self, run: Run) -> &mut Run {
        self.runs.push(run);
        self.runs.last_mut().expect("just pushed")
    }

    /// The paragraph text with styling dropped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The text content of a shape.
///
/// A frame always holds at least one paragraph, mirroring how placeholder
/// frames behave in presentation documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,

    #[serde(default)]
    pub word_wrap: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_anchor: Option<Anchor>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
            word_wrap: false,
            vertical_anchor: None,
        }
    }
}

impl TextFrame {
    /// An empty frame with one blank paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first paragraph.
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }
        &mut self.paragraphs[0]
    }

    /// Append a new paragraph and return it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        self.paragraphs.last_mut().expect("just pushed")
    }

    /// Replace all content with a single plain-text paragraph.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.paragraphs = vec![Paragraph {
            runs: vec![Run::plain(text)],
            level: 0,
            alignment: None,
        }];
    }

    /// All frame text, paragraphs joined with newlines, styling dropped.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
