//! Shapes: the things a slide is made of.

use crate::geometry::Rect;
use crate::text::{Color, TextFrame};
use serde::{Deserialize, Serialize};

/// Preset auto-shape geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoShapeType {
    RoundedRectangle,
    Chevron,
    Pentagon,
}

/// Fill, outline, and shadow styling for an auto shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Solid fill color; `None` leaves the shape unfilled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,

    /// Outline color; `None` draws no outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Color>,

    /// Whether the shape inherits the theme shadow.
    #[serde(default)]
    pub shadow: bool,
}

/// An embedded raster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    /// The raw image bytes, base64 in the serialized document.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,

    /// Where the image came from, for attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Opacity in percent; `None` means fully opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity_pct: Option<u8>,
}

impl Picture {
    /// A fully opaque picture.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            source_url: None,
            opacity_pct: None,
        }
    }
}

/// A table: a grid of text-frame cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    pub cells: Vec<Vec<TextFrame>>,
}

impl TableGrid {
    /// A grid of empty cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: (0..rows)
                .map(|_| (0..cols).map(|_| TextFrame::new()).collect())
                .collect(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Mutable access to one cell's frame.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TextFrame> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Shared access to one cell's frame.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TextFrame> {
        self.cells.get(row).and_then(|r| r.get(col))
    }
}

/// The content-specific part of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeContent {
    /// A content region inherited from the slide layout.
    Placeholder {
        /// Placeholder index. Not contiguous: the title is always 0 and
        /// hand-added placeholders start at 10.
        idx: u32,
        frame: TextFrame,
        /// Set when a picture was inserted into a picture placeholder.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        picture: Option<Picture>,
    },
    /// A free-floating text box.
    TextBox { frame: TextFrame },
    /// A preset geometric shape with optional text.
    AutoShape {
        shape_type: AutoShapeType,
        style: ShapeStyle,
        frame: TextFrame,
    },
    /// A free-floating picture.
    Picture { picture: Picture },
    /// A table grid.
    Table { table: TableGrid },
}

/// One shape on a slide. Z-order is the containing vector's order, back
/// to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Display name, e.g. "Content Placeholder 2".
    pub name: String,

    pub bounds: Rect,

    pub content: ShapeContent,
}

impl Shape {
    /// The shape's text frame, when its content kind has one.
    pub fn frame(&self) -> Option<&TextFrame> {
        match &self.content {
            ShapeContent::Placeholder { frame, .. }
            | ShapeContent::TextBox { frame }
            | ShapeContent::AutoShape { frame, .. } => Some(frame),
            ShapeContent::Picture { .. } | ShapeContent::Table { .. } => None,
        }
    }

    /// Mutable access to the shape's text frame.
    pub fn frame_mut(&mut self) -> Option<&mut TextFrame> {
        match &mut self.content {
            ShapeContent::Placeholder { frame, .. }
            | ShapeContent::TextBox { frame }
            | ShapeContent::AutoShape { frame, .. } => Some(frame),
            ShapeContent::Picture { .. } | ShapeContent::Table { .. } => None,
        }
    }

    /// The placeholder index, when this shape is a placeholder.
    pub fn placeholder_idx(&self) -> Option<u32> {
        match &self.content {
            ShapeContent::Placeholder { idx, .. } => Some(*idx),
            _ => None,
        }
    }

    /// Mutable access to the styling of an auto shape.
    pub fn style_mut(&mut self) -> Option<&mut ShapeStyle> {
        match &mut self.content {
            ShapeContent::AutoShape { style, .. } => Some(style),
            _ => None,
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
