//! The presentation document tree and its persistence.

use crate::geometry::{Emu, Rect};
use crate::shape::{AutoShapeType, Picture, Shape, ShapeContent, ShapeStyle, TableGrid};
use crate::template::{SlideLayout, Template};
use crate::text::TextFrame;
use deckgen_core::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A presentation document under construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Identifier of the template the document was built from.
    pub template: String,

    pub slide_width: Emu,

    pub slide_height: Emu,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty document from a template.
    pub fn from_template(template: &Template) -> Self {
        Self {
            template: template.id.clone(),
            slide_width: template.slide_width,
            slide_height: template.slide_height,
            slides: Vec::new(),
        }
    }

    /// Append a slide based on a layout. The layout's placeholders are
    /// instantiated as empty shapes the caller fills in.
    pub fn add_slide(&mut self, layout: &SlideLayout) -> &mut Slide {
        let shapes = layout
            .placeholders
            .iter()
            .map(|def| Shape {
                name: def.name.clone(),
                bounds: def.bounds,
                content: ShapeContent::Placeholder {
                    idx: def.idx,
                    frame: TextFrame::new(),
                    picture: None,
                },
            })
            .collect();

        self.slides.push(Slide {
            layout_index: layout.index,
            shapes,
        });
        self.slides.last_mut().expect("just pushed")
    }

    /// Slide dimensions in inches.
    pub fn slide_size_inches(&self) -> (f64, f64) {
        (self.slide_width.inches(), self.slide_height.inches())
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// One slide of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Index of the layout this slide was created from.
    pub layout_index: usize,

    /// Shapes in z-order, back to front.
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// The placeholder shape with the given index.
    pub fn placeholder_mut(&mut self, idx: u32) -> Option<&mut Shape> {
        self.shapes
            .iter_mut()
            .find(|s| s.placeholder_idx() == Some(idx))
    }

    /// Shared access to the placeholder shape with the given index.
    pub fn placeholder(&self, idx: u32) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.placeholder_idx() == Some(idx))
    }

    /// Set the title placeholder's text. Does nothing on layouts without a
    /// title, such as Blank.
    pub fn set_title(&mut self, text: &str) {
        if let Some(shape) = self.placeholder_mut(0) {
            if let Some(frame) = shape.frame_mut() {
                frame.set_text(text);
            }
        }
    }

    /// The title placeholder's text, if any.
    pub fn title(&self) -> Option<String> {
        self.placeholder(0).and_then(|s| s.frame()).map(TextFrame::text)
    }

    /// Add a free-floating text box and return it.
    pub fn add_text_box(&mut self, bounds: Rect) -> &mut Shape {
        self.push_shape("TextBox", bounds, ShapeContent::TextBox {
            frame: TextFrame::new(),
        })
    }

    /// Add an auto shape and return it.
    pub fn add_auto_shape(&mut self, shape_type: AutoShapeType, bounds: Rect) -> &mut Shape {
        self.push_shape(
            "AutoShape",
            bounds,
            ShapeContent::AutoShape {
                shape_type,
                style: ShapeStyle::default(),
                frame: TextFrame::new(),
            },
        )
    }

    /// Add a free-floating picture; returns its shape index so the caller
    /// can reorder it afterwards.
    pub fn add_picture(&mut self, bounds: Rect, picture: Picture) -> usize {
        self.push_shape("Picture", bounds, ShapeContent::Picture { picture });
        self.shapes.len() - 1
    }

    /// Insert a picture into a picture placeholder. Returns false when the
    /// index does not name a placeholder.
    pub fn insert_picture_into(&mut self, idx: u32, new_picture: Picture) -> bool {
        match self.placeholder_mut(idx) {
            Some(shape) => {
                if let ShapeContent::Placeholder { picture, .. } = &mut shape.content {
                    *picture = Some(new_picture);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Add a table of empty cells and return its grid.
    pub fn add_table(&mut self, bounds: Rect, rows: usize, cols: usize) -> &mut TableGrid {
        let shape = self.push_shape(
            "Table",
            bounds,
            ShapeContent::Table {
                table: TableGrid::new(rows, cols),
            },
        );
        match &mut shape.content {
            ShapeContent::Table { table } => table,
            _ => unreachable!("just added a table"),
        }
    }

    /// Move the shape at `index` behind everything else on the slide.
    pub fn send_to_back(&mut self, index: usize) {
        if index < self.shapes.len() {
            let shape = self.shapes.remove(index);
            self.shapes.insert(0, shape);
        }
    }

    fn push_shape(&mut self, name: &str, bounds: Rect, content: ShapeContent) -> &mut Shape {
        self.shapes.push(Shape {
            name: name.to_string(),
            bounds,
            content,
        });
        self.shapes.last_mut().expect("just pushed")
    }
}
