//! In-memory presentation document tree, built-in templates, and JSON
//! persistence for slide deck generation.
//!
//! This crate is the document-object layer: it knows nothing about content
//! classification or decoration policy. Renderers mutate a [`Presentation`]
//! through slides and shapes, and the finished tree is persisted as JSON.

pub mod document;
pub mod geometry;
pub mod shape;
pub mod template;
pub mod text;

pub use document::{Presentation, Slide};
pub use geometry::{Emu, Rect};
pub use shape::{AutoShapeType, Picture, Shape, ShapeContent, ShapeStyle, TableGrid};
pub use template::{PlaceholderDef, PlaceholderKind, SlideLayout, Template};
pub use text::{Alignment, Anchor, Color, Paragraph, Run, TextFrame, ThemeColor};
