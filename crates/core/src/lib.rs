//! Core domain types, bullet normalization, and emphasis parsing
//! for slide deck generation.

pub mod emphasis;
pub mod error;
pub mod normalize;
pub mod types;

pub use emphasis::TextRun;
pub use error::{Error, Result};
pub use normalize::{flatten, strip_slide_number, strip_step_marker, STEP_MARKER};
pub use types::{BulletNode, ColumnSpec, DeckSpec, FlatBullet, SlideSpec, TableSpec};
