//! The content-to-slide layout engine.
//!
//! Per slide, the engine decides which of five prioritized layouts to use,
//! resolves template placeholders by index with a name-based fallback,
//! applies inline emphasis, and layers optional photo and icon decoration.
//! The [`Assembler`] orchestrates the title slide, per-slide dispatch, the
//! closing slide, and persistence.

pub mod assemble;
pub mod decor;
pub mod layout;
pub mod options;
pub mod placeholder;
mod render;

pub use assemble::Assembler;
pub use decor::{
    pick_photo, IconMatcher, IconStore, LexicalIconMatcher, NoPhotos, PexelsClient, Photo,
    PhotoSearch, PhotoSet, PhotoSize, PhotoSources, PickedPhoto,
};
pub use layout::{classify, LayoutKind};
pub use options::LayoutOptions;
pub use placeholder::{resolve_role, Role, RoleMap};
