//! Placeholder resolution: mapping abstract roles to a template's actual
//! placeholder indices.
//!
//! Default templates use well-known indices (the title is 0, the body 1,
//! and so on), but hand-edited templates renumber placeholders from 10 up.
//! Resolution therefore tries the standard index first and falls back to
//! matching placeholder names. A role that resolves to `None` is not an
//! error; renderers degrade gracefully.

use crate::layout::{BODY_LAYOUT, COMPARISON_LAYOUT, PICTURE_LAYOUT, TITLE_LAYOUT};
use deckgen_model::{SlideLayout, Template};

/// Abstract placeholder roles, independent of template-specific indexing.
///
/// The title is not listed: its index is 0 in every layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Subtitle on the title slide layout.
    Subtitle,
    /// Body text on the title-and-body layout.
    Body,
    /// Picture region on the picture-with-caption layout.
    Picture,
    /// Caption body on the picture-with-caption layout.
    CaptionBody,
    /// Left column heading on the comparison layout.
    LeftHeading,
    /// Left column body on the comparison layout.
    LeftBody,
    /// Right column heading on the comparison layout.
    RightHeading,
    /// Right column body on the comparison layout.
    RightBody,
}

impl Role {
    /// The layout this role lives on.
    fn layout_index(self) -> usize {
        match self {
            Self::Subtitle => TITLE_LAYOUT,
            Self::Body => BODY_LAYOUT,
            Self::Picture | Self::CaptionBody => PICTURE_LAYOUT,
            Self::LeftHeading | Self::LeftBody | Self::RightHeading | Self::RightBody => {
                COMPARISON_LAYOUT
            }
        }
    }

    /// The index default templates use for this role.
    fn standard_idx(self) -> u32 {
        match self {
            Self::Subtitle | Self::Body | Self::Picture | Self::LeftHeading => 1,
            Self::CaptionBody | Self::LeftBody => 2,
            Self::RightHeading => 3,
            Self::RightBody => 4,
        }
    }

    /// Substring matched against lowercase placeholder names on fallback.
    fn keyword(self) -> &'static str {
        match self {
            Self::Subtitle => "subtitle",
            Self::Body | Self::CaptionBody => "content",
            Self::Picture => "picture",
            Self::LeftHeading | Self::RightHeading => "text placeholder",
            Self::LeftBody | Self::RightBody => "content placeholder",
        }
    }

    /// Which of the keyword's matches satisfies this role: the first match
    /// is the left column, the second the right.
    fn occurrence(self) -> usize {
        match self {
            Self::RightHeading | Self::RightBody => 1,
            _ => 0,
        }
    }
}

/// Resolve one role against a layout.
///
/// Fast path: the standard index, when the layout still has it. Fallback:
/// the Nth non-title placeholder whose lowercase name contains the role
/// keyword, in ascending index order. The body role additionally accepts
/// the first non-title placeholder of its layout, whatever its name.
pub fn resolve_role(layout: &SlideLayout, role: Role) -> Option<u32> {
    if layout.placeholder(role.standard_idx()).is_some() {
        return Some(role.standard_idx());
    }

    let named = layout.non_title_placeholders();
    let matched = named
        .iter()
        .filter(|(_, name)| name.contains(role.keyword()))
        .nth(role.occurrence())
        .map(|(idx, _)| *idx);

    if matched.is_none() && role == Role::Body {
        return named.first().map(|(idx, _)| *idx);
    }

    matched
}

/// All roles resolved once per template load.
#[derive(Debug, Clone, Default)]
pub struct RoleMap {
    subtitle: Option<u32>,
    body: Option<u32>,
    picture: Option<u32>,
    caption_body: Option<u32>,
    left_heading: Option<u32>,
    left_body: Option<u32>,
    right_heading: Option<u32>,
    right_body: Option<u32>,
}

impl RoleMap {
    /// Resolve every role against a template's layouts. Roles whose layout
    /// is missing from the template resolve to `None`.
    pub fn for_template(template: &Template) -> Self {
        let resolve = |role: Role| {
            template
                .layout(role.layout_index())
                .and_then(|layout| resolve_role(layout, role))
        };

        Self {
            subtitle: resolve(Role::Subtitle),
            body: resolve(Role::Body),
            picture: resolve(Role::Picture),
            caption_body: resolve(Role::CaptionBody),
            left_heading: resolve(Role::LeftHeading),
            left_body: resolve(Role::LeftBody),
            right_heading: resolve(Role::RightHeading),
            right_body: resolve(Role::RightBody),
        }
    }

    /// The resolved placeholder index for a role, if any.
    pub fn get(&self, role: Role) -> Option<u32> {
        match role {
            Role::Subtitle => self.subtitle,
            Role::Body => self.body,
            Role::Picture => self.picture,
            Role::CaptionBody => self.caption_body,
            Role::LeftHeading => self.left_heading,
            Role::LeftBody => self.left_body,
            Role::RightHeading => self.right_heading,
            Role::RightBody => self.right_body,
        }
    }
}
