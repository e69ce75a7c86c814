//! Domain types for LLM-authored slide deck content.
//!
//! The upstream LLM emits loosely-structured JSON where bullet content may be
//! a string, a nested array, or a two-object array describing a column pair.
//! That shape is parsed exactly once, at ingestion, into the closed
//! [`BulletNode`] sum type; rendering code never branches on raw JSON.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// The full deck content produced upstream: a title plus one spec per slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSpec {
    /// Presentation title, shown on the title slide.
    pub title: String,

    /// Content slides, in presentation order.
    pub slides: Vec<SlideSpec>,
}

/// Structured description of one slide's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Slide heading, possibly prefixed with "Slide N:".
    pub heading: String,

    /// Bullet content. Defaults to an empty group for table-only slides.
    #[serde(default)]
    pub bullet_points: BulletNode,

    /// Optional takeaway message rendered as a callout near the slide bottom.
    #[serde(default)]
    pub key_message: Option<String>,

    /// Optional search keywords for image decoration.
    #[serde(default)]
    pub img_keywords: Option<String>,

    /// Optional tabular content.
    #[serde(default)]
    pub table: Option<TableSpec>,
}

impl SlideSpec {
    /// The key message, if present and non-empty.
    pub fn key_message(&self) -> Option<&str> {
        self.key_message
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The image search keywords, if present and non-empty.
    pub fn image_keywords(&self) -> Option<&str> {
        self.img_keywords
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Tabular slide content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    /// Header row cells.
    #[serde(default)]
    pub headers: Vec<String>,

    /// Body rows.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// Whether the table carries anything renderable.
    pub fn is_renderable(&self) -> bool {
        !self.headers.is_empty() && !self.rows.is_empty()
    }
}

/// One column of a double-column slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column heading; empty when the upstream object omitted it.
    #[serde(default)]
    pub heading: String,

    /// Column bullet content.
    #[serde(default)]
    pub bullet_points: BulletNode,
}

/// A node in the bullet content tree.
///
/// Closed sum type covering every shape the upstream JSON can take: a plain
/// string, a (possibly nested) array of items, or an array of exactly two
/// column objects.
#[derive(Debug, Clone, PartialEq)]
pub enum BulletNode {
    /// A single bullet item.
    Leaf(String),
    /// An ordered group of child nodes, one nesting level deeper.
    Group(Vec<BulletNode>),
    /// Exactly two side-by-side columns.
    ColumnPair(Box<ColumnSpec>, Box<ColumnSpec>),
}

impl Default for BulletNode {
    fn default() -> Self {
        Self::Group(Vec::new())
    }
}

impl BulletNode {
    /// The texts of the direct children when every child is a leaf.
    ///
    /// This is the shape the icon-grid and step-process layouts require:
    /// a flat list of strings with no nesting. Returns `None` for leaf or
    /// column-pair nodes and for groups containing non-leaf children.
    pub fn top_leaves(&self) -> Option<Vec<&str>> {
        match self {
            Self::Group(children) => children
                .iter()
                .map(|child| match child {
                    Self::Leaf(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// The two columns when this node is a column pair.
    pub fn as_column_pair(&self) -> Option<(&ColumnSpec, &ColumnSpec)> {
        match self {
            Self::ColumnPair(left, right) => Some((left, right)),
            _ => None,
        }
    }

    /// Whether the node holds no content at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(_) | Self::ColumnPair(..) => false,
            Self::Group(children) => children.is_empty(),
        }
    }
}

/// A flattened bullet item: its text and nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatBullet {
    /// The bullet text, markers and all.
    pub text: String,

    /// Nesting depth; 0 for top-level bullets.
    pub level: usize,
}

impl FlatBullet {
    /// Create a flat bullet at the given depth.
    pub fn new(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// The raw JSON shape of bullet content, before conversion to [`BulletNode`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBullet {
    Text(String),
    Column(Box<RawColumn>),
    Many(Vec<RawBullet>),
    Null,
}

/// A column object as the LLM emits it; both fields may be absent.
#[derive(Deserialize)]
struct RawColumn {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    bullet_points: Option<RawBullet>,
}

impl RawColumn {
    fn into_column_spec(self) -> ColumnSpec {
        ColumnSpec {
            heading: self.heading.unwrap_or_default(),
            bullet_points: self
                .bullet_points
                .and_then(BulletNode::from_raw)
                .unwrap_or_default(),
        }
    }
}

impl BulletNode {
    /// Convert the raw JSON shape into the closed sum type.
    ///
    /// An array of exactly two objects becomes a column pair. Objects in any
    /// other position carry no renderable bullet content and are dropped.
    fn from_raw(raw: RawBullet) -> Option<Self> {
        match raw {
            RawBullet::Text(text) => Some(Self::Leaf(text)),
            RawBullet::Column(_) | RawBullet::Null => None,
            RawBullet::Many(mut items) => {
                if items.len() == 2
                    && items
                        .iter()
                        .all(|item| matches!(item, RawBullet::Column(_)))
                {
                    let right = items.pop();
                    let left = items.pop();
                    match (left, right) {
                        (Some(RawBullet::Column(left)), Some(RawBullet::Column(right))) => {
                            return Some(Self::ColumnPair(
                                Box::new(left.into_column_spec()),
                                Box::new(right.into_column_spec()),
                            ));
                        }
                        _ => unreachable!("both items matched as columns"),
                    }
                }

                Some(Self::Group(
                    items.into_iter().filter_map(Self::from_raw).collect(),
                ))
            }
        }
    }
}

impl<'de> Deserialize<'de> for BulletNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawBullet::deserialize(deserializer)?;
        Ok(Self::from_raw(raw).unwrap_or_default())
    }
}

impl Serialize for BulletNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Leaf(text) => serializer.serialize_str(text),
            Self::Group(children) => children.serialize(serializer),
            Self::ColumnPair(left, right) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&**left)?;
                seq.serialize_element(&**right)?;
                seq.end()
            }
        }
    }
}
