//! The rendered document as seen by the converter.
//!
//! The converter never parses markup or stylesheets. It reads geometry and
//! computed style from a render tree owned by the host, through the
//! [`RenderNode`] capability trait. [`snapshot`] provides an implementation
//! backed by a serialized render-tree dump.

pub mod snapshot;

pub use snapshot::{NodeRef, RenderTree, SnapshotNode};

use crate::geometry::Rect;

/// Broad node type, enough to classify nodes for traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Comments, doctypes, processing instructions
    Other,
}

/// Handle to one node of a rendered document.
///
/// Implementations are cheap handles (`Clone` should not copy subtrees).
pub trait RenderNode: Clone {
    fn kind(&self) -> NodeKind;

    /// Lowercase tag name for elements, `None` otherwise
    fn tag_name(&self) -> Option<String>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Raw text of a text node
    fn text_content(&self) -> Option<String>;

    /// Viewport-relative box. For text nodes this is the box of the node's
    /// whole text range. `None` when the host could not measure the node.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Resolved value of a CSS property, by its hyphenated name.
    fn computed_style(&self, property: &str) -> Option<String>;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;
}
