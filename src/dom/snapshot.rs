//! Render tree snapshots.
//!
//! A snapshot is a JSON dump of a rendered page: for every node its type,
//! measured box and the computed style properties the converter reads.
//! It is flattened into an arena so node handles are `Copy` and can walk
//! to their parent.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::{NodeKind, RenderNode};
use crate::geometry::Rect;
use crate::{Error, Result};

/// One node of a serialized render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SnapshotNode {
    Element {
        tag: String,
        #[serde(default)]
        attributes: BTreeMap<String, String>,
        #[serde(default)]
        rect: Option<Rect>,
        #[serde(default)]
        style: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<SnapshotNode>,
    },
    Text {
        text: String,
        #[serde(default)]
        rect: Option<Rect>,
    },
    #[serde(other)]
    Other,
}

impl SnapshotNode {
    pub fn element(tag: &str, rect: Rect) -> Self {
        SnapshotNode::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            rect: Some(rect),
            style: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: &str, rect: Rect) -> Self {
        SnapshotNode::Text {
            text: text.to_string(),
            rect: Some(rect),
        }
    }

    /// Set a computed style property (no-op on non-elements).
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        if let SnapshotNode::Element { style, .. } = &mut self {
            style.insert(property.to_string(), value.to_string());
        }
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        if let SnapshotNode::Element { attributes, .. } = &mut self {
            attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn with_child(mut self, child: SnapshotNode) -> Self {
        if let SnapshotNode::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    tag: Option<String>,
    text: Option<String>,
    rect: Option<Rect>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena holding a flattened snapshot. Index 0 is the snapshot root.
#[derive(Debug)]
pub struct RenderTree {
    nodes: Vec<NodeData>,
}

impl RenderTree {
    pub fn from_snapshot(root: SnapshotNode) -> Self {
        let mut nodes: Vec<NodeData> = Vec::new();
        let mut stack: Vec<(SnapshotNode, Option<usize>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let idx = nodes.len();
            let (data, children) = match node {
                SnapshotNode::Element {
                    tag,
                    attributes,
                    rect,
                    style,
                    children,
                } => (
                    NodeData {
                        kind: NodeKind::Element,
                        tag: Some(tag.to_ascii_lowercase()),
                        text: None,
                        rect,
                        attributes,
                        style,
                        parent,
                        children: Vec::new(),
                    },
                    children,
                ),
                SnapshotNode::Text { text, rect } => (
                    NodeData {
                        kind: NodeKind::Text,
                        tag: None,
                        text: Some(text),
                        rect,
                        attributes: BTreeMap::new(),
                        style: BTreeMap::new(),
                        parent,
                        children: Vec::new(),
                    },
                    Vec::new(),
                ),
                SnapshotNode::Other => (
                    NodeData {
                        kind: NodeKind::Other,
                        tag: None,
                        text: None,
                        rect: None,
                        attributes: BTreeMap::new(),
                        style: BTreeMap::new(),
                        parent,
                        children: Vec::new(),
                    },
                    Vec::new(),
                ),
            };
            nodes.push(data);
            if let Some(p) = parent {
                nodes[p].children.push(idx);
            }
            for child in children.into_iter().rev() {
                stack.push((child, Some(idx)));
            }
        }

        Self { nodes }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let root: SnapshotNode =
            serde_json::from_str(json).map_err(|e| Error::Snapshot(e.to_string()))?;
        Ok(Self::from_snapshot(root))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let root: SnapshotNode =
            serde_json::from_reader(reader).map_err(|e| Error::Snapshot(e.to_string()))?;
        Ok(Self::from_snapshot(root))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            index: 0,
        }
    }

    /// The content root: first `<body>` in document order, else the root.
    pub fn body(&self) -> NodeRef<'_> {
        // arena order is document order
        let index = self
            .nodes
            .iter()
            .position(|n| n.tag.as_deref() == Some("body"))
            .unwrap_or(0);
        NodeRef { tree: self, index }
    }
}

/// Copyable handle into a [`RenderTree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a RenderTree,
    index: usize,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl RenderNode for NodeRef<'_> {
    fn kind(&self) -> NodeKind {
        self.data().kind
    }

    fn tag_name(&self) -> Option<String> {
        self.data().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.data().attributes.get(name).cloned()
    }

    fn text_content(&self) -> Option<String> {
        self.data().text.clone()
    }

    fn bounding_rect(&self) -> Option<Rect> {
        self.data().rect
    }

    fn computed_style(&self, property: &str) -> Option<String> {
        self.data().style.get(property).cloned()
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|index| NodeRef {
            tree: self.tree,
            index,
        })
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&index| NodeRef {
                tree: self.tree,
                index,
            })
            .collect()
    }
}
