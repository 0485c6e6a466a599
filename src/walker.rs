//! Document-order traversal and node classification.

use crate::dom::{NodeKind, RenderNode};
use crate::geometry::Rect;
use crate::id::IdGenerator;
use crate::layers::{self, Layer};

/// Elements that never render and are skipped with their whole subtree
pub const EXCLUDED_TAGS: [&str; 4] = ["script", "style", "meta", "link"];

/// Which builder an accepted node goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Element,
    TextRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accept(Role),
    /// Skip the node and everything below it
    Reject,
}

pub fn classify<N: RenderNode>(node: &N) -> Classification {
    match node.kind() {
        NodeKind::Text => {
            let has_text = node
                .text_content()
                .map(|t| !t.trim().is_empty())
                .unwrap_or(false);
            if has_text {
                Classification::Accept(Role::TextRun)
            } else {
                Classification::Reject
            }
        }
        NodeKind::Element => match node.tag_name() {
            Some(tag) if EXCLUDED_TAGS.contains(&tag.as_str()) => Classification::Reject,
            _ => Classification::Accept(Role::Element),
        },
        NodeKind::Other => Classification::Reject,
    }
}

/// Accepted descendants of `root` in document order (parents before
/// children, siblings left to right). `root` itself is not included.
pub fn walk<N: RenderNode>(root: &N) -> Vec<(N, Role)> {
    let mut out = Vec::new();
    let mut stack: Vec<N> = root.children().into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        match classify(&node) {
            Classification::Accept(role) => {
                stack.extend(node.children().into_iter().rev());
                out.push((node, role));
            }
            Classification::Reject => {
                log::debug!("pruning {:?} node {:?}", node.kind(), node.tag_name());
            }
        }
    }

    out
}

/// Walk `root` and build one layer per accepted node that has geometry.
///
/// `origin` is the artboard's box in viewport coordinates.
pub fn collect_layers<N: RenderNode>(root: &N, origin: &Rect, ids: &mut IdGenerator) -> Vec<Layer> {
    let mut out = Vec::new();
    for (node, role) in walk(root) {
        let layer = match role {
            Role::Element => layers::shape::build(&node, origin, ids).map(Layer::ShapeGroup),
            Role::TextRun => layers::text::build(&node, origin, ids).map(Layer::Text),
        };
        match layer {
            Some(layer) => out.push(layer),
            None => log::debug!("no layer for {:?} node {:?}", role, node.tag_name()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{RenderTree, SnapshotNode};

    fn rect(w: f64, h: f64) -> Rect {
        Rect::new(0.0, 0.0, w, h)
    }

    fn page() -> RenderTree {
        let body = SnapshotNode::element("body", rect(400.0, 300.0))
            .with_child(
                SnapshotNode::element("div", rect(100.0, 100.0))
                    .with_attribute("id", "a")
                    .with_child(SnapshotNode::text("one", rect(20.0, 10.0)))
                    .with_child(SnapshotNode::element("span", rect(10.0, 10.0)).with_attribute("id", "b")),
            )
            .with_child(
                SnapshotNode::element("script", rect(10.0, 10.0))
                    .with_child(SnapshotNode::text("alert(1)", rect(10.0, 10.0))),
            )
            .with_child(SnapshotNode::text("   \n ", rect(10.0, 10.0)))
            .with_child(SnapshotNode::Other)
            .with_child(SnapshotNode::element("p", rect(50.0, 20.0)).with_attribute("id", "c"));
        RenderTree::from_snapshot(body)
    }

    fn describe<N: RenderNode>(entries: &[(N, Role)]) -> Vec<String> {
        entries
            .iter()
            .map(|(n, _)| {
                n.attribute("id")
                    .or_else(|| n.text_content())
                    .unwrap_or_default()
            })
            .collect()
    }

    #[test]
    fn visits_in_document_order() {
        let tree = page();
        let entries = walk(&tree.root());
        assert_eq!(describe(&entries), vec!["a", "one", "b", "c"]);
        let roles: Vec<Role> = entries.iter().map(|(_, r)| *r).collect();
        assert_eq!(
            roles,
            vec![Role::Element, Role::TextRun, Role::Element, Role::Element]
        );
    }

    #[test]
    fn excluded_tags_prune_their_subtree() {
        let tree = page();
        let entries = walk(&tree.root());
        assert!(entries
            .iter()
            .all(|(n, _)| n.tag_name().as_deref() != Some("script")
                && n.text_content().as_deref() != Some("alert(1)")));
    }

    #[test]
    fn classification_rules() {
        for tag in EXCLUDED_TAGS {
            let tree = RenderTree::from_snapshot(SnapshotNode::element(tag, rect(1.0, 1.0)));
            assert_eq!(classify(&tree.root()), Classification::Reject);
        }
        let tree = RenderTree::from_snapshot(SnapshotNode::text(" x ", rect(1.0, 1.0)));
        assert_eq!(classify(&tree.root()), Classification::Accept(Role::TextRun));
        let tree = RenderTree::from_snapshot(SnapshotNode::text("\t", rect(1.0, 1.0)));
        assert_eq!(classify(&tree.root()), Classification::Reject);
        let tree = RenderTree::from_snapshot(SnapshotNode::Other);
        assert_eq!(classify(&tree.root()), Classification::Reject);
    }

    #[test]
    fn builders_that_decline_do_not_stop_the_walk() {
        let body = SnapshotNode::element("body", rect(400.0, 300.0))
            .with_child(SnapshotNode::element("div", rect(0.0, 40.0)))
            .with_child(SnapshotNode::element("div", rect(30.0, 40.0)));
        let tree = RenderTree::from_snapshot(body);
        let mut ids = IdGenerator::new();
        let layers = collect_layers(&tree.root(), &rect(400.0, 300.0), &mut ids);
        assert_eq!(layers.len(), 1);
    }
}
