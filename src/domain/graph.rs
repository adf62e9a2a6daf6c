//! Read-only access to a hierarchical content graph

use crate::domain::entities::{AttributeValue, ContentNode, NodeId};

/// Graph store contract the navigation core walks.
///
/// Unknown ids are answered with `None` or empty results, never errors.
pub trait ContentGraph: Send + Sync {
    fn node(&self, id: NodeId) -> Option<&ContentNode>;

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in their stored order.
    fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn attribute_of(&self, id: NodeId, name: &str) -> Option<AttributeValue> {
        self.node(id).and_then(|n| n.get(name))
    }

    /// Ids of all ancestors, root first, as `/1/4/`. The root's trail is `/`.
    fn ancestral_trail_of(&self, id: NodeId) -> String {
        let mut chain = Vec::new();
        let mut next = self.parent_of(id);
        while let Some(parent) = next {
            chain.push(parent);
            next = self.parent_of(parent);
        }
        let mut trail = String::from("/");
        for ancestor in chain.iter().rev() {
            trail.push_str(&ancestor.to_string());
            trail.push('/');
        }
        trail
    }

    fn find_by_url(&self, url: &str) -> Option<NodeId>;
}

/// Trail of `id` including itself, the prefix shared by all its descendants' trails.
pub fn trail_of(graph: &dyn ContentGraph, id: NodeId) -> String {
    format!("{}{}/", graph.ancestral_trail_of(id), id)
}
