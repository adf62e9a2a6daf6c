use std::collections::HashMap;

use generational_arena::Arena;
use tracing::instrument;

use crate::domain::entities::{ContentNode, NodeData, NodeId};
use crate::domain::graph::ContentGraph;

/// Arena-based content graph.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Each arena holds one site: a single root and its descendants.
#[derive(Debug, Default)]
pub struct ContentArena {
    /// Arena storage for all content nodes
    arena: Arena<ContentNode>,
    /// Id of the root node, None for empty graphs
    root: Option<NodeId>,
    /// Normalized url to node
    urls: HashMap<String, NodeId>,
}

/// Strip the trailing slash so `/about` and `/about/` resolve to the same node.
fn normalize_url(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

impl ContentArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self, data), fields(name = %data.name))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let url = normalize_url(&data.url).to_string();
        let idx = self.arena.insert_with(|idx| ContentNode {
            id: NodeId(idx),
            data,
            parent,
            children: Vec::new(),
        });
        let node_id = NodeId(idx);

        if let Some(parent_id) = parent {
            if let Some(parent) = self.arena.get_mut(parent_id.0) {
                parent.children.push(node_id);
            }
        } else {
            self.root = Some(node_id);
        }
        self.urls.entry(url).or_insert(node_id);

        node_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&ContentNode> {
        self.arena.get(id.0)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk from the root, children left to right.
    pub fn iter(&self) -> ArenaIterator<'_> {
        ArenaIterator::new(self)
    }
}

impl ContentGraph for ContentArena {
    fn node(&self, id: NodeId) -> Option<&ContentNode> {
        self.get_node(id)
    }

    #[instrument(level = "trace", skip(self))]
    fn find_by_url(&self, url: &str) -> Option<NodeId> {
        self.urls.get(normalize_url(url)).copied()
    }
}

pub struct ArenaIterator<'a> {
    arena: &'a ContentArena,
    stack: Vec<NodeId>,
}

impl<'a> ArenaIterator<'a> {
    fn new(arena: &'a ContentArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for ArenaIterator<'a> {
    type Item = &'a ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some(node);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_links_parent_and_children() {
        let mut arena = ContentArena::new();
        let root = arena.insert_node(NodeData::new("root", "Root", "/"), None);
        let a = arena.insert_node(NodeData::new("a", "A", "/a/"), Some(root));
        let b = arena.insert_node(NodeData::new("b", "B", "/b/"), Some(root));

        assert_eq!(arena.root(), Some(root));
        assert_eq!(arena.children_of(root), &[a, b]);
        assert_eq!(arena.parent_of(a), Some(root));
        assert_eq!(arena.parent_of(root), None);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn url_lookup_ignores_trailing_slash() {
        let mut arena = ContentArena::new();
        let root = arena.insert_node(NodeData::new("root", "Root", "/"), None);
        let a = arena.insert_node(NodeData::new("a", "A", "/a/"), Some(root));

        assert_eq!(arena.find_by_url("/a"), Some(a));
        assert_eq!(arena.find_by_url("/a/"), Some(a));
        assert_eq!(arena.find_by_url("/"), Some(root));
        assert_eq!(arena.find_by_url("/missing"), None);
    }

    #[test]
    fn iter_is_pre_order() {
        let mut arena = ContentArena::new();
        let root = arena.insert_node(NodeData::new("root", "Root", "/"), None);
        let a = arena.insert_node(NodeData::new("a", "A", "/a/"), Some(root));
        arena.insert_node(NodeData::new("a1", "A1", "/a/a1/"), Some(a));
        arena.insert_node(NodeData::new("b", "B", "/b/"), Some(root));

        let names: Vec<_> = arena.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn ancestral_trail_lists_ancestor_ids() {
        let mut arena = ContentArena::new();
        let root = arena.insert_node(NodeData::new("root", "Root", "/"), None);
        let a = arena.insert_node(NodeData::new("a", "A", "/a/"), Some(root));
        let b = arena.insert_node(NodeData::new("b", "B", "/a/b/"), Some(a));

        assert_eq!(arena.ancestral_trail_of(root), "/");
        assert_eq!(arena.ancestral_trail_of(b), format!("/{}/{}/", root, a));
    }
}
