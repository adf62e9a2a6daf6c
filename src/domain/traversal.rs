//! Lazy walks over a content graph: ancestors, descendants, children, siblings

use tracing::instrument;

use crate::domain::entities::{ContentNode, NodeId};
use crate::domain::filter::Filter;
use crate::domain::graph::ContentGraph;

/// Parent chain of a node, nearest first, ending after the stop node.
///
/// The walk ends at the graph root when the stop node is never met.
pub struct Ancestors<'g> {
    graph: &'g dyn ContentGraph,
    next: Option<NodeId>,
    stop: Option<NodeId>,
}

impl<'g> Ancestors<'g> {
    pub fn new(graph: &'g dyn ContentGraph, node: NodeId, stop: Option<NodeId>) -> Self {
        let next = if stop == Some(node) {
            None
        } else {
            graph.parent_of(node)
        };
        Self { graph, next, stop }
    }
}

impl<'g> Iterator for Ancestors<'g> {
    type Item = &'g ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        let node = self.graph.node(id)?;
        if self.stop != Some(id) {
            self.next = node.parent;
        }
        Some(node)
    }
}

/// Every node below a root in document order (pre-order), the root excluded.
pub struct Descendants<'g> {
    graph: &'g dyn ContentGraph,
    stack: Vec<NodeId>,
}

impl<'g> Descendants<'g> {
    pub fn new(graph: &'g dyn ContentGraph, node: NodeId) -> Self {
        let stack = graph.children_of(node).iter().rev().copied().collect();
        Self { graph, stack }
    }
}

impl<'g> Iterator for Descendants<'g> {
    type Item = &'g ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.graph.node(id) {
                self.stack.extend(node.children.iter().rev());
                return Some(node);
            }
        }
        None
    }
}

/// Filtered ancestors of `node`, nearest first, up to and including `start`.
pub fn ancestors<'g>(
    graph: &'g dyn ContentGraph,
    node: NodeId,
    start: Option<NodeId>,
    filter: &'g Filter,
) -> impl Iterator<Item = &'g ContentNode> + 'g {
    filter.pipe(Ancestors::new(graph, node, start))
}

/// Root-first ancestor chain sliced to `[skip, skip + take)`. Unfiltered.
#[instrument(level = "trace", skip(graph))]
pub fn ancestors_between(
    graph: &dyn ContentGraph,
    node: NodeId,
    start: Option<NodeId>,
    skip: usize,
    take: usize,
) -> Vec<&ContentNode> {
    let mut chain: Vec<_> = Ancestors::new(graph, node, start).collect();
    chain.reverse();
    chain.into_iter().skip(skip).take(take).collect()
}

/// Direct children of `node` that pass `filter`.
pub fn children<'g>(
    graph: &'g dyn ContentGraph,
    node: NodeId,
    filter: &'g Filter,
) -> impl Iterator<Item = &'g ContentNode> + 'g {
    filter.pipe(graph.children_of(node).iter().filter_map(move |&id| graph.node(id)))
}

/// Descendants of `node` that pass `filter`.
///
/// The filter only decides membership: children of a rejected node are
/// still visited.
pub fn descendants<'g>(
    graph: &'g dyn ContentGraph,
    node: NodeId,
    filter: &'g Filter,
) -> impl Iterator<Item = &'g ContentNode> + 'g {
    filter.pipe(Descendants::new(graph, node))
}

/// Children of the node's parent under `filter`; empty for a parentless node.
pub fn siblings<'g>(
    graph: &'g dyn ContentGraph,
    node: NodeId,
    filter: &'g Filter,
) -> impl Iterator<Item = &'g ContentNode> + 'g {
    graph
        .parent_of(node)
        .into_iter()
        .flat_map(move |parent| children(graph, parent, filter))
}

/// Number of filtered ancestors; 0 for the start node.
pub fn level(
    graph: &dyn ContentGraph,
    node: NodeId,
    start: Option<NodeId>,
    filter: &Filter,
) -> usize {
    ancestors(graph, node, start, filter).count()
}

/// Root-first trail: filtered ancestors followed by the node itself.
pub fn trail<'g>(
    graph: &'g dyn ContentGraph,
    node: NodeId,
    start: Option<NodeId>,
    filter: &'g Filter,
) -> Vec<&'g ContentNode> {
    let mut chain: Vec<_> = ancestors(graph, node, start, filter).collect();
    chain.reverse();
    chain.extend(graph.node(node));
    chain
}

/// Entry `level` of the root-first trail; `None` past its end.
#[instrument(level = "trace", skip(graph, filter))]
pub fn ancestor_at_level<'g>(
    graph: &'g dyn ContentGraph,
    node: NodeId,
    start: Option<NodeId>,
    filter: &'g Filter,
    level: usize,
) -> Option<&'g ContentNode> {
    trail(graph, node, start, filter).into_iter().nth(level)
}
