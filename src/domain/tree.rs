//! Bounded-depth navigation trees and their markup rendering

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{ContentNode, NodeId};
use crate::domain::filter::Filter;
use crate::domain::graph::ContentGraph;
use crate::domain::link::{Link, LinkSource};
use crate::util::html::escape_html;

/// Decoration callback invoked once per visited node.
pub type LinkProvider<'a> = Box<dyn Fn(&ContentNode) -> Link + 'a>;

/// Node of a built navigation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub title: String,
    /// Distance from the tree's nominal root
    pub depth: usize,
    pub link: Option<Link>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// CSS class of the decorating link, empty without one.
    pub fn class_name(&self) -> &str {
        self.link.as_ref().map(|l| l.class_name()).unwrap_or("")
    }

    fn markup(&self) -> String {
        match &self.link {
            Some(link) => link.to_html_string(),
            None => escape_html(&self.title),
        }
    }

    fn label(&self) -> String {
        let text = self.link.as_ref().map(|l| l.text()).unwrap_or(self.title.as_str());
        match self.class_name() {
            "" => text.to_string(),
            class => format!("{} [{}]", text, class),
        }
    }
}

/// Built tree. Markup is produced only when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct NavTree {
    root: TreeNode,
    rootless: bool,
}

impl NavTree {
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn is_rootless(&self) -> bool {
        self.rootless
    }

    /// Top-level nodes of the rendered structure.
    pub fn top_level(&self) -> &[TreeNode] {
        if self.rootless {
            &self.root.children
        } else {
            std::slice::from_ref(&self.root)
        }
    }

    /// Rendered nodes in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack: Vec<&TreeNode> = self.top_level().iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes().find(|n| n.id == id)
    }

    /// Deepest rendered depth, 0 for an empty rootless tree.
    pub fn max_depth(&self) -> usize {
        self.nodes().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn to_html_string(&self) -> String {
        self.to_string()
    }

    /// Terminal trees, one per top-level node.
    pub fn to_tree_strings(&self) -> Vec<Tree<String>> {
        self.top_level().iter().map(|n| n.to_tree_string()).collect()
    }
}

fn write_list(nodes: &[TreeNode], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if nodes.is_empty() {
        return Ok(());
    }
    f.write_str("<ul>")?;
    for node in nodes {
        write!(f, "<li>{}", node.markup())?;
        write_list(&node.children, f)?;
        f.write_str("</li>")?;
    }
    f.write_str("</ul>")
}

impl fmt::Display for NavTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(self.top_level(), f)
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(self.label()).with_leaves(leaves)
    }
}

/// Builds a [`NavTree`] from a root node.
///
/// Children are piped through the filter before descending, so a rejected
/// node hides its whole subtree.
pub struct TreeBuilder<'g> {
    graph: &'g dyn ContentGraph,
    root: NodeId,
    take_levels: usize,
    exclude_root: bool,
    link_provider: Option<LinkProvider<'g>>,
    filter: Filter,
}

impl<'g> TreeBuilder<'g> {
    pub fn new(graph: &'g dyn ContentGraph, root: NodeId) -> Self {
        Self {
            graph,
            root,
            take_levels: 3,
            exclude_root: false,
            link_provider: None,
            filter: Filter::default(),
        }
    }

    pub fn take_levels(mut self, take_levels: usize) -> Self {
        self.take_levels = take_levels;
        self
    }

    pub fn exclude_root(mut self, exclude_root: bool) -> Self {
        self.exclude_root = exclude_root;
        self
    }

    pub fn link_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&ContentNode) -> Link + 'g,
    {
        self.link_provider = Some(Box::new(provider));
        self
    }

    pub fn filters(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// `None` when the root is not part of the graph.
    #[instrument(level = "debug", skip(self), fields(root = %self.root, take = self.take_levels))]
    pub fn build(self) -> Option<NavTree> {
        let root = self.graph.node(self.root)?;
        Some(NavTree {
            root: self.build_node(root, 0),
            rootless: self.exclude_root,
        })
    }

    fn build_node(&self, node: &ContentNode, depth: usize) -> TreeNode {
        let children = if depth < self.take_levels {
            let candidates = self
                .graph
                .children_of(node.id)
                .iter()
                .filter_map(|&id| self.graph.node(id));
            self.filter
                .pipe(candidates)
                .map(|child| self.build_node(child, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        TreeNode {
            id: node.id,
            title: node.title().to_string(),
            depth,
            link: self.link_provider.as_ref().map(|provide| provide(node)),
            children,
        }
    }
}
