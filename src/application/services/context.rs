//! Navigation context: the per-request façade over traversal, trees, links
//! and attribute resolution.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::resolver::AttributeResolver;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::traversal;
use crate::domain::{
    trail_of, ContentGraph, ContentNode, Filter, Link, NavigationFilter, NodeId, TreeBuilder,
};
use crate::infrastructure::traits::{
    CurrentNodeResolver, ItemFinder, RenderHost, SiteRoots, TrailQuery,
};

/// Defaults a context applies when a call does not override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOptions {
    pub take_levels: usize,
    pub current_class: String,
    pub trail_class: String,
    pub filter: NavigationFilter,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            take_levels: 3,
            current_class: "current".to_string(),
            trail_class: "trail".to_string(),
            filter: NavigationFilter::default(),
        }
    }
}

/// Injected services a context is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub graph: Arc<dyn ContentGraph>,
    pub host: Arc<dyn RenderHost>,
    pub roots: Arc<dyn SiteRoots>,
    pub finder: Arc<dyn ItemFinder>,
}

/// Descendant search anchored at a node's trail.
pub struct DescendantQuery<'a> {
    query: TrailQuery,
    finder: &'a dyn ItemFinder,
}

impl<'a> DescendantQuery<'a> {
    pub fn query(&self) -> &TrailQuery {
        &self.query
    }

    pub fn execute(&self) -> Vec<NodeId> {
        self.finder.find(&self.query)
    }
}

/// Query API for one render pass, bound to the request's current node.
pub struct NavigationContext {
    graph: Arc<dyn ContentGraph>,
    host: Arc<dyn RenderHost>,
    roots: Arc<dyn SiteRoots>,
    finder: Arc<dyn ItemFinder>,
    current: NodeId,
    options: NavigationOptions,
    default_filter: Filter,
}

impl NavigationContext {
    pub fn new(
        collaborators: Collaborators,
        resolver: &dyn CurrentNodeResolver,
        options: NavigationOptions,
    ) -> ApplicationResult<Self> {
        let current = resolver
            .current_node()
            .ok_or(ApplicationError::NoCurrentNode)?;
        if collaborators.graph.node(current).is_none() {
            return Err(ApplicationError::NodeNotFound(current.to_string()));
        }
        debug!("navigation context bound to node {}", current);
        let default_filter = Filter::new(options.filter);
        Ok(Self {
            graph: collaborators.graph,
            host: collaborators.host,
            roots: collaborators.roots,
            finder: collaborators.finder,
            current,
            options,
            default_filter,
        })
    }

    pub fn graph(&self) -> &dyn ContentGraph {
        self.graph.as_ref()
    }

    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    pub fn node(&self, id: NodeId) -> Option<&ContentNode> {
        self.graph.node(id)
    }

    pub fn current_id(&self) -> NodeId {
        self.current
    }

    pub fn current(&self) -> Option<&ContentNode> {
        self.graph.node(self.current)
    }

    pub fn start_page(&self) -> NodeId {
        self.roots.start_page()
    }

    pub fn root_page(&self) -> NodeId {
        self.roots.root_item()
    }

    pub fn default_filter(&self) -> &Filter {
        &self.default_filter
    }

    /// Ancestors of `item` (default: current), nearest first, up to the start page.
    pub fn ancestors<'a>(
        &'a self,
        item: Option<NodeId>,
        filter: Option<&'a Filter>,
    ) -> impl Iterator<Item = &'a ContentNode> + 'a {
        traversal::ancestors(
            self.graph(),
            item.unwrap_or(self.current),
            Some(self.start_page()),
            filter.unwrap_or(&self.default_filter),
        )
    }

    /// Slice of the current node's root-first ancestor chain.
    pub fn ancestors_between(&self, skip_level: usize, take_levels: usize) -> Vec<&ContentNode> {
        traversal::ancestors_between(
            self.graph(),
            self.current,
            Some(self.start_page()),
            skip_level,
            take_levels,
        )
    }

    pub fn children<'a>(
        &'a self,
        item: NodeId,
        filter: Option<&'a Filter>,
    ) -> impl Iterator<Item = &'a ContentNode> + 'a {
        traversal::children(self.graph(), item, filter.unwrap_or(&self.default_filter))
    }

    /// Every descendant of `item` matching the filter; rejected nodes are still descended into.
    pub fn descendants<'a>(
        &'a self,
        item: NodeId,
        filter: Option<&'a Filter>,
    ) -> impl Iterator<Item = &'a ContentNode> + 'a {
        traversal::descendants(self.graph(), item, filter.unwrap_or(&self.default_filter))
    }

    pub fn siblings(&self, item: Option<NodeId>) -> impl Iterator<Item = &ContentNode> + '_ {
        traversal::siblings(
            self.graph(),
            item.unwrap_or(self.current),
            &self.default_filter,
        )
    }

    pub fn level(&self, item: Option<NodeId>) -> usize {
        self.ancestors(item, None).count()
    }

    /// Entry `level` of the current node's trail: 0 is the start page,
    /// `level(current)` the current node.
    pub fn ancestor_at_level(&self, level: usize) -> Option<&ContentNode> {
        traversal::ancestor_at_level(
            self.graph(),
            self.current,
            Some(self.start_page()),
            &self.default_filter,
            level,
        )
    }

    /// Tree rooted at the trail entry `skip_levels`; `None` past the end of the trail.
    #[instrument(level = "debug", skip(self))]
    pub fn tree_from(&self, skip_levels: usize) -> Option<TreeBuilder<'_>> {
        let root = self.ancestor_at_level(skip_levels)?;
        Some(self.tree_from_node(root.id))
    }

    /// Tree rooted at `item`, decorated with navigation classes and the default filter.
    ///
    /// Chain `take_levels`, `exclude_root`, `link_provider` or `filters` on the
    /// result to override the defaults, then `build()`.
    pub fn tree_from_node(&self, item: NodeId) -> TreeBuilder<'_> {
        TreeBuilder::new(self.graph(), item)
            .take_levels(self.options.take_levels)
            .link_provider(move |node| self.link_to(node).class(self.navigation_class(node)))
            .filters(self.default_filter.clone())
    }

    /// Link provider from a caller-supplied CSS class function.
    pub fn decorate_with<'a, F>(&'a self, css: F) -> impl Fn(&ContentNode) -> Link + 'a
    where
        F: Fn(&ContentNode) -> String + 'a,
    {
        move |node| self.link_to(node).class(css(node))
    }

    /// "current" for the current node, "trail" for its ancestors, "" otherwise.
    pub fn navigation_class(&self, item: &ContentNode) -> &str {
        if item.id == self.current {
            &self.options.current_class
        } else if self.ancestors(None, None).any(|a| a.id == item.id) {
            &self.options.trail_class
        } else {
            ""
        }
    }

    pub fn link_to(&self, item: &ContentNode) -> Link {
        Link::from_node(item)
    }

    pub fn find(&self) -> &dyn ItemFinder {
        self.finder.as_ref()
    }

    /// Query for all descendants of `root` (default: current) by ancestral trail prefix.
    pub fn find_descendant(&self, root: Option<NodeId>) -> DescendantQuery<'_> {
        let root = root.unwrap_or(self.current);
        let pattern = format!("{}%", trail_of(self.graph(), root));
        DescendantQuery {
            query: TrailQuery::like(pattern),
            finder: self.find(),
        }
    }

    /// Resolver that prefers rendered displayables.
    pub fn display(&self) -> AttributeResolver<'_> {
        AttributeResolver::new(self.graph(), self.current, self.host.as_ref(), true)
    }

    /// Resolver that returns raw attribute values.
    pub fn data(&self) -> AttributeResolver<'_> {
        AttributeResolver::new(self.graph(), self.current, self.host.as_ref(), false)
    }
}
