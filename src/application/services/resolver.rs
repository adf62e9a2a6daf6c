//! Attribute resolution by name, with rendered-display fallback

use tracing::debug;

use crate::domain::{AttributeValue, ContentGraph, NodeId};
use crate::infrastructure::traits::RenderHost;

/// Resolves attribute names on one node.
///
/// In display mode the render host is asked first and any failure counts
/// as "no output", after which the raw value is used. In data mode the
/// host is never called. Resolution never fails; absence is
/// [`AttributeValue::Null`] (or empty markup in display mode).
pub struct AttributeResolver<'a> {
    graph: &'a dyn ContentGraph,
    node: NodeId,
    host: &'a dyn RenderHost,
    render_displayables: bool,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(
        graph: &'a dyn ContentGraph,
        node: NodeId,
        host: &'a dyn RenderHost,
        render_displayables: bool,
    ) -> Self {
        Self {
            graph,
            node,
            host,
            render_displayables,
        }
    }

    pub fn renders_displayables(&self) -> bool {
        self.render_displayables
    }

    /// Resolve `name` in this resolver's mode.
    pub fn get(&self, name: &str) -> AttributeValue {
        self.resolve(name, self.render_displayables)
    }

    pub fn resolve(&self, name: &str, render_displayables: bool) -> AttributeValue {
        if !render_displayables {
            return self.raw(name);
        }
        let value = match self.try_render(name) {
            Some(markup) => AttributeValue::Markup(markup),
            None => {
                debug!("displayable {} has no output, using raw value", name);
                self.raw(name)
            }
        };
        AttributeValue::Markup(value.to_html_string())
    }

    /// Rendered markup for `name`, `None` when the host fails or renders nothing.
    pub fn try_render(&self, name: &str) -> Option<String> {
        let node = self.graph.node(self.node)?;
        self.host.render_displayable(node, name).ok().flatten()
    }

    fn raw(&self, name: &str) -> AttributeValue {
        self.graph
            .attribute_of(self.node, name)
            .unwrap_or_default()
    }

    /// Every name the node exposes, built-in fields first.
    pub fn available_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.graph
            .node(self.node)
            .into_iter()
            .flat_map(|node| node.names())
    }
}
