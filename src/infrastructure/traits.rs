//! Collaborator boundary traits
//!
//! The navigation core talks to the filesystem, the render host, the request
//! and the site root service only through these traits, so tests can swap in
//! stubs.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{ContentArena, ContentGraph, ContentNode, NodeId};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Failure reported by a render host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no displayable registered for: {0}")]
    UnknownDisplayable(String),

    #[error("rendering {name} failed: {message}")]
    Failed { name: String, message: String },
}

/// View host that turns a named displayable into markup.
pub trait RenderHost: Send + Sync {
    /// `Ok(None)` means the displayable produced no output.
    fn render_displayable(&self, node: &ContentNode, name: &str)
        -> Result<Option<String>, RenderError>;
}

/// Supplies the node the active request is about.
pub trait CurrentNodeResolver: Send + Sync {
    fn current_node(&self) -> Option<NodeId>;
}

/// Site-level anchors.
pub trait SiteRoots: Send + Sync {
    /// Node navigation is anchored at; ancestor walks stop after it.
    fn start_page(&self) -> NodeId;
    /// Root of the whole graph.
    fn root_item(&self) -> NodeId;
}

/// Ancestral-trail LIKE pattern: `%` matches any run, `_` one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailQuery {
    pub pattern: String,
}

impl TrailQuery {
    pub fn like(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Anchored regex equivalent of the LIKE pattern.
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        let mut re = String::from("^");
        for c in self.pattern.chars() {
            match c {
                '%' => re.push_str(".*"),
                '_' => re.push('.'),
                c => re.push_str(&regex::escape(&c.to_string())),
            }
        }
        re.push('$');
        Regex::new(&re)
    }
}

/// Query service for nodes by ancestral trail.
pub trait ItemFinder: Send + Sync {
    fn find(&self, query: &TrailQuery) -> Vec<NodeId>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Render host backed by `name -> template` pairs; `{value}` is replaced
/// by the node's attribute in markup form.
#[derive(Debug, Default, Clone)]
pub struct TemplateRenderHost {
    templates: BTreeMap<String, String>,
}

impl TemplateRenderHost {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl RenderHost for TemplateRenderHost {
    #[instrument(level = "trace", skip(self, node), fields(node = %node.id))]
    fn render_displayable(
        &self,
        node: &ContentNode,
        name: &str,
    ) -> Result<Option<String>, RenderError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::UnknownDisplayable(name.to_string()))?;
        Ok(node
            .get(name)
            .filter(|v| !v.is_null())
            .map(|v| template.replace("{value}", &v.to_html_string())))
    }
}

/// Fixed start page and root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRoots {
    pub start_page: NodeId,
    pub root_item: NodeId,
}

impl SiteRoots for FixedRoots {
    fn start_page(&self) -> NodeId {
        self.start_page
    }

    fn root_item(&self) -> NodeId {
        self.root_item
    }
}

/// Resolves the current node from a request path by url.
pub struct UrlResolver {
    graph: Arc<dyn ContentGraph>,
    path: String,
}

impl UrlResolver {
    pub fn new(graph: Arc<dyn ContentGraph>, path: impl Into<String>) -> Self {
        Self {
            graph,
            path: path.into(),
        }
    }
}

impl CurrentNodeResolver for UrlResolver {
    fn current_node(&self) -> Option<NodeId> {
        let found = self.graph.find_by_url(&self.path);
        debug!("current_node: path={} found={:?}", self.path, found);
        found
    }
}

/// Stub resolver bound to a known node.
#[derive(Debug, Clone, Copy)]
pub struct FixedCurrent(pub NodeId);

impl CurrentNodeResolver for FixedCurrent {
    fn current_node(&self) -> Option<NodeId> {
        Some(self.0)
    }
}

/// Finder that scans an arena's ancestral trails.
pub struct ArenaFinder {
    arena: Arc<ContentArena>,
}

impl ArenaFinder {
    pub fn new(arena: Arc<ContentArena>) -> Self {
        Self { arena }
    }
}

impl ItemFinder for ArenaFinder {
    #[instrument(level = "debug", skip(self))]
    fn find(&self, query: &TrailQuery) -> Vec<NodeId> {
        let Ok(re) = query.to_regex() else {
            return Vec::new();
        };
        self.arena
            .iter()
            .filter(|n| re.is_match(&self.arena.ancestral_trail_of(n.id)))
            .map(|n| n.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeData;

    #[test]
    fn like_pattern_escapes_regex_metacharacters() {
        let re = TrailQuery::like("/1/2.%").to_regex().unwrap();
        assert!(re.is_match("/1/2./7/"));
        assert!(!re.is_match("/1/23/"));
        let re = TrailQuery::like("/_/").to_regex().unwrap();
        assert!(re.is_match("/4/"));
        assert!(!re.is_match("/45/"));
    }

    #[test]
    fn template_host_distinguishes_unknown_from_empty() {
        let mut arena = ContentArena::new();
        let id = arena.insert_node(
            NodeData::new("n", "N", "/").with_attribute("Heading", "Hi & bye"),
            None,
        );
        let node = arena.get_node(id).unwrap();
        let host = TemplateRenderHost::new(BTreeMap::from([
            ("Heading".to_string(), "<h1>{value}</h1>".to_string()),
            ("Lead".to_string(), "<p>{value}</p>".to_string()),
        ]));

        assert_eq!(
            host.render_displayable(node, "Heading"),
            Ok(Some("<h1>Hi &amp; bye</h1>".to_string()))
        );
        assert_eq!(host.render_displayable(node, "Lead"), Ok(None));
        assert_eq!(
            host.render_displayable(node, "Body"),
            Err(RenderError::UnknownDisplayable("Body".into()))
        );
    }
}
