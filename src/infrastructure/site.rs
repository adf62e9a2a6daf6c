//! Site file loading
//!
//! A site file is TOML with a flat list of nodes referencing their parent by name:
//!
//! ```toml
//! start_page = "home"
//!
//! [displayables]
//! Heading = "<h1>{value}</h1>"
//!
//! [[nodes]]
//! name = "root"
//! title = "Root"
//!
//! [[nodes]]
//! name = "home"
//! parent = "root"
//! attributes = { Heading = "Welcome" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::{
    AttributeValue, ContentArena, DomainError, Link, NodeData, NodeKind, NodeSpec, SiteBuilder,
};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{FileSystem, FixedRoots, TemplateRenderHost};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteDocument {
    start_page: Option<String>,
    #[serde(default)]
    displayables: BTreeMap<String, String>,
    #[serde(default)]
    nodes: Vec<NodeDocument>,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDocument {
    name: String,
    parent: Option<String>,
    title: Option<String>,
    url: Option<String>,
    #[serde(default)]
    kind: KindDocument,
    #[serde(default = "yes")]
    visible: bool,
    #[serde(default = "yes")]
    published: bool,
    #[serde(default)]
    attributes: BTreeMap<String, AttributeDocument>,
    link: Option<LinkDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindDocument {
    #[default]
    Page,
    Part,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AttributeDocument {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LinkDocument {
    text: String,
    title: String,
    target: String,
    href: String,
}

impl From<AttributeDocument> for AttributeValue {
    fn from(doc: AttributeDocument) -> Self {
        match doc {
            AttributeDocument::Bool(b) => AttributeValue::Bool(b),
            AttributeDocument::Integer(i) => AttributeValue::Integer(i),
            AttributeDocument::Float(x) => AttributeValue::Float(x),
            AttributeDocument::Text(s) => AttributeValue::Text(s),
        }
    }
}

impl From<NodeDocument> for NodeSpec {
    fn from(doc: NodeDocument) -> Self {
        let title = doc.title.unwrap_or_else(|| doc.name.clone());
        let mut data = NodeData::new(doc.name, title, doc.url.unwrap_or_default());
        data.kind = match doc.kind {
            KindDocument::Page => NodeKind::Page,
            KindDocument::Part => NodeKind::Part,
        };
        data.visible = doc.visible;
        data.published = doc.published;
        data.attributes = doc
            .attributes
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect();
        data.link = doc
            .link
            .map(|l| Link::with_target(l.text, l.title, l.target, l.href));
        NodeSpec {
            parent: doc.parent,
            data,
        }
    }
}

/// A loaded site: its graph and the collaborators derived from the file.
#[derive(Debug, Clone)]
pub struct Site {
    pub arena: Arc<ContentArena>,
    pub roots: FixedRoots,
    pub host: TemplateRenderHost,
}

fn domain_err(e: DomainError) -> InfraError {
    InfraError::Application(ApplicationError::Domain(e))
}

/// Parse site TOML. `path` is only used in error messages.
#[instrument(level = "debug", skip(content))]
pub fn parse_site(content: &str, path: &Path) -> InfraResult<Site> {
    let doc: SiteDocument = toml::from_str(content).map_err(|e| InfraError::SiteFormat {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut builder = SiteBuilder::new();
    for node in doc.nodes {
        builder.add(node.into()).map_err(domain_err)?;
    }
    let graph = builder.build().map_err(domain_err)?;

    let root_item = graph.root().ok_or_else(|| domain_err(DomainError::NoRoot))?;
    let start_page = match &doc.start_page {
        Some(name) => graph
            .id_of(name)
            .ok_or_else(|| domain_err(DomainError::UnknownStartPage(name.clone())))?,
        None => root_item,
    };
    debug!(
        "parsed site: {} nodes, {} displayables",
        graph.arena.len(),
        doc.displayables.len()
    );

    Ok(Site {
        arena: Arc::new(graph.arena),
        roots: FixedRoots {
            start_page,
            root_item,
        },
        host: TemplateRenderHost::new(doc.displayables),
    })
}

/// Read and parse a site file.
pub fn load_site(fs: &dyn FileSystem, path: &Path) -> InfraResult<Site> {
    if !fs.is_file(path) {
        return Err(InfraError::io(
            format!("site file not found: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ));
    }
    let content = fs.read_to_string(path).with_path_context("read site file", path)?;
    parse_site(&content, path)
}
