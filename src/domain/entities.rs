//! Domain entities: content nodes and their attribute values

use std::collections::BTreeMap;
use std::fmt;

use generational_arena::Index;

use crate::domain::link::{Link, LinkSource};
use crate::util::html::escape_html;

/// Identity of a node inside a content graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) Index);

impl NodeId {
    /// Slot number of the node, used in ancestral trails.
    pub fn number(&self) -> usize {
        self.0.into_raw_parts().0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Whether a node is a navigable page or a part embedded in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Page,
    Part,
}

/// Value stored under an attribute name.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Plain text, escaped when emitted as markup
    Text(String),
    /// Markup-safe text, emitted verbatim
    Markup(String),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Coerce to a string that can be written into markup without further escaping.
    pub fn to_html_string(&self) -> String {
        match self {
            AttributeValue::Null => String::new(),
            AttributeValue::Text(s) => escape_html(s),
            AttributeValue::Markup(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(x) => write!(f, "{}", x),
            AttributeValue::Text(s) | AttributeValue::Markup(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        AttributeValue::Float(x)
    }
}

/// Field names every node exposes in addition to its attribute map.
pub static BUILTIN_NAMES: [&str; 6] = ["ID", "Name", "Title", "Url", "Visible", "Published"];

/// Payload of a content node, supplied when the node is inserted into a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub name: String,
    pub title: String,
    pub url: String,
    pub kind: NodeKind,
    pub visible: bool,
    pub published: bool,
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Present when the node acts as a link (redirects, external references)
    pub link: Option<Link>,
}

impl NodeData {
    pub fn new(name: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            url: url.into(),
            kind: NodeKind::Page,
            visible: true,
            published: true,
            attributes: BTreeMap::new(),
            link: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }
}

/// A node as stored in a content graph.
#[derive(Debug, Clone)]
pub struct ContentNode {
    pub id: NodeId,
    pub data: NodeData,
    /// None for the graph root
    pub parent: Option<NodeId>,
    /// Ordered child ids
    pub children: Vec<NodeId>,
}

impl ContentNode {
    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn url(&self) -> &str {
        &self.data.url
    }

    pub fn is_page(&self) -> bool {
        self.data.kind == NodeKind::Page
    }

    /// Link-like capability of the node, if it has one.
    pub fn as_link_source(&self) -> Option<&dyn LinkSource> {
        self.data.link.as_ref().map(|l| l as &dyn LinkSource)
    }

    /// Look up a value by name. Built-in fields win over attribute entries.
    pub fn get(&self, name: &str) -> Option<AttributeValue> {
        let builtin = match name {
            "ID" => Some(AttributeValue::Integer(self.id.number() as i64)),
            "Name" => Some(AttributeValue::Text(self.data.name.clone())),
            "Title" => Some(AttributeValue::Text(self.data.title.clone())),
            "Url" => Some(AttributeValue::Text(self.data.url.clone())),
            "Visible" => Some(AttributeValue::Bool(self.data.visible)),
            "Published" => Some(AttributeValue::Bool(self.data.published)),
            _ => None,
        };
        builtin.or_else(|| self.data.attributes.get(name).cloned())
    }

    /// Every name [`get`](Self::get) answers for, built-ins first.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        BUILTIN_NAMES
            .iter()
            .copied()
            .chain(self.data.attributes.keys().map(String::as_str))
    }
}

impl fmt::Display for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.data.title, self.data.url)
    }
}
