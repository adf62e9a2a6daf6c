//! Link value object and its construction rules

use std::fmt;

use crate::domain::entities::ContentNode;
use crate::util::html::{attribute, escape_html};

/// Anything that can describe an anchor.
pub trait LinkSource {
    fn text(&self) -> &str;
    fn title(&self) -> &str;
    fn target(&self) -> &str;
    fn href(&self) -> &str;
    fn class_name(&self) -> &str {
        ""
    }
}

/// Immutable anchor description. Every field defaults to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Link {
    text: String,
    title: String,
    target: String,
    href: String,
    class_name: String,
}

impl Link {
    pub fn new(
        text: impl Into<String>,
        title: impl Into<String>,
        target: impl Into<String>,
        href: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            target: target.into(),
            href: href.into(),
            class_name: class_name.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text_href(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(text, "", "", href, "")
    }

    pub fn with_target(
        text: impl Into<String>,
        title: impl Into<String>,
        target: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self::new(text, title, target, href, "")
    }

    /// Copy all five fields from another link-like source.
    pub fn from_source(source: &dyn LinkSource) -> Self {
        let mut link = Self::default();
        link.update_from(source);
        link
    }

    /// Link to a node: title and url, replaced by the node's own link fields when it has them.
    pub fn from_node(node: &ContentNode) -> Self {
        Self::from_node_with_class(node, "")
    }

    pub fn from_node_with_class(node: &ContentNode, class_name: impl Into<String>) -> Self {
        let mut link = Self::text_href(node.title(), node.url());
        if let Some(source) = node.as_link_source() {
            link.update_from(source);
        }
        link.class_name = class_name.into();
        link
    }

    /// Overwrite every field from `source`; never a partial update.
    fn update_from(&mut self, source: &dyn LinkSource) {
        *self = Self::new(
            source.text(),
            source.title(),
            source.target(),
            source.href(),
            source.class_name(),
        );
    }

    /// Same link with the CSS class replaced.
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn to_html_string(&self) -> String {
        self.to_string()
    }
}

impl LinkSource for Link {
    fn text(&self) -> &str {
        &self.text
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn target(&self) -> &str {
        &self.target
    }

    fn href(&self) -> &str {
        &self.href
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<a{}{}{}{}>{}</a>",
            attribute("href", &self.href),
            attribute("title", &self.title),
            attribute("target", &self.target),
            attribute("class", &self.class_name),
            escape_html(&self.text)
        )
    }
}
