//! Link construction and markup.

mod common;

use rstest::{fixture, rstest};

use contentnav::domain::{Link, LinkSource};
use contentnav::infrastructure::di::ServiceContainer;

use common::{context, SiteDir};

#[fixture]
fn container() -> (SiteDir, ServiceContainer) {
    let site = SiteDir::new();
    let container = site.container();
    (site, container)
}

#[rstest]
#[case(Link::empty(), "<a></a>")]
#[case(Link::text_href("Home", "/"), r#"<a href="/">Home</a>"#)]
#[case(
    Link::with_target("Docs", "Read the docs", "_blank", "/docs/"),
    r#"<a href="/docs/" title="Read the docs" target="_blank">Docs</a>"#
)]
#[case(
    Link::new("A", "", "", "/a/", "current"),
    r#"<a href="/a/" class="current">A</a>"#
)]
#[case(
    Link::text_href("Q&A <new>", "/q?a=1&b=\"2\""),
    r#"<a href="/q?a=1&amp;b=&quot;2&quot;">Q&amp;A &lt;new&gt;</a>"#
)]
fn given_link_when_rendering_then_empty_attributes_are_omitted_and_values_escaped(
    #[case] link: Link,
    #[case] expected: &str,
) {
    assert_eq!(link.to_html_string(), expected);
}

#[rstest]
fn given_plain_node_when_linking_then_title_and_url_are_used(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/");
    let about = ctx.current().unwrap();

    let link = Link::from_node_with_class(about, "current");
    assert_eq!(link.text(), "About");
    assert_eq!(link.href(), "/about/");
    assert_eq!(link.to_html_string(), r#"<a href="/about/" class="current">About</a>"#);
}

#[rstest]
fn given_node_with_own_link_when_linking_then_all_fields_are_replaced(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/contact/");
    let contact = ctx.current().unwrap();

    let link = ctx.link_to(contact);
    assert_eq!(link.text(), "Write us");
    assert_eq!(link.title(), "");
    assert_eq!(link.target(), "_blank");
    assert_eq!(link.href(), "mailto:hello@example.org");

    let decorated = Link::from_node_with_class(contact, "current");
    assert_eq!(decorated.class_name(), "current");
}

#[rstest]
fn given_link_source_when_copying_then_every_field_is_taken(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/");

    let source = Link::new("t", "ti", "ta", "h", "c");
    assert_eq!(Link::from_source(&source), source);

    let home = ctx.current().unwrap();
    assert_eq!(Link::from_node(home), Link::text_href("Home", "/"));
}
