//! Attribute resolution in display and data mode against a loaded site.

mod common;

use rstest::{fixture, rstest};

use contentnav::domain::AttributeValue;
use contentnav::infrastructure::di::ServiceContainer;
use contentnav::util::testing;

use common::{context, SiteDir};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn container() -> (SiteDir, ServiceContainer) {
    let site = SiteDir::new();
    let container = site.container();
    (site, container)
}

fn markup(s: &str) -> AttributeValue {
    AttributeValue::Markup(s.to_string())
}

#[rstest]
#[case("Heading", markup("<h1>Welcome &amp; hi</h1>"))]
#[case("Title", markup("Home"))]
#[case("Visits", markup("42"))]
#[case("Banner", markup(""))]
#[case("Unknown", markup(""))]
fn given_display_mode_when_resolving_then_rendered_or_raw_fallback(
    container: (SiteDir, ServiceContainer),
    #[case] name: &str,
    #[case] expected: AttributeValue,
) {
    let (_site, container) = container;
    let ctx = context(&container, "/");

    assert_eq!(ctx.display().get(name), expected);
}

#[rstest]
#[case("Heading", AttributeValue::Text("Welcome & hi".to_string()))]
#[case("Title", AttributeValue::Text("Home".to_string()))]
#[case("Visits", AttributeValue::Integer(42))]
#[case("Published", AttributeValue::Bool(true))]
#[case("Banner", AttributeValue::Null)]
fn given_data_mode_when_resolving_then_raw_value_is_returned(
    container: (SiteDir, ServiceContainer),
    #[case] name: &str,
    #[case] expected: AttributeValue,
) {
    let (_site, container) = container;
    let ctx = context(&container, "/");

    assert_eq!(ctx.data().get(name), expected);
}

#[rstest]
fn given_resolver_when_switching_mode_per_call_then_mode_is_honoured(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/");
    let display = ctx.display();

    assert!(display.renders_displayables());
    assert!(!ctx.data().renders_displayables());
    assert_eq!(
        display.resolve("Teaser", true),
        markup(r#"<p class="teaser">Who we are</p>"#)
    );
    assert_eq!(
        display.resolve("Teaser", false),
        AttributeValue::Text("Who we are".to_string())
    );
    assert_eq!(display.try_render("Heading"), None);
}

#[rstest]
fn given_node_when_listing_names_then_builtins_come_first(container: (SiteDir, ServiceContainer)) {
    let (_site, container) = container;
    let ctx = context(&container, "/");

    let names: Vec<_> = ctx.data().available_names().collect();
    assert_eq!(
        names,
        vec!["ID", "Name", "Title", "Url", "Visible", "Published", "Heading", "Visits"]
    );
}
