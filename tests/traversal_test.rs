//! Traversal queries through a navigation context bound to a loaded site.

mod common;

use rstest::{fixture, rstest};

use contentnav::domain::Filter;
use contentnav::infrastructure::di::ServiceContainer;
use contentnav::util::testing;

use common::{context, titles, SiteDir};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn site() -> SiteDir {
    SiteDir::new()
}

#[fixture]
fn container(site: SiteDir) -> (SiteDir, ServiceContainer) {
    let container = site.container();
    (site, container)
}

// ============================================================
// Ancestors and levels
// ============================================================

#[rstest]
fn given_nested_page_when_listing_ancestors_then_nearest_first_up_to_start_page(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/team/alice/");

    assert_eq!(titles(ctx.ancestors(None, None)), vec!["Team", "About", "Home"]);
    assert_eq!(ctx.level(None), 3);
}

#[rstest]
fn given_start_page_when_listing_ancestors_then_empty(container: (SiteDir, ServiceContainer)) {
    let (_site, container) = container;
    let ctx = context(&container, "/");

    assert_eq!(ctx.ancestors(None, None).count(), 0);
    assert_eq!(ctx.level(None), 0);
    assert_eq!(ctx.ancestor_at_level(0).map(|n| n.title()), Some("Home"));
}

#[rstest]
#[case("/", 0)]
#[case("/about/", 1)]
#[case("/about/team/alice/", 3)]
#[case("/about/history/", 2)]
#[case("/about/history/founding/", 2)]
#[case("/news/", 1)]
#[case("/_root/", 0)]
fn given_any_page_when_walking_the_trail_then_level_indexes_the_page_itself(
    container: (SiteDir, ServiceContainer),
    #[case] url: &str,
    #[case] expected_level: usize,
) {
    let (_site, container) = container;
    let ctx = context(&container, url);
    let current = ctx.current_id();

    assert!(ctx.ancestors(None, None).all(|n| n.id != current));
    assert_eq!(ctx.level(None), expected_level);
    assert_eq!(ctx.level(None), ctx.ancestors(None, None).count());
    assert_eq!(ctx.ancestor_at_level(expected_level).map(|n| n.id), Some(current));
    assert!(ctx.ancestor_at_level(expected_level + 1).is_none());
}

#[rstest]
#[case(0, 10, vec!["Home", "About", "Team"])]
#[case(1, 1, vec!["About"])]
#[case(2, 5, vec!["Team"])]
#[case(0, 0, vec![])]
#[case(5, 2, vec![])]
fn given_nested_page_when_slicing_ancestors_between_then_root_first_window(
    container: (SiteDir, ServiceContainer),
    #[case] skip: usize,
    #[case] take: usize,
    #[case] expected: Vec<&str>,
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/team/alice/");

    assert_eq!(titles(ctx.ancestors_between(skip, take)), expected);
}

#[rstest]
fn given_custom_filter_when_listing_ancestors_then_filter_applies(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/team/alice/");
    let no_about = Filter::from_fn(|n| n.name() != "about");

    assert_eq!(titles(ctx.ancestors(None, Some(&no_about))), vec!["Team", "Home"]);
}

// ============================================================
// Children, descendants, siblings
// ============================================================

#[rstest]
fn given_home_when_listing_children_then_navigation_filter_hides_non_menu_nodes(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/");
    let home = ctx.current_id();
    let all = Filter::all();

    assert_eq!(titles(ctx.children(home, None)), vec!["About", "Contact"]);
    assert_eq!(
        titles(ctx.children(home, Some(&all))),
        vec!["About", "News", "Sidebar", "Contact"]
    );
}

#[rstest]
fn given_hidden_branch_when_listing_descendants_then_filter_does_not_prune(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/");
    let about = ctx.current_id();
    let all = Filter::all();

    // History is rejected but its child is still visited
    assert_eq!(
        titles(ctx.descendants(about, None)),
        vec!["Team", "Alice", "Founding"]
    );
    assert_eq!(
        titles(ctx.descendants(about, Some(&all))),
        vec!["Team", "Alice", "History", "Founding"]
    );
}

#[rstest]
fn given_leaf_when_listing_descendants_then_empty(container: (SiteDir, ServiceContainer)) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/team/alice/");

    assert_eq!(ctx.descendants(ctx.current_id(), None).count(), 0);
}

#[rstest]
#[case("/about/", vec!["About", "Contact"])]
#[case("/about/team/", vec!["Team"])]
#[case("/news/", vec!["About", "Contact"])]
fn given_page_when_listing_siblings_then_parent_children_include_self_when_visible(
    container: (SiteDir, ServiceContainer),
    #[case] url: &str,
    #[case] expected: Vec<&str>,
) {
    let (_site, container) = container;
    let ctx = context(&container, url);

    assert_eq!(titles(ctx.siblings(None)), expected);
}

#[rstest]
fn given_root_when_listing_siblings_then_empty(container: (SiteDir, ServiceContainer)) {
    let (_site, container) = container;
    let ctx = context(&container, "/");

    assert_eq!(ctx.siblings(Some(ctx.root_page())).count(), 0);
}

// ============================================================
// Finder
// ============================================================

#[rstest]
fn given_about_when_finding_descendants_by_trail_then_matches_whole_subtree(
    container: (SiteDir, ServiceContainer),
) {
    let (_site, container) = container;
    let ctx = context(&container, "/about/");
    let query = ctx.find_descendant(None);

    assert!(query.query().pattern.ends_with('%'));
    let found: Vec<_> = query
        .execute()
        .into_iter()
        .filter_map(|id| ctx.node(id))
        .map(|n| n.title())
        .collect();
    assert_eq!(found, vec!["Team", "Alice", "History", "Founding"]);
}
