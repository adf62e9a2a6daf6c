//! Node filters: predicates plus order-preserving sequence piping

use std::fmt;
use std::sync::Arc;

use crate::domain::entities::ContentNode;

/// Predicate over content nodes.
pub trait ItemFilter: Send + Sync {
    fn matches(&self, node: &ContentNode) -> bool;
}

/// Yield only the nodes `filter` accepts, keeping their order.
pub fn pipe<'a, I>(filter: &'a dyn ItemFilter, nodes: I) -> impl Iterator<Item = &'a ContentNode> + 'a
where
    I: IntoIterator<Item = &'a ContentNode>,
    I::IntoIter: 'a,
{
    nodes.into_iter().filter(move |n| filter.matches(n))
}

/// Shared, composable filter value.
#[derive(Clone)]
pub struct Filter(Arc<dyn ItemFilter>);

impl Filter {
    pub fn new(filter: impl ItemFilter + 'static) -> Self {
        Self(Arc::new(filter))
    }

    /// Filter from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&ContentNode) -> bool + Send + Sync + 'static,
    {
        Self::new(FnFilter(f))
    }

    /// Accepts every node.
    pub fn all() -> Self {
        Self::new(AllFilter)
    }

    /// Pages that are visible and published.
    pub fn navigation() -> Self {
        Self::new(NavigationFilter::default())
    }

    pub fn and(self, other: Filter) -> Self {
        Self::from_fn(move |n| self.matches(n) && other.matches(n))
    }

    pub fn or(self, other: Filter) -> Self {
        Self::from_fn(move |n| self.matches(n) || other.matches(n))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::from_fn(move |n| !self.matches(n))
    }

    pub fn matches(&self, node: &ContentNode) -> bool {
        self.0.matches(node)
    }

    pub fn pipe<'a, I>(&'a self, nodes: I) -> impl Iterator<Item = &'a ContentNode> + 'a
    where
        I: IntoIterator<Item = &'a ContentNode>,
        I::IntoIter: 'a,
    {
        pipe(self.0.as_ref(), nodes)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::navigation()
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

impl ItemFilter for Filter {
    fn matches(&self, node: &ContentNode) -> bool {
        self.0.matches(node)
    }
}

struct FnFilter<F>(F);

impl<F> ItemFilter for FnFilter<F>
where
    F: Fn(&ContentNode) -> bool + Send + Sync,
{
    fn matches(&self, node: &ContentNode) -> bool {
        (self.0)(node)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllFilter;

impl ItemFilter for AllFilter {
    fn matches(&self, _node: &ContentNode) -> bool {
        true
    }
}

/// Excludes nodes that do not belong in menus.
///
/// Each flag relaxes one criterion; the default accepts only visible,
/// published pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationFilter {
    pub include_hidden: bool,
    pub include_unpublished: bool,
    pub include_parts: bool,
}

impl ItemFilter for NavigationFilter {
    fn matches(&self, node: &ContentNode) -> bool {
        (self.include_parts || node.is_page())
            && (self.include_hidden || node.data.visible)
            && (self.include_unpublished || node.data.published)
    }
}
