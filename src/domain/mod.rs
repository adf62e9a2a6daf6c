//! Domain layer: content graph, filters, links, traversal and trees
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod filter;
pub mod graph;
pub mod link;
pub mod traversal;
pub mod tree;

pub use arena::ContentArena;
pub use builder::{NodeSpec, SiteBuilder, SiteGraph};
pub use entities::*;
pub use error::DomainError;
pub use filter::{AllFilter, Filter, ItemFilter, NavigationFilter};
pub use graph::{trail_of, ContentGraph};
pub use link::{Link, LinkSource};
pub use tree::{LinkProvider, NavTree, TreeBuilder, TreeNode, TreeNodeConvert};
