//! Navigation views over a hierarchical content graph.
//!
//! Ancestors, descendants, siblings and levels relative to a current node,
//! bounded navigation trees with CSS decoration, links, and attribute
//! resolution that prefers rendered displayables over raw values.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
