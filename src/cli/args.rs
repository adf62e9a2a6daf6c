//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Navigation views over a hierarchical content site: menus, breadcrumbs and attribute display
#[derive(Parser, Debug)]
#[command(name = "contentnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug logging, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Site file (default: `site_file` from config)
    #[arg(short, long, global = true, env = "CONTENTNAV_SITE", value_hint = ValueHint::FilePath)]
    pub site: Option<PathBuf>,

    /// Url of the current node
    #[arg(short, long, global = true, default_value = "/")]
    pub path: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the navigation tree around the current node
    Tree {
        /// Trail level the tree is rooted at (0 = start page)
        #[arg(long, default_value_t = 0)]
        skip: usize,
        /// Levels below the tree root (default: from config)
        #[arg(long)]
        take: Option<usize>,
        /// Omit the tree root, render its children as top level
        #[arg(long)]
        rootless: bool,
        /// Emit nested <ul> markup instead of a terminal tree
        #[arg(long)]
        html: bool,
        /// Ignore the navigation filter
        #[arg(long)]
        all: bool,
    },

    /// Breadcrumb of the current node, nearest first
    Ancestors,

    /// All descendants of the current node
    Descendants {
        /// Ignore the navigation filter
        #[arg(long)]
        all: bool,
    },

    /// Siblings of the current node
    Siblings,

    /// Direct children of the current node
    Children,

    /// Navigation level of the current node
    Level,

    /// Link markup for a node (default: current)
    Link {
        /// Url of the node to link to
        url: Option<String>,
    },

    /// Attribute of the current node, rendered through its displayable
    Display {
        /// Attribute name
        name: String,
    },

    /// Raw attribute of the current node
    Data {
        /// Attribute name
        name: String,
    },

    /// Attribute names available on the current node
    Names,

    /// Descendant query by ancestral trail (default root: current)
    Find {
        /// Url of the query root
        url: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
