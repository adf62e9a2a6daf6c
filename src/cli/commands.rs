//! Command dispatch: each subcommand loads the site, binds a navigation
//! context to `--path` and prints one view of it.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::NavigationContext;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, site_config_path, Settings};
use crate::domain::{AttributeValue, ContentNode, Filter, NodeId};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => cmd_config(cli, command),
        command => {
            let container = container(cli)?;
            let ctx = container.context_for(&cli.path)?;
            run(&container, &ctx, command)
        }
    }
}

fn site_dir(cli: &Cli) -> Option<&Path> {
    cli.site.as_deref().and_then(Path::parent)
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Settings::load(site_dir(cli)).map_err(|e| CliError::Infra(e.into()))
}

fn site_file(cli: &Cli, settings: &Settings) -> CliResult<PathBuf> {
    cli.site
        .clone()
        .or_else(|| settings.site_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no site file: pass --site or set site_file in config".to_string())
        })
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = load_settings(cli)?;
    let site = site_file(cli, &settings)?;
    debug!("site file: {}", site.display());
    Ok(ServiceContainer::new(settings, &site)?)
}

fn lookup(ctx: &NavigationContext, url: Option<&str>) -> CliResult<NodeId> {
    match url {
        None => Ok(ctx.current_id()),
        Some(url) => ctx.graph().find_by_url(url).ok_or_else(|| {
            CliError::Infra(InfraError::from(ApplicationError::NodeNotFound(
                url.to_string(),
            )))
        }),
    }
}

fn print_nodes<'a>(nodes: impl Iterator<Item = &'a ContentNode>) {
    for node in nodes {
        output::info(&format!("{}  {}", node.title(), node.url().dimmed()));
    }
}

#[instrument(skip(container, ctx))]
fn run(container: &ServiceContainer, ctx: &NavigationContext, command: &Commands) -> CliResult<()> {
    let all = Filter::all();
    match command {
        Commands::Tree {
            skip,
            take,
            rootless,
            html,
            all: unfiltered,
        } => {
            let mut builder = ctx
                .tree_from(*skip)
                .ok_or_else(|| CliError::InvalidArgs(format!("no trail entry at level {skip}")))?
                .exclude_root(*rootless);
            if let Some(take) = take {
                builder = builder.take_levels(*take);
            }
            if *unfiltered {
                builder = builder.filters(all.clone());
            }
            let Some(tree) = builder.build() else {
                return Ok(());
            };
            if *html {
                output::info(&tree.to_html_string());
            } else {
                for top in tree.to_tree_strings() {
                    output::info(&top);
                }
            }
        }
        Commands::Ancestors => {
            let trail = ctx.ancestors(None, None).map(|n| n.title()).join(" < ");
            output::info(&trail);
        }
        Commands::Descendants { all: unfiltered } => {
            print_nodes(ctx.descendants(ctx.current_id(), unfiltered.then_some(&all)));
        }
        Commands::Siblings => print_nodes(ctx.siblings(None)),
        Commands::Children => print_nodes(ctx.children(ctx.current_id(), None)),
        Commands::Level => output::info(&ctx.level(None)),
        Commands::Link { url } => {
            let id = lookup(ctx, url.as_deref())?;
            if let Some(node) = ctx.node(id) {
                output::info(&ctx.link_to(node).class(ctx.navigation_class(node)));
            }
        }
        Commands::Display { name } => print_value(&ctx.display().get(name)),
        Commands::Data { name } => print_value(&ctx.data().get(name)),
        Commands::Names => {
            let displayables: BTreeSet<&str> = container.site.host.names().collect();
            for name in ctx.display().available_names() {
                if displayables.contains(name) {
                    output::info(&format!("{} {}", name, "(displayable)".cyan()));
                } else {
                    output::info(name);
                }
            }
        }
        Commands::Find { url } => {
            let root = lookup(ctx, url.as_deref())?;
            let query = ctx.find_descendant(Some(root));
            output::header(&query.query().pattern);
            print_nodes(query.execute().into_iter().filter_map(|id| ctx.node(id)));
        }
        Commands::Config { .. } | Commands::Completion { .. } => {}
    }
    Ok(())
}

fn print_value(value: &AttributeValue) {
    if value.is_null() {
        output::detail(&"(null)".dimmed());
    } else {
        output::info(value);
    }
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            let toml = settings.to_toml().map_err(|e| CliError::Infra(e.into()))?;
            output::info(&toml);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            output::action("global", &global);
            match site_dir(cli) {
                Some(dir) => output::action("site", &site_config_path(dir).display()),
                None => output::action("site", &"(no --site given)"),
            }
        }
    }
    Ok(())
}
