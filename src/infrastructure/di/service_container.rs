//! Service container for dependency injection
//!
//! Wires settings, the filesystem and a loaded site into the collaborators
//! every navigation context shares.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::{Collaborators, NavigationContext, NavigationOptions};
use crate::application::ApplicationError;
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::site::{load_site, Site};
use crate::infrastructure::traits::{
    ArenaFinder, CurrentNodeResolver, FileSystem, RealFileSystem, UrlResolver,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// The loaded site
    pub site: Arc<Site>,

    collaborators: Collaborators,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, site_file: &Path) -> InfraResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem), site_file)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        site_file: &Path,
    ) -> InfraResult<Self> {
        let site = Arc::new(load_site(fs.as_ref(), site_file)?);
        debug!("loaded site {} ({} nodes)", site_file.display(), site.arena.len());

        let collaborators = Collaborators {
            graph: site.arena.clone(),
            host: Arc::new(site.host.clone()),
            roots: Arc::new(site.roots),
            finder: Arc::new(ArenaFinder::new(site.arena.clone())),
        };

        Ok(Self {
            settings: Arc::new(settings),
            fs,
            site,
            collaborators,
        })
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn options(&self) -> NavigationOptions {
        NavigationOptions::from(self.settings.as_ref())
    }

    /// Navigation context for the node whose url is `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn context_for(&self, path: &str) -> InfraResult<NavigationContext> {
        let resolver = UrlResolver::new(self.site.arena.clone(), path);
        if resolver.current_node().is_none() {
            return Err(ApplicationError::NodeNotFound(path.to_string()).into());
        }
        Ok(NavigationContext::new(
            self.collaborators.clone(),
            &resolver,
            self.options(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::infrastructure::InfraError;

    struct MemoryFs(String);

    impl FileSystem for MemoryFs {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            Ok(self.0.clone())
        }

        fn is_file(&self, _path: &Path) -> bool {
            true
        }
    }

    const SITE: &str = r#"
[[nodes]]
name = "root"
title = "Home"

[[nodes]]
name = "docs"
parent = "root"
"#;

    fn container() -> ServiceContainer {
        ServiceContainer::with_deps(
            Settings::default(),
            Arc::new(MemoryFs(SITE.to_string())),
            Path::new("site.toml"),
        )
        .unwrap()
    }

    #[test]
    fn context_for_resolves_the_node_by_url() {
        let container = container();
        let ctx = container.context_for("/docs/").unwrap();
        assert_eq!(ctx.current().unwrap().title(), "docs");
        assert_eq!(ctx.level(None), 1);
    }

    #[test]
    fn context_for_unknown_url_is_not_found() {
        let container = container();
        let err = container.context_for("/missing/").err().unwrap();
        assert!(matches!(
            err,
            InfraError::Application(ApplicationError::NodeNotFound(ref p)) if p == "/missing/"
        ));
    }
}
