//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/contentnav/contentnav.toml`
//! 3. Site config: `<site_dir>/.contentnav.toml` (next to the site file)
//! 4. Environment variables: `CONTENTNAV_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::NavigationOptions;
use crate::application::ApplicationError;
use crate::domain::NavigationFilter;

/// Menu rendering defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Levels below the tree root that are built
    pub take_levels: usize,
    /// CSS class of the current node
    pub current_class: String,
    /// CSS class of the current node's ancestors
    pub trail_class: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            take_levels: 3,
            current_class: "current".into(),
            trail_class: "trail".into(),
        }
    }
}

/// Relaxations of the default navigation filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FilterConfig {
    pub include_hidden: bool,
    pub include_unpublished: bool,
    pub include_parts: bool,
}

impl From<FilterConfig> for NavigationFilter {
    fn from(cfg: FilterConfig) -> Self {
        NavigationFilter {
            include_hidden: cfg.include_hidden,
            include_unpublished: cfg.include_unpublished,
            include_parts: cfg.include_parts,
        }
    }
}

/// Raw navigation section; `None` means "inherit from the layer below".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawNavigationConfig {
    pub take_levels: Option<usize>,
    pub current_class: Option<String>,
    pub trail_class: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawFilterConfig {
    pub include_hidden: Option<bool>,
    pub include_unpublished: Option<bool>,
    pub include_parts: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub site_file: Option<PathBuf>,
    pub navigation: RawNavigationConfig,
    pub filter: RawFilterConfig,
}

/// Unified configuration for contentnav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Site file to load when `--site` is not given
    pub site_file: Option<PathBuf>,
    pub navigation: NavigationConfig,
    pub filter: FilterConfig,
}

/// Get the XDG config directory for contentnav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "contentnav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("contentnav.toml"))
}

/// Get the path to the site-local config file.
pub fn site_config_path(site_dir: &Path) -> PathBuf {
    site_dir.join(".contentnav.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; the input is returned unchanged on lookup failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in the site path.
    fn expand_paths(&mut self) {
        if let Some(site) = &self.site_file {
            self.site_file = Some(PathBuf::from(expand_env_vars(&site.to_string_lossy())));
        }
    }

    /// Overlay wins field by field where it is set.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let nav = &overlay.navigation;
        let filter = &overlay.filter;
        Self {
            site_file: overlay.site_file.clone().or_else(|| self.site_file.clone()),
            navigation: NavigationConfig {
                take_levels: nav.take_levels.unwrap_or(self.navigation.take_levels),
                current_class: nav
                    .current_class
                    .clone()
                    .unwrap_or_else(|| self.navigation.current_class.clone()),
                trail_class: nav
                    .trail_class
                    .clone()
                    .unwrap_or_else(|| self.navigation.trail_class.clone()),
            },
            filter: FilterConfig {
                include_hidden: filter.include_hidden.unwrap_or(self.filter.include_hidden),
                include_unpublished: filter
                    .include_unpublished
                    .unwrap_or(self.filter.include_unpublished),
                include_parts: filter.include_parts.unwrap_or(self.filter.include_parts),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `site_dir` - Optional directory holding the site file and its local config
    pub fn load(site_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = site_dir {
            let local_path = site_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply CONTENTNAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CONTENTNAV")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("site_file") {
            settings.site_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get::<usize>("navigation.take_levels") {
            settings.navigation.take_levels = val;
        }
        if let Ok(val) = config.get_string("navigation.current_class") {
            settings.navigation.current_class = val;
        }
        if let Ok(val) = config.get_string("navigation.trail_class") {
            settings.navigation.trail_class = val;
        }
        if let Ok(val) = config.get_bool("filter.include_hidden") {
            settings.filter.include_hidden = val;
        }
        if let Ok(val) = config.get_bool("filter.include_unpublished") {
            settings.filter.include_unpublished = val;
        }
        if let Ok(val) = config.get_bool("filter.include_parts") {
            settings.filter.include_parts = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# contentnav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/contentnav/contentnav.toml
#   Site:   <site_dir>/.contentnav.toml
#   Env:    CONTENTNAV_* (e.g. CONTENTNAV_NAVIGATION__TAKE_LEVELS=2)

# Site file used when --site is not given
# site_file = "~/sites/main.toml"

[navigation]
# take_levels = 3
# current_class = "current"
# trail_class = "trail"

[filter]
# include_hidden = false
# include_unpublished = false
# include_parts = false
"#
        .to_string()
    }
}

impl From<&Settings> for NavigationOptions {
    fn from(settings: &Settings) -> Self {
        NavigationOptions {
            take_levels: settings.navigation.take_levels,
            current_class: settings.navigation.current_class.clone(),
            trail_class: settings.navigation.trail_class.clone(),
            filter: settings.filter.into(),
        }
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_converted_then_options_match() {
        let options = NavigationOptions::from(&Settings::default());
        assert_eq!(options, NavigationOptions::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unset_fields_are_inherited() {
        let raw: RawSettings = toml::from_str(
            r#"
[navigation]
trail_class = "active-trail"

[filter]
include_hidden = true
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.navigation.take_levels, 3);
        assert_eq!(merged.navigation.current_class, "current");
        assert_eq!(merged.navigation.trail_class, "active-trail");
        assert!(merged.filter.include_hidden);
        assert!(!merged.filter.include_parts);
        assert_eq!(merged.site_file, None);
    }

    #[test]
    fn given_tilde_in_site_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            site_file: Some(PathBuf::from("~/site.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let site = settings.site_file.unwrap();
        assert!(site.starts_with(&home), "site_file should start with home: {}", site.display());
    }

    #[test]
    fn given_settings_when_to_toml_then_sections_are_rendered() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("[navigation]"));
        assert!(toml.contains("take_levels = 3"));
        assert!(toml.contains("[filter]"));
    }

    #[test]
    fn given_template_when_parsed_then_it_is_valid_raw_settings() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.site_file.is_none());
        assert!(raw.navigation.take_levels.is_none());
    }
}
