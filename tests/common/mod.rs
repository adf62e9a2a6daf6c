//! Shared site fixture for integration tests.
//!
//! ```text
//! Site (/_root/)
//! └── Home (/)                         start page
//!     ├── About (/about/)
//!     │   ├── Team (/about/team/)
//!     │   │   └── Alice (/about/team/alice/)
//!     │   └── History (/about/history/)   hidden
//!     │       └── Founding (/about/history/founding/)
//!     ├── News (/news/)                 unpublished
//!     ├── Sidebar (/sidebar/)           part
//!     └── Contact (/contact/)           own link
//! ```
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use contentnav::application::services::NavigationContext;
use contentnav::config::Settings;
use contentnav::infrastructure::di::ServiceContainer;

pub const SITE: &str = r#"
start_page = "home"

[displayables]
Heading = "<h1>{value}</h1>"
Teaser = "<p class=\"teaser\">{value}</p>"
Banner = "<div>{value}</div>"

[[nodes]]
name = "root"
title = "Site"
url = "/_root/"

[[nodes]]
name = "home"
parent = "root"
title = "Home"
url = "/"
attributes = { Heading = "Welcome & hi", Visits = 42 }

[[nodes]]
name = "about"
parent = "home"
title = "About"
attributes = { Teaser = "Who we are" }

[[nodes]]
name = "team"
parent = "about"
title = "Team"

[[nodes]]
name = "alice"
parent = "team"
title = "Alice"

[[nodes]]
name = "history"
parent = "about"
title = "History"
visible = false

[[nodes]]
name = "founding"
parent = "history"
title = "Founding"

[[nodes]]
name = "news"
parent = "home"
title = "News"
published = false

[[nodes]]
name = "sidebar"
parent = "home"
title = "Sidebar"
kind = "part"

[[nodes]]
name = "contact"
parent = "home"
title = "Contact"
link = { text = "Write us", href = "mailto:hello@example.org", target = "_blank" }
"#;

/// Site file in a temp directory; keep the `TempDir` alive for the test.
pub struct SiteDir {
    pub dir: TempDir,
    pub site_file: PathBuf,
}

impl SiteDir {
    pub fn new() -> Self {
        Self::with_content(SITE)
    }

    pub fn with_content(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let site_file = dir.path().join("site.toml");
        fs::write(&site_file, content).unwrap();
        Self { dir, site_file }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn container(&self) -> ServiceContainer {
        ServiceContainer::new(Settings::default(), &self.site_file).unwrap()
    }
}

pub fn context(container: &ServiceContainer, path: &str) -> NavigationContext {
    container.context_for(path).unwrap()
}

pub fn titles<'a>(nodes: impl IntoIterator<Item = &'a contentnav::domain::ContentNode>) -> Vec<&'a str> {
    nodes.into_iter().map(|n| n.title()).collect()
}
