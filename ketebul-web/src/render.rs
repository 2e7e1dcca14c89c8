//! Template environment
//!
//! Templates are embedded at compile time and auto-escape because every
//! template name ends in `.html`.

use minijinja::Environment;
use serde::Serialize;

use crate::api::ui::ASSET_VERSION;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("macros.html", include_str!("../templates/macros.html")),
    ("listing.html", include_str!("../templates/listing.html")),
    ("updates.html", include_str!("../templates/updates.html")),
    ("artist.html", include_str!("../templates/artist.html")),
    ("gallery.html", include_str!("../templates/gallery.html")),
    ("message.html", include_str!("../templates/message.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("contact.html", include_str!("../templates/contact.html")),
];

/// Site navigation entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV: &[NavItem] = &[
    NavItem { label: "Updates", href: "/updates" },
    NavItem { label: "About", href: "/about" },
    NavItem { label: "Artists", href: "/artists" },
    NavItem { label: "Projects", href: "/projects" },
    NavItem { label: "Events", href: "/events" },
    NavItem { label: "Gallery", href: "/gallery" },
    NavItem { label: "Blog", href: "/blog" },
    NavItem { label: "Books", href: "/books" },
    NavItem { label: "Team", href: "/team" },
    NavItem { label: "Contact", href: "/contact" },
];

/// Layout fields shared by every page, plus the page's own context
#[derive(Debug, Serialize)]
pub struct PageContext<T: Serialize> {
    pub page_title: String,
    pub active: &'static str,
    pub nav: &'static [NavItem],
    pub asset_version: &'static str,
    pub scroll_locked: bool,
    #[serde(flatten)]
    pub page: T,
}

impl<T: Serialize> PageContext<T> {
    pub fn new(page_title: impl Into<String>, active: &'static str, page: T) -> Self {
        Self {
            page_title: page_title.into(),
            active,
            nav: NAV,
            asset_version: ASSET_VERSION,
            scroll_locked: false,
            page,
        }
    }

    pub fn with_scroll_locked(mut self, locked: bool) -> Self {
        self.scroll_locked = locked;
        self
    }
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}
