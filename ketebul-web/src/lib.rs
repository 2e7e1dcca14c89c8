//! ketebul-web library - public content site
//!
//! Server-rendered pages over the remote content store: updates, artists,
//! projects, gallery (with lightbox), blog, books, team and events, plus the
//! static about and contact pages.

use std::sync::Arc;

use axum::Router;
use ketebul_common::config::{ContactConfig, EventEntry, GalleryEntry, SiteConfig, TeamEntry};
use ketebul_common::{ContentRecord, ImageReference, ImageResolver, RecordKind, RemoteContentClient};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod render;
pub mod view;

use render::Templates;
use view::ContentLoader;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Content store client
    pub client: RemoteContentClient,
    /// Page loads, guarded against stale responses per view
    pub loader: ContentLoader,
    /// Image reference resolution
    pub images: ImageResolver,
    /// Compiled page templates
    pub templates: Arc<Templates>,
    /// Locally configured collections; the store is queried for any left empty
    pub local: Arc<LocalContent>,
    pub contact: Arc<ContactConfig>,
}

/// Collections maintained in the config file instead of the store
#[derive(Debug, Default)]
pub struct LocalContent {
    pub gallery: Vec<ContentRecord>,
    pub team: Vec<ContentRecord>,
    pub events: Vec<ContentRecord>,
}

impl LocalContent {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            gallery: config.gallery.iter().enumerate().map(gallery_record).collect(),
            team: config.team.iter().enumerate().map(team_record).collect(),
            events: config.events.iter().enumerate().map(event_record).collect(),
        }
    }

    /// Configured records of `kind`, or `None` when the store supplies them
    pub fn records(&self, kind: RecordKind) -> Option<&[ContentRecord]> {
        let records = match kind {
            RecordKind::Gallery => &self.gallery,
            RecordKind::Team => &self.team,
            RecordKind::Event => &self.events,
            _ => return None,
        };
        (!records.is_empty()).then_some(records.as_slice())
    }
}

fn gallery_record((index, entry): (usize, &GalleryEntry)) -> ContentRecord {
    let record = ContentRecord::new(RecordKind::Gallery, format!("gallery-{}", index + 1), &entry.alt)
        .with_image(ImageReference::new(&entry.src));
    match &entry.category {
        Some(category) => record.with_category(category),
        None => record,
    }
}

fn team_record((index, entry): (usize, &TeamEntry)) -> ContentRecord {
    let mut record =
        ContentRecord::new(RecordKind::Team, format!("team-{}", index + 1), &entry.name).with_role(&entry.role);
    if let Some(photo) = &entry.photo {
        record = record.with_image(ImageReference::new(photo));
    }
    if let Some(bio) = &entry.bio {
        record = record.with_body(bio);
    }
    record
}

fn event_record((index, entry): (usize, &EventEntry)) -> ContentRecord {
    let mut record = ContentRecord::new(RecordKind::Event, format!("event-{}", index + 1), &entry.title)
        .with_date(entry.date)
        .with_venue(&entry.location);
    if let Some(description) = &entry.description {
        record = record.with_body(description);
    }
    if let Some(image) = &entry.image {
        record = record.with_image(ImageReference::new(image));
    }
    record
}

impl AppState {
    /// Create new application state
    pub fn new(client: RemoteContentClient, images: ImageResolver, templates: Templates) -> Self {
        Self {
            loader: ContentLoader::new(client.clone()),
            client,
            images,
            templates: Arc::new(templates),
            local: Arc::new(LocalContent::default()),
            contact: Arc::new(ContactConfig::default()),
        }
    }

    /// Build state from loaded configuration
    pub fn from_config(config: &SiteConfig) -> anyhow::Result<Self> {
        let client = RemoteContentClient::new(&config.content_store)?;
        let images = ImageResolver::new(
            &config.images,
            &config.content_store.project_id,
            &config.content_store.dataset,
        );
        let templates = Templates::new()?;

        Ok(Self::new(client, images, templates)
            .with_local(LocalContent::from_config(config))
            .with_contact(config.contact.clone()))
    }

    pub fn with_local(mut self, local: LocalContent) -> Self {
        self.local = Arc::new(local);
        self
    }

    pub fn with_contact(mut self, contact: ContactConfig) -> Self {
        self.contact = Arc::new(contact);
        self
    }
}

/// Build application router
///
/// `public_dir`, when given, serves local image paths and other static files
/// for any route not matched below.
pub fn build_router(state: AppState, public_dir: Option<&std::path::Path>) -> Router {
    use axum::routing::get;

    let pages = Router::new()
        .route("/", get(api::index))
        .route("/updates", get(api::updates_page))
        .route("/artists", get(api::artists_page))
        .route("/artists/:slug", get(api::artist_profile))
        .route("/projects", get(api::projects_page))
        .route("/gallery", get(api::gallery_page))
        .route("/blog", get(api::blog_page))
        .route("/books", get(api::books_page))
        .route("/team", get(api::team_page))
        .route("/events", get(api::events_page))
        .route("/about", get(api::about_page))
        .route("/contact", get(api::contact_page).post(api::submit_contact));

    let api_routes = Router::new()
        .route("/api/content/:kind", get(api::get_content))
        .route("/api/image-state", get(api::image_state))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/static/site.css", get(api::serve_site_css))
        .route("/static/site.js", get(api::serve_site_js))
        .merge(api::health_routes());

    let router = Router::new().merge(pages).merge(api_routes);

    let router = match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
