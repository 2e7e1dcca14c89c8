//! Server-rendered pages
//!
//! Every page load fetches fresh records through the shared [`ContentLoader`]
//! unless the collection is maintained locally in the config file. A failed
//! fetch renders the page-level error message with 502, a load overtaken by a
//! newer one for the same view renders a refresh message with 503, and an
//! empty result is not an error.
//!
//! [`ContentLoader`]: crate::view::ContentLoader

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use ketebul_common::config::ContactConfig;
use ketebul_common::{ContentRecord, ImageReference, RecordKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::render::PageContext;
use crate::view::lightbox::LightboxView;
use crate::view::{
    rich_text, CategoryFilter, ClickTarget, ContactForm, ContentGrid, FieldError, GalleryImage, GridView,
    ImageMarkup, Key, LoadOutcome, MediaLightbox, ResilientImageView, ScrollLock,
};
use crate::AppState;

const SUPERSEDED_MESSAGE: &str = "This page changed while loading. Please refresh.";

const ARTIST_PROFILE_VIEW: &str = "/artists/:slug";
const GALLERY_PATH: &str = "/gallery";

/// Static description of a listing page
struct Listing {
    kind: RecordKind,
    heading: &'static str,
    path: &'static str,
    template: &'static str,
    empty_message: &'static str,
}

const UPDATES: Listing = Listing {
    kind: RecordKind::Update,
    heading: "Latest Updates",
    path: "/updates",
    template: "updates.html",
    empty_message: "No updates yet. Check back soon.",
};

const ARTISTS: Listing = Listing {
    kind: RecordKind::Artist,
    heading: "Our Artists",
    path: "/artists",
    template: "listing.html",
    empty_message: "No artists to show yet.",
};

const PROJECTS: Listing = Listing {
    kind: RecordKind::Project,
    heading: "Our Projects",
    path: "/projects",
    template: "listing.html",
    empty_message: "No projects in this category.",
};

const BLOG: Listing = Listing {
    kind: RecordKind::Post,
    heading: "Blog",
    path: "/blog",
    template: "listing.html",
    empty_message: "No posts yet.",
};

const BOOKS: Listing = Listing {
    kind: RecordKind::Book,
    heading: "Books",
    path: "/books",
    template: "listing.html",
    empty_message: "No books available yet.",
};

const TEAM: Listing = Listing {
    kind: RecordKind::Team,
    heading: "Our Team",
    path: "/team",
    template: "listing.html",
    empty_message: "Team profiles are coming soon.",
};

const EVENTS: Listing = Listing {
    kind: RecordKind::Event,
    heading: "Upcoming Events",
    path: "/events",
    template: "updates.html",
    empty_message: "No upcoming events. Check back soon.",
};

/// Portraits on the about page, served from the public directory
const ABOUT_STORY_IMAGE: &str = "/gallery/3.jpeg";
const ABOUT_FOUNDER_IMAGE: &str = "/osusa.jpg";

#[derive(Debug, Serialize)]
struct ListingPage {
    heading: &'static str,
    failed: Option<String>,
    grid: Option<GridView>,
}

#[derive(Debug, Serialize)]
struct ArtistPage {
    title: String,
    image: ImageMarkup,
    body_html: String,
}

#[derive(Debug, Serialize)]
struct MessagePage {
    heading: String,
    message: String,
    message_class: &'static str,
    back_href: &'static str,
    back_label: &'static str,
}

#[derive(Debug, Serialize)]
struct GalleryPage {
    failed: Option<String>,
    grid: Option<GridView>,
    category: Option<String>,
    lightbox: Option<LightboxView>,
}

#[derive(Debug, Serialize)]
struct AboutPage {
    story_image: ImageMarkup,
    founder_image: ImageMarkup,
}

#[derive(Debug, Serialize)]
struct ContactPage<'a> {
    contact: &'a ContactConfig,
    form: ContactForm,
    errors: Vec<FieldError>,
    sent: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub category: Option<String>,
}

/// Lightbox navigation arrives as query parameters on `/gallery`
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
    /// Image index the lightbox is showing (absent when closed)
    pub view: Option<usize>,
    /// DOM key name pressed while the lightbox was open
    pub key: Option<String>,
    /// Overlay control that was clicked
    pub target: Option<String>,
}

/// GET /
pub async fn index() -> Redirect {
    Redirect::to(UPDATES.path)
}

/// GET /updates
pub async fn updates_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_listing(&state, &UPDATES, CategoryFilter::All).await
}

/// GET /artists
pub async fn artists_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_listing(&state, &ARTISTS, CategoryFilter::All).await
}

/// GET /projects?category=<C>
pub async fn projects_page(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, PageError> {
    let filter = CategoryFilter::from_param(query.category.as_deref());
    render_listing(&state, &PROJECTS, filter).await
}

/// GET /blog
pub async fn blog_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_listing(&state, &BLOG, CategoryFilter::All).await
}

/// GET /books
pub async fn books_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_listing(&state, &BOOKS, CategoryFilter::All).await
}

/// GET /team
pub async fn team_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_listing(&state, &TEAM, CategoryFilter::All).await
}

/// GET /events
pub async fn events_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_listing(&state, &EVENTS, CategoryFilter::All).await
}

async fn render_listing(
    state: &AppState,
    listing: &Listing,
    filter: CategoryFilter,
) -> Result<Response, PageError> {
    let (status, grid, failed) = match records(state, listing.path, listing.kind).await {
        Ok(records) => {
            let mut grid = ContentGrid::new(records).with_empty_message(listing.empty_message);
            grid.set_filter(filter);
            (StatusCode::OK, Some(grid.view(&state.images)), None)
        }
        Err((status, message)) => (status, None, Some(message)),
    };

    let page = ListingPage {
        heading: listing.heading,
        failed,
        grid,
    };
    let html = state
        .templates
        .render(listing.template, &PageContext::new(listing.heading, listing.path, page))?;
    Ok((status, Html(html)).into_response())
}

/// GET /artists/:slug
pub async fn artist_profile(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, PageError> {
    let records = match load(&state, ARTIST_PROFILE_VIEW, RecordKind::Artist).await {
        Ok(records) => records,
        Err((status, message)) => {
            return render_message(&state, status, "Artist", message, "load-error");
        }
    };

    let Some(artist) = records
        .into_iter()
        .find(|r| r.slug.as_deref() == Some(slug.as_str()))
    else {
        debug!(%slug, "Artist not found");
        return render_message(
            &state,
            StatusCode::NOT_FOUND,
            "Artist not found",
            format!("No artist with the name \"{}\" was found.", slug),
            "empty-state",
        );
    };

    let image = ResilientImageView::for_reference(&state.images, artist.image.as_ref(), artist.title.clone(), None);
    let page = ArtistPage {
        body_html: artist
            .body
            .as_ref()
            .map(rich_text::to_html)
            .unwrap_or_default(),
        image: image.markup(),
        title: artist.title,
    };

    let html = state
        .templates
        .render("artist.html", &PageContext::new(page.title.clone(), ARTISTS.path, page))?;
    Ok(Html(html).into_response())
}

/// GET /gallery?category=<C>&view=<i>&key=<K>&target=<T>
///
/// The lightbox for this document starts closed, opens at `view` when given,
/// then applies the key press or click that produced this request. The body
/// carries the scroll-locked class exactly while it stays open.
pub async fn gallery_page(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Response, PageError> {
    let filter = CategoryFilter::from_param(query.category.as_deref());
    let category = match &filter {
        CategoryFilter::Category(c) => Some(c.clone()),
        CategoryFilter::All => None,
    };

    let (status, grid, images, failed) = match records(&state, GALLERY_PATH, RecordKind::Gallery).await {
        Ok(records) => {
            let mut grid = ContentGrid::new(records).with_empty_message("No images in this gallery yet.");
            grid.set_filter(filter);
            // Enlarged images are requested at full size
            let images: Vec<GalleryImage> = grid
                .visible()
                .into_iter()
                .map(|record| GalleryImage {
                    src: state.images.resolve_optional(record.image.as_ref()),
                    alt: record.title.clone(),
                })
                .collect();
            (StatusCode::OK, Some(grid.view(&state.images)), images, None)
        }
        Err((status, message)) => (status, None, Vec::new(), Some(message)),
    };

    let scroll_lock = ScrollLock::new();
    let mut lightbox = MediaLightbox::new(images, scroll_lock.clone()).with_fallback(state.images.fallback_url());

    if let Some(index) = query.view {
        match lightbox.open(index) {
            Ok(()) => {
                if let Some(key) = query.key.as_deref() {
                    lightbox.handle_key(Key::from_dom(key));
                }
                if let Some(target) = query.target.as_deref().and_then(ClickTarget::from_param) {
                    lightbox.click(target);
                }
            }
            Err(e) => warn!(error = %e, "Ignoring lightbox request"),
        }
    }

    let page = GalleryPage {
        failed,
        grid,
        category,
        lightbox: lightbox.view(),
    };
    let context = PageContext::new("Gallery", GALLERY_PATH, page).with_scroll_locked(scroll_lock.is_locked());
    let html = state.templates.render("gallery.html", &context)?;
    Ok((status, Html(html)).into_response())
}

/// GET /about
pub async fn about_page(State(state): State<AppState>) -> Result<Response, PageError> {
    let portrait = |src: &str, alt: &str| {
        ResilientImageView::for_reference(&state.images, Some(&ImageReference::new(src)), alt, None).markup()
    };
    let page = AboutPage {
        story_image: portrait(ABOUT_STORY_IMAGE, "Ketebul Music studio session"),
        founder_image: portrait(ABOUT_FOUNDER_IMAGE, "Tabu Osusa"),
    };
    let html = state
        .templates
        .render("about.html", &PageContext::new("About Us", "/about", page))?;
    Ok(Html(html).into_response())
}

/// GET /contact
pub async fn contact_page(State(state): State<AppState>) -> Result<Response, PageError> {
    render_contact(&state, StatusCode::OK, ContactForm::default(), Vec::new(), false)
}

/// POST /contact
///
/// Valid submissions are logged and acknowledged; invalid ones re-render the
/// form with the entered values and 422.
pub async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Response, PageError> {
    match form.validate() {
        Ok(message) => {
            info!(
                name = %message.name,
                email = %message.email,
                chars = message.message.chars().count(),
                "Contact message received"
            );
            render_contact(&state, StatusCode::OK, ContactForm::default(), Vec::new(), true)
        }
        Err(errors) => {
            debug!(invalid = errors.len(), "Rejected contact submission");
            render_contact(&state, StatusCode::UNPROCESSABLE_ENTITY, form, errors, false)
        }
    }
}

fn render_contact(
    state: &AppState,
    status: StatusCode,
    form: ContactForm,
    errors: Vec<FieldError>,
    sent: bool,
) -> Result<Response, PageError> {
    let page = ContactPage {
        contact: &state.contact,
        form,
        errors,
        sent,
    };
    let html = state
        .templates
        .render("contact.html", &PageContext::new("Contact Us", "/contact", page))?;
    Ok((status, Html(html)).into_response())
}

/// Records of one kind for `view`, local collections first
async fn records(
    state: &AppState,
    view: &'static str,
    kind: RecordKind,
) -> Result<Vec<ContentRecord>, (StatusCode, String)> {
    match state.local.records(kind) {
        Some(records) => Ok(records.to_vec()),
        None => load(state, view, kind).await,
    }
}

/// Fetch one kind for `view` through the shared loader
///
/// Maps every non-loaded outcome to the status and message the page shows.
async fn load(
    state: &AppState,
    view: &'static str,
    kind: RecordKind,
) -> Result<Vec<ContentRecord>, (StatusCode, String)> {
    match state.loader.load(view, &state.loader.query_for(kind)).await {
        LoadOutcome::Loaded(records) => Ok(records),
        LoadOutcome::Failed(message) => Err((StatusCode::BAD_GATEWAY, message)),
        LoadOutcome::Superseded => Err((StatusCode::SERVICE_UNAVAILABLE, SUPERSEDED_MESSAGE.to_string())),
    }
}

fn render_message(
    state: &AppState,
    status: StatusCode,
    heading: impl Into<String>,
    message: String,
    message_class: &'static str,
) -> Result<Response, PageError> {
    let heading = heading.into();
    let page = MessagePage {
        heading: heading.clone(),
        message,
        message_class,
        back_href: ARTISTS.path,
        back_label: "Back to Artists",
    };
    let html = state
        .templates
        .render("message.html", &PageContext::new(heading, ARTISTS.path, page))?;
    Ok((status, Html(html)).into_response())
}

/// Page rendering errors
#[derive(Debug)]
pub enum PageError {
    Template(minijinja::Error),
}

impl From<minijinja::Error> for PageError {
    fn from(e: minijinja::Error) -> Self {
        PageError::Template(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Template(e) => {
                error!(error = %e, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error rendering page").into_response()
            }
        }
    }
}
