//! Content record model
//!
//! Records are authored in the external content store and are read-only here.
//! Two wire shapes are accepted: hosted CMS documents (`_id`, `slug.current`,
//! portable-text `content`, asset-referenced images) and the REST API shape
//! (`id`, plain `slug`, absolute image URLs, plain-text bodies).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::StoreBackend;
use crate::image::ImageReference;
use crate::{Error, Result};

/// Default call-to-action label for update cards
pub const DEFAULT_BUTTON_TEXT: &str = "More Details";

/// Record type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Update,
    Artist,
    Book,
    Post,
    Project,
    Gallery,
    Team,
    Event,
}

impl RecordKind {
    pub const ALL: [RecordKind; 8] = [
        RecordKind::Update,
        RecordKind::Artist,
        RecordKind::Book,
        RecordKind::Post,
        RecordKind::Project,
        RecordKind::Gallery,
        RecordKind::Team,
        RecordKind::Event,
    ];

    /// Document type name in the hosted CMS
    pub fn document_type(&self) -> &'static str {
        match self {
            RecordKind::Update => "update",
            RecordKind::Artist => "artist",
            RecordKind::Book => "book",
            RecordKind::Post => "post",
            RecordKind::Project => "project",
            RecordKind::Gallery => "galleryImage",
            RecordKind::Team => "teamMember",
            RecordKind::Event => "event",
        }
    }

    /// Collection path segment in the REST API
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Update => "updates",
            RecordKind::Artist => "artists",
            RecordKind::Book => "books",
            RecordKind::Post => "posts",
            RecordKind::Project => "projects",
            RecordKind::Gallery => "gallery",
            RecordKind::Team => "team",
            RecordKind::Event => "events",
        }
    }

    /// Ordering requested from `backend` when the caller has no preference
    ///
    /// Posts carry `date` in the CMS but only `created_at` in the REST API.
    pub fn default_ordering(&self, backend: StoreBackend) -> Ordering {
        match (self, backend) {
            (RecordKind::Update, _) => Ordering::desc("date"),
            (RecordKind::Artist, _) => Ordering::asc("name"),
            (RecordKind::Book, _) => Ordering::asc("title"),
            (RecordKind::Post, StoreBackend::Cms) => Ordering::desc("date"),
            (RecordKind::Post, StoreBackend::Rest) => Ordering::desc("created_at"),
            (RecordKind::Event, _) => Ordering::asc("date"),
            (RecordKind::Project | RecordKind::Gallery | RecordKind::Team, _) => Ordering::asc("order"),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| s == kind.collection() || s == kind.document_type())
            .ok_or_else(|| Error::InvalidInput(format!("Unknown record kind: {}", s)))
    }
}

/// Sort direction for [`Ordering`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering key delegated to the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }

    /// `order(date desc)` clause for a CMS query
    pub fn to_query_clause(&self) -> String {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        format!("order({} {})", self.field, dir)
    }

    /// `-date` style parameter for the REST API
    pub fn to_rest_param(&self) -> String {
        match self.direction {
            Direction::Asc => self.field.clone(),
            Direction::Desc => format!("-{}", self.field),
        }
    }
}

/// Display-ordering key carried by a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum OrderKey {
    Position(i64),
    Date(NaiveDate),
    None,
}

/// Outbound link attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub target: String,
    /// True for absolute URLs that leave the site
    pub external: bool,
}

impl Link {
    /// Classify a raw link; blank input yields no link
    pub fn parse(raw: &str) -> Option<Link> {
        let target = raw.trim();
        if target.is_empty() {
            return None;
        }

        let external = !target.starts_with('/') || target.starts_with("//");
        Some(Link {
            target: target.to_string(),
            external,
        })
    }

    pub fn internal(route: String) -> Link {
        Link {
            target: route,
            external: false,
        }
    }
}

/// One span of rich text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

/// One rich-text block (paragraph or list item)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default = "default_block_style")]
    pub style: String,
    #[serde(rename = "listItem", default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default)]
    pub children: Vec<Span>,
}

fn default_block_style() -> String {
    "normal".to_string()
}

impl TextBlock {
    pub fn text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Free-text body of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Blocks(Vec<TextBlock>),
}

impl Body {
    /// Flattened text, one line per block
    pub fn plain_text(&self) -> String {
        match self {
            Body::Text(text) => text.clone(),
            Body::Blocks(blocks) => blocks
                .iter()
                .map(TextBlock::text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// One unit of displayable content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub id: String,
    pub kind: RecordKind,
    pub title: String,
    pub slug: Option<String>,
    pub order_key: OrderKey,
    pub date: Option<NaiveDate>,
    pub body: Option<Body>,
    pub image: Option<ImageReference>,
    pub link: Option<Link>,
    pub category: Option<String>,
    pub venue: Option<String>,
    /// Position held, for team members
    pub role: Option<String>,
    pub button_text: Option<String>,
}

impl ContentRecord {
    /// Minimal record, used for locally configured entries
    pub fn new(kind: RecordKind, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            slug: None,
            order_key: OrderKey::None,
            date: None,
            body: None,
            image: None,
            link: None,
            category: None,
            venue: None,
            role: None,
            button_text: None,
        }
    }

    pub fn with_image(mut self, image: ImageReference) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self.order_key = OrderKey::Date(date);
        self
    }

    pub fn with_body(mut self, text: impl Into<String>) -> Self {
        self.body = Some(Body::Text(text.into()));
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Decode one store document
    pub fn from_document(kind: RecordKind, document: serde_json::Value) -> Result<Self> {
        let raw: RawDocument = serde_json::from_value(document)
            .map_err(|e| Error::Parse(format!("Malformed {} document: {}", kind.document_type(), e)))?;
        raw.into_record(kind)
    }

    /// Body text as a single string (empty when absent)
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Body::plain_text).unwrap_or_default()
    }

    /// Call-to-action label, defaulted for kinds that show a button
    pub fn button_label(&self) -> Option<&str> {
        match (&self.button_text, self.kind) {
            (Some(text), _) => Some(text.as_str()),
            (None, RecordKind::Update) => Some(DEFAULT_BUTTON_TEXT),
            (None, _) => None,
        }
    }
}

/// Decode a full result set; any malformed record fails the whole set
pub fn decode_records(kind: RecordKind, documents: Vec<serde_json::Value>) -> Result<Vec<ContentRecord>> {
    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| {
            ContentRecord::from_document(kind, document)
                .map_err(|e| Error::Parse(format!("record {}: {}", index, e)))
        })
        .collect()
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "_id")]
    cms_id: Option<String>,
    id: Option<serde_json::Value>,
    title: Option<String>,
    name: Option<String>,
    slug: Option<RawSlug>,
    date: Option<String>,
    created_at: Option<String>,
    venue: Option<String>,
    location: Option<String>,
    role: Option<String>,
    #[serde(rename = "mainImage")]
    main_image: Option<RawImage>,
    image: Option<RawImage>,
    cover: Option<RawImage>,
    photo: Option<RawImage>,
    content: Option<Body>,
    description: Option<String>,
    bio: Option<String>,
    #[serde(rename = "buttonText")]
    button_text: Option<String>,
    #[serde(rename = "buttonLink")]
    button_link: Option<String>,
    download_link: Option<String>,
    order: Option<f64>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSlug {
    Cms { current: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImage {
    Url(String),
    Asset { asset: RawAssetRef },
}

#[derive(Debug, Deserialize)]
struct RawAssetRef {
    #[serde(rename = "_ref", alias = "url")]
    reference: String,
}

impl RawDocument {
    fn into_record(self, kind: RecordKind) -> Result<ContentRecord> {
        let id = match (self.cms_id, self.id) {
            (Some(id), _) if !id.is_empty() => id,
            (_, Some(serde_json::Value::String(id))) if !id.is_empty() => id,
            (_, Some(serde_json::Value::Number(n))) => n.to_string(),
            _ => return Err(Error::Parse("document has no identifier".to_string())),
        };

        let title = self
            .title
            .or(self.name)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Parse(format!("document {} has no title", id)))?;

        let slug = self.slug.map(|s| match s {
            RawSlug::Cms { current } => current,
            RawSlug::Plain(slug) => slug,
        });

        let date = match self.date.as_deref().or(self.created_at.as_deref()) {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };

        let order_key = match (self.order, date) {
            (Some(position), _) => OrderKey::Position(position as i64),
            (None, Some(d)) => OrderKey::Date(d),
            (None, None) => OrderKey::None,
        };

        let body = self
            .content
            .or(self.description.map(Body::Text))
            .or(self.bio.map(Body::Text));

        let image = self
            .main_image
            .or(self.image)
            .or(self.cover)
            .or(self.photo)
            .map(|img| match img {
                RawImage::Url(url) => ImageReference::new(url),
                RawImage::Asset { asset } => ImageReference::new(asset.reference),
            });

        let explicit_link = self
            .button_link
            .as_deref()
            .and_then(Link::parse)
            .or_else(|| self.download_link.as_deref().and_then(Link::parse));

        let link = explicit_link.or_else(|| {
            let slug = slug.as_deref().filter(|s| !s.is_empty())?;
            match kind {
                RecordKind::Update | RecordKind::Artist => {
                    Some(Link::internal(format!("/{}/{}", kind.collection(), slug)))
                }
                _ => None,
            }
        });

        Ok(ContentRecord {
            id,
            kind,
            title,
            slug,
            order_key,
            date,
            body,
            image,
            link,
            category: self.category,
            venue: self.venue.or(self.location),
            role: self.role,
            button_text: self.button_text,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|e| Error::Parse(format!("Invalid date '{}': {}", raw, e)))
}
