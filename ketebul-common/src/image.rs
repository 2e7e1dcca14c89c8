//! Image reference resolution
//!
//! Resolution is total: every reference yields a displayable URL. Anything
//! that cannot be turned into a URL resolves to the fallback image, and load
//! failures of a resolved URL are handled by the view that displays it.

use serde::{Deserialize, Serialize};

use crate::config::ImageConfig;

/// Placeholder shown whenever an image cannot be resolved or loaded
pub const FALLBACK_IMAGE_URL: &str =
    "https://placehold.co/600x400/374151/DAA520?text=Image+Missing";

/// Default CDN host for CMS image assets
pub const DEFAULT_CDN_BASE: &str = "https://cdn.sanity.io";

/// A logical image reference: local path, absolute URL, or CMS asset handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference(String);

/// What kind of reference an [`ImageReference`] holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Path relative to the site's static asset root
    Local(&'a str),
    /// Already-absolute URL
    Remote(&'a str),
    /// CMS asset handle, e.g. `image-<id>-600x400-jpg`
    Asset {
        id: &'a str,
        width: u32,
        height: u32,
        format: &'a str,
    },
    /// Empty reference
    Unresolvable,
}

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn classify(&self) -> ImageSource<'_> {
        let reference = self.0.trim();

        if reference.is_empty() {
            return ImageSource::Unresolvable;
        }
        if reference.starts_with("http://")
            || reference.starts_with("https://")
            || reference.starts_with("data:")
        {
            return ImageSource::Remote(reference);
        }
        // Only a full `<id>-<W>x<H>-<ext>` handle is an asset; `image-banner.jpg` is a file
        if let Some(source) = reference.strip_prefix("image-").and_then(parse_asset_handle) {
            return source;
        }
        ImageSource::Local(reference)
    }
}

impl From<&str> for ImageReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// `<id>-<W>x<H>-<ext>`; the id itself never contains a dash
fn parse_asset_handle(handle: &str) -> Option<ImageSource<'_>> {
    let mut parts = handle.rsplitn(3, '-');
    let format = parts.next()?;
    let dimensions = parts.next()?;
    let id = parts.next()?;

    let (w, h) = dimensions.split_once('x')?;
    let width = w.parse().ok()?;
    let height = h.parse().ok()?;

    if id.is_empty() || format.is_empty() {
        return None;
    }

    Some(ImageSource::Asset {
        id,
        width,
        height,
        format,
    })
}

/// Turns [`ImageReference`]s into fetchable URLs
#[derive(Debug, Clone)]
pub struct ImageResolver {
    static_root: String,
    cdn_base: String,
    project_id: String,
    dataset: String,
    fallback: String,
}

impl ImageResolver {
    pub fn new(config: &ImageConfig, project_id: &str, dataset: &str) -> Self {
        Self {
            static_root: config.static_root.trim_end_matches('/').to_string(),
            cdn_base: config.cdn_base.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
            fallback: config.fallback_url.clone(),
        }
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback
    }

    /// Resolve a reference; never fails
    pub fn resolve(&self, reference: &ImageReference) -> String {
        match reference.classify() {
            ImageSource::Remote(url) => url.to_string(),
            ImageSource::Local(path) => self.local_url(path),
            ImageSource::Asset {
                id,
                width,
                height,
                format,
            } => {
                if self.project_id.is_empty() {
                    tracing::warn!(
                        reference = %reference.as_str(),
                        "CMS asset reference without a configured project; using fallback"
                    );
                    return self.fallback.clone();
                }
                format!(
                    "{}/images/{}/{}/{}-{}x{}.{}",
                    self.cdn_base, self.project_id, self.dataset, id, width, height, format
                )
            }
            ImageSource::Unresolvable => {
                tracing::debug!(reference = %reference.as_str(), "Unresolvable image reference");
                self.fallback.clone()
            }
        }
    }

    /// Resolve an optional reference; absence maps to the fallback
    pub fn resolve_optional(&self, reference: Option<&ImageReference>) -> String {
        match reference {
            Some(reference) => self.resolve(reference),
            None => self.fallback.clone(),
        }
    }

    /// Resolve an optional reference with a width hint
    pub fn resolve_optional_with_width(&self, reference: Option<&ImageReference>, width: u32) -> String {
        match reference {
            Some(reference) => self.resolve_with_width(reference, width),
            None => self.fallback.clone(),
        }
    }

    /// Resolve with a width hint; only CDN assets are resized
    pub fn resolve_with_width(&self, reference: &ImageReference, width: u32) -> String {
        let url = self.resolve(reference);
        if matches!(reference.classify(), ImageSource::Asset { .. }) && url != self.fallback {
            format!("{}?w={}&auto=format", url, width)
        } else {
            url
        }
    }

    fn local_url(&self, path: &str) -> String {
        let path = path.trim_start_matches("./");
        if path.starts_with('/') {
            format!("{}{}", self.static_root, path)
        } else {
            format!("{}/{}", self.static_root, path)
        }
    }
}
