//! Resilient image display unit
//!
//! Tracks one image's load state. The view starts `Loading` whenever its
//! source changes, becomes `Loaded` on a load event, and swaps to the
//! fallback URL on an error. There is no timeout: an image that never
//! reports back stays `Loading`.
//!
//! Pages render the initial state; the browser reports load and error events
//! to `/api/image-state`, which replays the rendered phase and applies the
//! event here.

use ketebul_common::{ImageReference, ImageResolver};
use serde::{Deserialize, Serialize};

/// Load phase of a [`ResilientImageView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePhase {
    #[default]
    Loading,
    Loaded,
    /// Original failed or never resolved; the fallback is displayed
    Failed,
}

/// Browser event reported for a displayed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEvent {
    Load,
    Error,
}

/// `{ loading, resolved_src }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadState {
    pub loading: bool,
    pub resolved_src: String,
}

/// Markup inputs for one image slot
///
/// Placeholder and image are both always rendered so the slot never shifts
/// layout; only their visibility changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMarkup {
    pub src: String,
    /// Source the view was pointed at, before any fallback swap
    pub requested: String,
    pub state: ImagePhase,
    pub fallback: String,
    pub alt: String,
    pub loading: bool,
    pub placeholder_visible: bool,
    pub image_class: &'static str,
}

#[derive(Debug, Clone)]
pub struct ResilientImageView {
    requested: String,
    alt: String,
    fallback: String,
    phase: ImagePhase,
    state: LoadState,
}

impl ResilientImageView {
    pub fn new(src: impl Into<String>, alt: impl Into<String>, fallback: impl Into<String>) -> Self {
        let requested = src.into();
        Self {
            state: LoadState {
                loading: true,
                resolved_src: requested.clone(),
            },
            requested,
            alt: alt.into(),
            fallback: fallback.into(),
            phase: ImagePhase::Loading,
        }
    }

    /// View over a stored reference, resolved at `width` when given
    ///
    /// A missing or unresolvable reference never reaches the browser: the
    /// view starts out already showing the fallback.
    pub fn for_reference(
        resolver: &ImageResolver,
        reference: Option<&ImageReference>,
        alt: impl Into<String>,
        width: Option<u32>,
    ) -> Self {
        let src = match width {
            Some(width) => resolver.resolve_optional_with_width(reference, width),
            None => resolver.resolve_optional(reference),
        };
        let mut view = Self::new(src, alt, resolver.fallback_url());
        if view.requested == view.fallback {
            tracing::debug!(alt = %view.alt, "No usable image reference, rendering fallback");
            view.show_fallback();
        }
        view
    }

    /// Rebuild the view a page rendered in `phase`
    pub fn restore(
        src: impl Into<String>,
        alt: impl Into<String>,
        fallback: impl Into<String>,
        phase: ImagePhase,
    ) -> Self {
        let mut view = Self::new(src, alt, fallback);
        match phase {
            ImagePhase::Loading => {}
            ImagePhase::Loaded => view.on_load(),
            ImagePhase::Failed => view.show_fallback(),
        }
        view
    }

    /// Point the view at a new source; unchanged sources keep their state
    pub fn set_source(&mut self, src: impl Into<String>) {
        let src = src.into();
        if src == self.requested {
            return;
        }
        self.requested = src.clone();
        self.state = LoadState {
            loading: true,
            resolved_src: src,
        };
        self.phase = ImagePhase::Loading;
    }

    /// The displayed image finished loading
    pub fn on_load(&mut self) {
        self.state.loading = false;
        if self.phase == ImagePhase::Loading {
            self.phase = ImagePhase::Loaded;
        }
    }

    /// The displayed image failed; show the fallback
    pub fn on_error(&mut self) {
        self.state.loading = false;

        if self.phase == ImagePhase::Failed {
            // The fallback itself failed; keep it rather than looping
            tracing::debug!(fallback = %self.fallback, "Fallback image failed to load");
            return;
        }

        tracing::warn!(src = %self.requested, "Failed to load image, displaying fallback");
        self.show_fallback();
    }

    pub fn apply(&mut self, event: ImageEvent) {
        match event {
            ImageEvent::Load => self.on_load(),
            ImageEvent::Error => self.on_error(),
        }
    }

    fn show_fallback(&mut self) {
        self.state = LoadState {
            loading: false,
            resolved_src: self.fallback.clone(),
        };
        self.phase = ImagePhase::Failed;
    }

    pub fn set_alt(&mut self, alt: impl Into<String>) {
        self.alt = alt.into();
    }

    pub fn phase(&self) -> ImagePhase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    /// URL currently rendered in the image element
    pub fn rendered_src(&self) -> &str {
        &self.state.resolved_src
    }

    pub fn markup(&self) -> ImageMarkup {
        let loading = self.state.loading;
        ImageMarkup {
            src: self.state.resolved_src.clone(),
            requested: self.requested.clone(),
            state: self.phase,
            fallback: self.fallback.clone(),
            alt: self.alt.clone(),
            loading,
            placeholder_visible: loading,
            image_class: if loading { "opacity-0" } else { "opacity-100" },
        }
    }
}
