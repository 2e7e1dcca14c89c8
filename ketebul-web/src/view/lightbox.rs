//! Media lightbox over one gallery's images
//!
//! CLOSED -> OPEN on selecting an image, OPEN -> CLOSED on the close button,
//! a backdrop click or Escape. Navigation wraps cyclically. The page scroll
//! lock and the keyboard listener are held exactly while the lightbox is
//! open, and both are released when the lightbox is dropped.

use ketebul_common::{Error, Result, FALLBACK_IMAGE_URL};
use serde::Serialize;

use super::image_view::{ImageMarkup, ResilientImageView};
use super::scroll_lock::{ScrollLock, ScrollLockGuard};

/// One image in the gallery, already resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

/// `{ is_open, current_index }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GalleryState {
    pub is_open: bool,
    pub current_index: usize,
}

/// Keys the lightbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Where a pointer click landed inside the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The displayed image; propagation to the backdrop is stopped
    Image,
    Backdrop,
    CloseButton,
    NextButton,
    PrevButton,
}

impl ClickTarget {
    /// Map the `target` parameter of a navigation link
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "image" => Some(ClickTarget::Image),
            "backdrop" => Some(ClickTarget::Backdrop),
            "close" => Some(ClickTarget::CloseButton),
            "next" => Some(ClickTarget::NextButton),
            "prev" => Some(ClickTarget::PrevButton),
            _ => None,
        }
    }
}

/// Render-ready overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxView {
    pub index: usize,
    /// 1-based position for display
    pub position: usize,
    pub total: usize,
    pub src: String,
    pub alt: String,
    /// Enlarged image, tracked like any other image slot
    pub image: ImageMarkup,
    pub next_index: usize,
    pub prev_index: usize,
}

#[derive(Debug)]
pub struct MediaLightbox {
    images: Vec<GalleryImage>,
    state: GalleryState,
    scroll_lock: ScrollLock,
    scroll_guard: Option<ScrollLockGuard>,
    display: ResilientImageView,
}

impl MediaLightbox {
    pub fn new(images: Vec<GalleryImage>, scroll_lock: ScrollLock) -> Self {
        Self {
            images,
            state: GalleryState::default(),
            scroll_lock,
            scroll_guard: None,
            display: ResilientImageView::new("", "", FALLBACK_IMAGE_URL),
        }
    }

    /// Replace the image shown when an enlarged image fails to load
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.display = ResilientImageView::new("", "", fallback);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn state(&self) -> GalleryState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Whether the keyboard bindings are attached (only while open)
    pub fn is_listening(&self) -> bool {
        self.scroll_guard.is_some()
    }

    /// Open on image `index`
    pub fn open(&mut self, index: usize) -> Result<()> {
        if index >= self.images.len() {
            return Err(Error::InvalidInput(format!(
                "Image index {} out of range for gallery of {}",
                index,
                self.images.len()
            )));
        }

        self.state.current_index = index;
        if !self.state.is_open {
            self.state.is_open = true;
            self.scroll_guard = Some(self.scroll_lock.acquire());
            tracing::debug!(
                index,
                total = self.images.len(),
                scroll_holders = self.scroll_lock.holders(),
                "Lightbox opened"
            );
        }
        self.sync_display();
        Ok(())
    }

    pub fn close(&mut self) {
        if !self.state.is_open {
            return;
        }
        self.state.is_open = false;
        self.scroll_guard = None;
        tracing::debug!("Lightbox closed");
    }

    pub fn next(&mut self) {
        if self.state.is_open {
            let count = self.images.len();
            self.state.current_index = (self.state.current_index + 1) % count;
            self.sync_display();
        }
    }

    pub fn previous(&mut self) {
        if self.state.is_open {
            let count = self.images.len();
            self.state.current_index = (self.state.current_index + count - 1) % count;
            self.sync_display();
        }
    }

    /// Point the enlarged image at the current index
    fn sync_display(&mut self) {
        if let Some(image) = self.images.get(self.state.current_index) {
            self.display.set_source(image.src.clone());
            self.display.set_alt(image.alt.clone());
        }
    }

    /// Keyboard input; returns whether the key was consumed
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_listening() {
            return false;
        }
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.previous(),
            Key::Escape => self.close(),
            Key::Other => return false,
        }
        true
    }

    /// Pointer input inside the overlay
    pub fn click(&mut self, target: ClickTarget) {
        if !self.state.is_open {
            return;
        }
        match target {
            ClickTarget::Image => {}
            ClickTarget::Backdrop | ClickTarget::CloseButton => self.close(),
            ClickTarget::NextButton => self.next(),
            ClickTarget::PrevButton => self.previous(),
        }
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        if self.state.is_open {
            self.images.get(self.state.current_index)
        } else {
            None
        }
    }

    pub fn view(&self) -> Option<LightboxView> {
        let image = self.current()?;
        let count = self.images.len();
        let index = self.state.current_index;

        Some(LightboxView {
            index,
            position: index + 1,
            total: count,
            src: image.src.clone(),
            alt: image.alt.clone(),
            image: self.display.markup(),
            next_index: (index + 1) % count,
            prev_index: (index + count - 1) % count,
        })
    }
}
