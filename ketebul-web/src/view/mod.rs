//! Display components
//!
//! Plain state machines driven by the page handlers and serialized into
//! templates. The browser script only forwards load/error/key events back to
//! the same transitions (`/api/image-state` for images, gallery query
//! parameters for the lightbox).

pub mod contact;
pub mod grid;
pub mod image_view;
pub mod lightbox;
pub mod loader;
pub mod rich_text;
pub mod scroll_lock;

pub use contact::{ContactForm, ContactMessage, FieldError};
pub use grid::{CategoryFilter, ContentGrid, GridView};
pub use image_view::{ImageEvent, ImageMarkup, ImagePhase, ResilientImageView};
pub use lightbox::{ClickTarget, GalleryImage, Key, MediaLightbox};
pub use loader::{ContentLoader, LoadOutcome};
pub use scroll_lock::ScrollLock;
