//! # Ketebul Common Library
//!
//! Shared code for the Ketebul site services including:
//! - Content record model and wire decoding
//! - Remote content store client
//! - Image reference resolution with fallback
//! - Configuration loading
//! - Stale-response guard for in-flight fetches

pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch_guard;
pub mod image;

pub use client::{ContentQuery, RemoteContentClient};
pub use content::{ContentRecord, RecordKind};
pub use error::{Error, Result};
pub use image::{ImageReference, ImageResolver, FALLBACK_IMAGE_URL};
