//! HTTP handlers for ketebul-web

pub mod buildinfo;
pub mod content;
pub mod health;
pub mod image_state;
pub mod pages;
pub mod ui;

pub use buildinfo::get_build_info;
pub use content::get_content;
pub use health::health_routes;
pub use image_state::image_state;
pub use pages::{
    about_page, artist_profile, artists_page, blog_page, books_page, contact_page, events_page,
    gallery_page, index, projects_page, submit_contact, team_page, updates_page,
};
pub use ui::{serve_site_css, serve_site_js};
