//! Integration tests for ketebul-web routes
//!
//! Tests cover:
//! - Health and build info endpoints, versioned static assets
//! - Listing pages: store order, failure state (502), empty state
//! - Project category filter
//! - Artist profile lookup and not-found page
//! - Gallery lightbox navigation and the scroll-locked body class
//! - Image slot transitions through /api/image-state
//! - Team and events from config or store, about and contact pages
//! - Raw content JSON API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ketebul_common::config::{
    ContentStoreConfig, EventEntry, GalleryEntry, SiteConfig, StoreBackend, TeamEntry,
};
use ketebul_common::FALLBACK_IMAGE_URL;
use ketebul_web::{build_router, AppState};
use mockito::{Matcher, Mock, Server};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: site configuration pointed at the mock REST store
fn test_config(server: &Server) -> SiteConfig {
    SiteConfig {
        content_store: ContentStoreConfig {
            backend: StoreBackend::Rest,
            base_url: format!("{}/api", server.url()),
            ..ContentStoreConfig::default()
        },
        ..SiteConfig::default()
    }
}

/// Test helper: Create app from configuration
fn setup_app(config: &SiteConfig) -> axum::Router {
    let state = AppState::from_config(config).expect("state should build");
    build_router(state, None)
}

/// Test helper: Create GET request
fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Create form POST request
fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: Extract HTML body from response
///
/// The template escaper encodes `/` as `&#x2f;`; it is decoded here so
/// assertions can be written against plain URLs.
async fn extract_html(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec())
        .expect("Should be UTF-8")
        .replace("&#x2f;", "/")
}

/// Test helper: Mock one REST collection
async fn mock_collection(server: &mut Server, collection: &str, status: usize, body: Value) -> Mock {
    server
        .mock("GET", format!("/api/{}/", collection).as_str())
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Test helper: Three configured gallery images
fn gallery_config(server: &Server) -> SiteConfig {
    let mut config = test_config(server);
    config.gallery = (1..=3)
        .map(|n| GalleryEntry {
            src: format!("/gallery/{}.jpeg", n),
            alt: format!("Recording Session {}", n),
            category: None,
        })
        .collect();
    config
}

/// Test helper: GET a page and return status plus body
async fn get_page(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app.oneshot(test_request(uri)).await.unwrap();
    let status = response.status();
    (status, extract_html(response.into_body()).await)
}

// =============================================================================
// Health and build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ketebul-web");
    assert!(body["version"].is_string());
    assert_eq!(body["content_backend"], "rest");
    assert_eq!(body["local_collections"], json!([]));
}

#[tokio::test]
async fn test_health_lists_local_collections() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let response = app.oneshot(test_request("/health")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["local_collections"], json!(["gallery"]));
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
    assert_eq!(body["asset_version"], ketebul_web::api::ui::ASSET_VERSION);
}

#[tokio::test]
async fn test_root_redirects_to_updates() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/updates");
}

#[tokio::test]
async fn test_static_assets_served() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/static/site.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/javascript");
    assert!(response.headers()["cache-control"].to_str().unwrap().contains("max-age"));
}

#[tokio::test]
async fn test_pages_link_versioned_assets() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let (_, html) = get_page(app, "/about").await;
    let version = ketebul_web::api::ui::ASSET_VERSION;
    assert!(html.contains(&format!(r#"href="/static/site.css?v={}""#, version)));
}

// =============================================================================
// Listing pages
// =============================================================================

#[tokio::test]
async fn test_updates_page_renders_records_in_store_order() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(
        &mut server,
        "updates",
        200,
        json!([
            {
                "id": 2,
                "title": "Singing Wells Showcase",
                "slug": "singing-wells",
                "date": "2025-08-08",
                "venue": "Kenya National Theatre",
                "content": "Free entry for all."
            },
            {
                "id": 1,
                "title": "Archive Launch",
                "date": "2020-09-23",
                "buttonText": "Get Tickets",
                "buttonLink": "https://tickets.example.com/launch"
            }
        ]),
    )
    .await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/updates").await;
    assert_eq!(status, StatusCode::OK);

    let first = html.find("Singing Wells Showcase").expect("first update rendered");
    let second = html.find("Archive Launch").expect("second update rendered");
    assert!(first < second, "store order must be preserved");

    assert!(html.contains(r#"<span class="month">AUG</span>"#));
    assert!(html.contains("Kenya National Theatre"));
    assert!(html.contains("<p>Free entry for all.</p>"));
    assert!(html.contains(r#"href="/updates/singing-wells""#));
    assert!(html.contains("More Details"));
    assert!(html.contains("Get Tickets"));
    assert!(html.contains(r#"target="_blank""#));
}

#[tokio::test]
async fn test_fetch_failure_renders_error_state() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "updates", 500, json!({"detail": "boom"})).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/updates").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("Failed to load updates."));
    assert!(!html.contains("update-list"));
}

#[tokio::test]
async fn test_malformed_record_shows_nothing_partial() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(
        &mut server,
        "posts",
        200,
        json!([
            { "id": 1, "title": "Good post" },
            { "id": 2 }
        ]),
    )
    .await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/blog").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("Failed to load posts."));
    assert!(!html.contains("Good post"));
}

#[tokio::test]
async fn test_empty_result_renders_empty_state() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "updates", 200, json!([])).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/updates").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No updates yet. Check back soon."));
}

#[tokio::test]
async fn test_books_page_download_link() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(
        &mut server,
        "books",
        200,
        json!([
            {
                "id": 7,
                "title": "Retracing Kenyan Popular Music",
                "description": "A history in sound.",
                "download_link": "https://files.example.com/book.pdf"
            }
        ]),
    )
    .await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Retracing Kenyan Popular Music"));
    assert!(html.contains(r#"href="https://files.example.com/book.pdf""#));
}

// =============================================================================
// Project category filter
// =============================================================================

fn projects() -> Value {
    json!([
        { "id": 1, "title": "Singing Wells", "category": "Documentaries", "order": 1 },
        { "id": 2, "title": "Retracing", "category": "Books", "order": 2 },
        { "id": 3, "title": "Kenyan Voices", "category": "Documentaries", "order": 3 },
        { "id": 4, "title": "Studio Sessions", "category": "Recordings", "order": 4 },
        { "id": 5, "title": "Benga Archive", "category": "Recordings", "order": 5 },
        { "id": 6, "title": "Taarab Notes", "category": "Books", "order": 6 },
        { "id": 7, "title": "Workshop Series", "category": "Education", "order": 7 }
    ])
}

#[tokio::test]
async fn test_projects_filter_by_category() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "projects", 200, projects()).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/projects?category=Documentaries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"<article class="card""#).count(), 2);
    assert!(html.contains("Singing Wells"));
    assert!(html.contains("Kenyan Voices"));
    assert!(!html.contains("Studio Sessions"));

    // Tabs: All plus each category once, with the selection marked
    assert!(html.contains(r#"href="/projects?category=All""#));
    assert!(html.contains(r#"href="/projects?category=Documentaries" class="active""#));
}

#[tokio::test]
async fn test_projects_unknown_category_is_empty_state() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "projects", 200, projects()).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/projects?category=Podcasts").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No projects in this category."));
    assert_eq!(html.matches(r#"<article class="card""#).count(), 0);
}

// =============================================================================
// Artist profile
// =============================================================================

fn artists() -> Value {
    json!([
        {
            "id": 1,
            "name": "Winyo",
            "slug": "winyo",
            "bio": "Nyatiti and guitar.",
            "image": "https://cdn.example.com/winyo.jpg"
        }
    ])
}

#[tokio::test]
async fn test_artist_profile_found() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "artists", 200, artists()).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/artists/winyo").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Winyo</h1>"));
    assert!(html.contains("Nyatiti and guitar."));
    assert!(html.contains(r#"src="https://cdn.example.com/winyo.jpg""#));
}

#[tokio::test]
async fn test_artist_profile_not_found() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "artists", 200, artists()).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/artists/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Artist not found"));
}

#[tokio::test]
async fn test_artists_listing_links_to_profiles() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "artists", 200, artists()).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/artists").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/artists/winyo""#));
}

// =============================================================================
// Gallery and lightbox
// =============================================================================

#[tokio::test]
async fn test_gallery_closed_by_default() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (status, html) = get_page(app, "/gallery").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"class="gallery-item""#).count(), 3);
    assert!(!html.contains("data-lightbox"));
    assert!(!html.contains("scroll-locked"));
}

#[tokio::test]
async fn test_gallery_open_locks_scroll() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (status, html) = get_page(app, "/gallery?view=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("data-lightbox"));
    assert!(html.contains(r#"<body class="scroll-locked">"#));
    assert!(html.contains("Recording Session 2 (2 / 3)"));
}

#[tokio::test]
async fn test_gallery_prev_from_first_wraps_to_last() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (_, html) = get_page(app, "/gallery?view=0&target=prev").await;
    assert!(html.contains("Recording Session 3 (3 / 3)"));
    assert!(html.contains(r#"data-nav="/gallery?view=2""#));
}

#[tokio::test]
async fn test_gallery_arrow_right_from_last_wraps_to_first() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (_, html) = get_page(app, "/gallery?view=2&key=ArrowRight").await;
    assert!(html.contains("Recording Session 1 (1 / 3)"));
}

#[tokio::test]
async fn test_gallery_escape_and_backdrop_close() {
    let server = Server::new_async().await;
    let config = gallery_config(&server);

    for uri in [
        "/gallery?view=1&key=Escape",
        "/gallery?view=1&target=backdrop",
        "/gallery?view=1&target=close",
    ] {
        let (status, html) = get_page(setup_app(&config), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(!html.contains("data-lightbox"), "{} should close", uri);
        assert!(!html.contains("scroll-locked"), "{} should unlock scroll", uri);
    }
}

#[tokio::test]
async fn test_gallery_image_click_keeps_open() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (_, html) = get_page(app, "/gallery?view=1&target=image").await;
    assert!(html.contains("data-lightbox"));
    assert!(html.contains("scroll-locked"));
}

#[tokio::test]
async fn test_gallery_out_of_range_view_ignored() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (status, html) = get_page(app, "/gallery?view=9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("data-lightbox"));
    assert!(!html.contains("scroll-locked"));
}

#[tokio::test]
async fn test_gallery_falls_back_to_store() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(
        &mut server,
        "gallery",
        200,
        json!([
            { "id": 1, "title": "On stage", "image": "https://cdn.example.com/stage.jpg", "order": 1 }
        ]),
    )
    .await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/gallery?view=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("On stage (1 / 1)"));
    assert!(html.contains(r#"src="https://cdn.example.com/stage.jpg""#));
}

// =============================================================================
// Image slots
// =============================================================================

#[tokio::test]
async fn test_record_without_image_renders_fallback_slot() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(
        &mut server,
        "books",
        200,
        json!([{ "id": 3, "title": "Coverless", "description": "No cover yet." }]),
    )
    .await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&format!(r#"src="{}""#, FALLBACK_IMAGE_URL)));
    assert!(html.contains(r#"data-state="failed""#));
    assert!(html.contains("opacity-100"));
}

#[tokio::test]
async fn test_resolved_image_renders_loading_slot() {
    let server = Server::new_async().await;
    let app = setup_app(&gallery_config(&server));

    let (_, html) = get_page(app, "/gallery").await;
    assert!(html.contains(r#"src="/gallery/1.jpeg""#));
    assert!(html.contains(r#"data-src="/gallery/1.jpeg""#));
    assert!(html.contains(r#"data-state="loading""#));
}

#[tokio::test]
async fn test_image_error_swaps_to_fallback_once() {
    let server = Server::new_async().await;
    let config = test_config(&server);

    let response = setup_app(&config)
        .oneshot(test_request("/api/image-state?src=%2Fbroken.jpg&alt=Broken&state=loading&event=error"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["state"], "failed");
    assert_eq!(body["src"], FALLBACK_IMAGE_URL);
    assert_eq!(body["requested"], "/broken.jpg");
    assert_eq!(body["loading"], false);
    assert_eq!(body["placeholder_visible"], false);

    // The fallback failing too keeps the fallback rather than looping
    let response = setup_app(&config)
        .oneshot(test_request("/api/image-state?src=%2Fbroken.jpg&alt=Broken&state=failed&event=error"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["state"], "failed");
    assert_eq!(body["src"], FALLBACK_IMAGE_URL);
}

#[tokio::test]
async fn test_image_load_reveals_original() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app
        .oneshot(test_request("/api/image-state?src=%2Fgallery%2F1.jpeg&state=loading&event=load"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["state"], "loaded");
    assert_eq!(body["src"], "/gallery/1.jpeg");
    assert_eq!(body["image_class"], "opacity-100");
}

#[tokio::test]
async fn test_image_state_rejects_unknown_event() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app
        .oneshot(test_request("/api/image-state?src=%2Fa.jpg&event=hover"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Team, events, about and contact
// =============================================================================

fn people_config(server: &Server) -> SiteConfig {
    let mut config = test_config(server);
    config.team = vec![TeamEntry {
        name: "Tabu Osusa".to_string(),
        role: "Founder & Executive Director".to_string(),
        photo: Some("/team/tabu.jpg".to_string()),
        bio: Some("Producer and archivist.".to_string()),
    }];
    config.events = vec![EventEntry {
        title: "Ketebul Cultural Showcase".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        location: "Alliance Francaise, Nairobi".to_string(),
        description: Some("An evening of live music.".to_string()),
        image: None,
    }];
    config
}

#[tokio::test]
async fn test_team_page_from_config() {
    let server = Server::new_async().await;
    let app = setup_app(&people_config(&server));

    let (status, html) = get_page(app, "/team").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Tabu Osusa"));
    assert!(html.contains(r#"<p class="card-role">Founder &amp; Executive Director</p>"#));
    assert!(html.contains(r#"src="/team/tabu.jpg""#));
}

#[tokio::test]
async fn test_events_page_from_config() {
    let server = Server::new_async().await;
    let app = setup_app(&people_config(&server));

    let (status, html) = get_page(app, "/events").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Ketebul Cultural Showcase"));
    assert!(html.contains(r#"<span class="day">15</span>"#));
    assert!(html.contains(r#"<span class="month">JUN</span>"#));
    assert!(html.contains("Alliance Francaise, Nairobi"));
}

#[tokio::test]
async fn test_events_page_falls_back_to_store() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(
        &mut server,
        "events",
        200,
        json!([
            { "id": 1, "title": "Sound of the Lake Festival", "date": "2025-07-20", "location": "Kisumu" }
        ]),
    )
    .await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/events").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Sound of the Lake Festival"));
    assert!(html.contains("Kisumu"));
}

#[tokio::test]
async fn test_team_page_empty_store() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "team", 200, json!([])).await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/team").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Team profiles are coming soon."));
}

#[tokio::test]
async fn test_about_page() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Our Mission Statement"));
    assert!(html.contains(r#"src="/osusa.jpg""#));
    assert!(html.contains(r#"href="/about" class="active""#));
}

#[tokio::test]
async fn test_contact_page_shows_details_and_form() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let (status, html) = get_page(app, "/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("info@ketebulmusic.org"));
    assert!(html.contains("GoDown Arts Centre"));
    assert!(html.contains(r#"<form class="contact-form" method="post" action="/contact">"#));
}

#[tokio::test]
async fn test_contact_submission_accepted() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app
        .oneshot(form_request(
            "/contact",
            "name=Achieng&email=achieng%40example.org&message=Karibu+sana",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_html(response.into_body()).await;
    assert!(html.contains("Thank you for reaching out."));
    assert!(!html.contains("contact-form"));
}

#[tokio::test]
async fn test_contact_submission_rejected_keeps_values() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app
        .oneshot(form_request("/contact", "name=Achieng&email=not-an-email&message="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = extract_html(response.into_body()).await;
    assert!(html.contains(r#"data-field="email""#));
    assert!(html.contains(r#"data-field="message""#));
    assert!(!html.contains(r#"data-field="name""#));
    assert!(html.contains(r#"value="Achieng""#));
}

// =============================================================================
// Content API
// =============================================================================

#[tokio::test]
async fn test_content_api_returns_records() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "artists", 200, artists()).await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/api/content/artists")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["kind"], "artist");
    assert_eq!(body["count"], 1);
    assert_eq!(body["records"][0]["title"], "Winyo");
}

#[tokio::test]
async fn test_content_api_unknown_kind() {
    let server = Server::new_async().await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/api/content/recipes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("recipes"));
}

#[tokio::test]
async fn test_content_api_upstream_failure() {
    let mut server = Server::new_async().await;
    let _mock = mock_collection(&mut server, "books", 503, json!({})).await;
    let app = setup_app(&test_config(&server));

    let response = app.oneshot(test_request("/api/content/books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_content_api_serves_local_collection() {
    // No store mock: configured collections never reach the store
    let server = Server::new_async().await;
    let app = setup_app(&people_config(&server));

    let response = app.oneshot(test_request("/api/content/team")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["kind"], "team");
    assert_eq!(body["records"][0]["role"], "Founder & Executive Director");
}
