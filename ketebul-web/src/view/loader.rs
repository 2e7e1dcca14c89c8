//! Page content loading
//!
//! Wraps the content client with one request tracker per view (a route such
//! as `/blog` or `/artists/:slug`). The loader is shared by every request, so
//! when two loads for the same view overlap only the one started last is
//! rendered; the earlier response is dropped instead of racing fresher
//! content.

use std::collections::HashMap;
use std::sync::Arc;

use ketebul_common::fetch_guard::RequestTracker;
use ketebul_common::{ContentQuery, ContentRecord, RecordKind, RemoteContentClient};
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Result of one load attempt
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<ContentRecord>),
    /// Fetch failed; the message is safe to show on the page
    Failed(String),
    /// A newer load for the same view started before this one finished
    Superseded,
}

#[derive(Debug, Clone)]
pub struct ContentLoader {
    client: RemoteContentClient,
    trackers: Arc<Mutex<HashMap<&'static str, RequestTracker>>>,
}

impl ContentLoader {
    pub fn new(client: RemoteContentClient) -> Self {
        Self {
            client,
            trackers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Default query for `kind` on the configured backend
    pub fn query_for(&self, kind: RecordKind) -> ContentQuery {
        self.client.query_for(kind)
    }

    async fn tracker(&self, view: &'static str) -> RequestTracker {
        self.trackers.lock().await.entry(view).or_default().clone()
    }

    /// Load `query` for `view`, superseding any load still running for it
    pub async fn load(&self, view: &'static str, query: &ContentQuery) -> LoadOutcome {
        let tracker = self.tracker(view).await;
        let token = tracker.begin();
        debug!(view, kind = %query.kind, token = token.value(), "Loading content");

        let outcome = match self.client.fetch(query).await {
            Ok(records) => LoadOutcome::Loaded(records),
            Err(e) => {
                error!(kind = %query.kind, error = %e, "Content fetch failed");
                LoadOutcome::Failed(format!("Failed to load {}.", query.kind))
            }
        };

        tracker.accept(token, outcome).unwrap_or(LoadOutcome::Superseded)
    }

    /// Drop every in-flight response, e.g. while the server shuts down
    pub async fn cancel_all(&self) {
        let trackers = self.trackers.lock().await;
        for tracker in trackers.values() {
            tracker.cancel_all();
        }
        debug!(views = trackers.len(), "Cancelled outstanding content loads");
    }
}
