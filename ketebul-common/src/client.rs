//! Remote content store client
//!
//! Fetches the complete, store-ordered set of records of one kind. Each call
//! is all-or-nothing: no pagination, no partial results, no retries, and the
//! client never re-sorts what the store returns.

use serde::Deserialize;
use std::time::Duration;

use crate::config::{ContentStoreConfig, StoreBackend};
use crate::content::{decode_records, ContentRecord, Ordering, RecordKind};
use crate::{Error, Result};

const USER_AGENT: &str = concat!("ketebul-site/", env!("CARGO_PKG_VERSION"));

/// Which records to fetch and how the store should order them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: RecordKind,
    pub ordering: Ordering,
}

impl ContentQuery {
    pub fn new(kind: RecordKind, ordering: Ordering) -> Self {
        Self { kind, ordering }
    }

    /// Query using the kind's default ordering on `backend`
    pub fn for_kind(kind: RecordKind, backend: StoreBackend) -> Self {
        Self::new(kind, kind.default_ordering(backend))
    }

    /// CMS query text, e.g. `*[_type == "update"] | order(date desc)`
    pub fn to_cms_query(&self) -> String {
        format!(
            "*[_type == \"{}\"] | {}",
            self.kind.document_type(),
            self.ordering.to_query_clause()
        )
    }
}

/// CMS query responses wrap the documents in `result`
#[derive(Debug, Deserialize)]
struct CmsQueryResponse {
    result: Vec<serde_json::Value>,
}

/// HTTP client for the content store
#[derive(Debug, Clone)]
pub struct RemoteContentClient {
    http_client: reqwest::Client,
    store: ContentStoreConfig,
}

impl RemoteContentClient {
    pub fn new(store: &ContentStoreConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(secs) = store.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            store: store.clone(),
        })
    }

    pub fn backend(&self) -> StoreBackend {
        self.store.backend
    }

    /// Default query for `kind`, ordered by a field this backend carries
    pub fn query_for(&self, kind: RecordKind) -> ContentQuery {
        ContentQuery::for_kind(kind, self.store.backend)
    }

    /// Fetch every record matching the query, in store order
    pub async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>> {
        let documents = match self.store.backend {
            StoreBackend::Cms => self.fetch_cms(query).await?,
            StoreBackend::Rest => self.fetch_rest(query).await?,
        };

        let records = decode_records(query.kind, documents)?;
        tracing::debug!(
            kind = %query.kind,
            count = records.len(),
            "Fetched content records"
        );
        Ok(records)
    }

    async fn fetch_cms(&self, query: &ContentQuery) -> Result<Vec<serde_json::Value>> {
        let url = format!(
            "{}/v{}/data/query/{}",
            self.store.cms_api_base(),
            self.store.api_version,
            self.store.dataset
        );
        let groq = query.to_cms_query();

        tracing::debug!(url = %url, query = %groq, "Querying content store");

        let response = self
            .http_client
            .get(&url)
            .query(&[("query", groq.as_str())])
            .send()
            .await?;

        let body: CmsQueryResponse = Self::decode_response(response).await?;
        Ok(body.result)
    }

    async fn fetch_rest(&self, query: &ContentQuery) -> Result<Vec<serde_json::Value>> {
        let url = format!(
            "{}/{}/",
            self.store.base_url.trim_end_matches('/'),
            query.kind.collection()
        );
        let ordering = query.ordering.to_rest_param();

        tracing::debug!(url = %url, ordering = %ordering, "Querying REST content API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("ordering", ordering.as_str())])
            .send()
            .await?;

        Self::decode_response(response).await
    }

    async fn decode_response<T>(response: reqwest::Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Content store returned error status");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| Error::Parse(format!("Malformed payload: {}", e)))
    }
}
