//! HTTP client for the pedigree service.
//!
//! Endpoints:
//! - `GET  {base}/dogs?q={query}`           -> listing, server order kept
//! - `POST {base}/dogs`                     -> created record, or `{detail}`
//! - `GET  {base}/pedigree/{id}?depth={n}`  -> ancestry tree

use crate::model::{AncestryNode, Dog, DogDraft};

use anyhow::Context;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Service location used when neither `--api` nor `PEDIGREE_API_URL` is set.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Per-request deadline. Requests are cheap reads/writes; anything slower
/// than this is reported as a failure rather than hanging the caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service rejected the request and said why (e.g. a create
    /// validation failure). The message is shown to the user as-is.
    #[error("{0}")]
    Rejected(String),

    /// Non-success status without a parseable detail body.
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Rejection body shape used by the service.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// List dogs whose name matches `query` (empty query lists everything).
    /// The server's ordering is preserved as given.
    pub async fn list_dogs(&self, query: &str) -> Result<Vec<Dog>, ApiError> {
        let url = self.listing_url(query);
        debug!(%url, "list dogs");

        let res = self.http.get(&url).send().await?;
        Ok(check(res, &url).await?.json().await?)
    }

    /// Create a record. A non-2xx response with a `detail` body becomes
    /// `ApiError::Rejected` carrying the server's message.
    pub async fn create_dog(&self, draft: &DogDraft) -> Result<Dog, ApiError> {
        let url = format!("{}/dogs", self.base);
        debug!(%url, name = %draft.name, "create dog");

        let res = self.http.post(&url).json(draft).send().await?;
        Ok(check(res, &url).await?.json().await?)
    }

    /// Fetch the ancestry tree rooted at `id`, truncated server-side to
    /// `depth` generations.
    pub async fn pedigree(&self, id: u64, depth: usize) -> Result<AncestryNode, ApiError> {
        let url = format!("{}/pedigree/{}?depth={}", self.base, id, depth);
        debug!(%url, "fetch pedigree");

        let res = self.http.get(&url).send().await?;
        Ok(check(res, &url).await?.json().await?)
    }

    fn listing_url(&self, query: &str) -> String {
        format!("{}/dogs?q={}", self.base, urlencoding::encode(query))
    }
}

async fn check(res: Response, url: &str) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if let Ok(ErrorDetail { detail }) = res.json::<ErrorDetail>().await {
        return Err(ApiError::Rejected(detail));
    }
    Err(ApiError::Status {
        status,
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_url_encodes_the_query() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.listing_url(""), "http://localhost:8000/dogs?q=");
        assert_eq!(client.listing_url("Rex"), "http://localhost:8000/dogs?q=Rex");
        assert_eq!(
            client.listing_url("a b&c"),
            "http://localhost:8000/dogs?q=a%20b%26c"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.listing_url("x"), "http://localhost:8000/dogs?q=x");
    }
}
