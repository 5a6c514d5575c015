use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use crate::models::Record;

/// HTTP client backend that delegates searches to a running `natlas`
/// daemon.
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
}

impl HttpSearchBackend {
    /// Create a new HTTP backend targeting the given base URL
    /// (e.g. "http://127.0.0.1:8080").
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Execute a search via `GET /api/search?q=`, returning the
    /// matching records in server order.
    pub fn search(&self, query: &str) -> Result<Vec<Record>> {
        let url = self.url_for("/api/search");
        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .with_context(|| format!("failed to send request to {}", url))?
            .error_for_status()
            .with_context(|| format!("server returned error for {}", url))?;

        let records = response
            .json::<Vec<Record>>()
            .context("failed to decode JSON response from server")?;

        Ok(records)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
