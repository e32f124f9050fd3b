// HTTP source reader
use crate::application::source_reader::SourceReader;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpSourceReader {
    url: String,
    client: reqwest::Client,
}

impl HttpSourceReader {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SourceReader for HttpSourceReader {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch_text(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GET {} failed with status {}: {}", self.url, status, body);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))
    }
}

/// True when `location` should be fetched over HTTP rather than read from disk
pub fn is_http_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
