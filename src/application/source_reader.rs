// Source reader trait for fetching raw payloads
use async_trait::async_trait;

#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Where the payload comes from, for logs and error reports
    fn location(&self) -> &str;

    /// Fetch the whole payload as text
    async fn fetch_text(&self) -> anyhow::Result<String>;
}
