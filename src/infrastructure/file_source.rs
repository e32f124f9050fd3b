// Local file source reader
use crate::application::source_reader::SourceReader;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct FileSourceReader {
    path: String,
}

impl FileSourceReader {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SourceReader for FileSourceReader {
    fn location(&self) -> &str {
        &self.path
    }

    async fn fetch_text(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file_contents() {
        let path = std::env::temp_dir().join(format!("sensor-charts-{}.csv", std::process::id()));
        tokio::fs::write(&path, "datetime,a\n2021-01-01,1\n").await.unwrap();

        let reader = FileSourceReader::new(path.to_string_lossy().into_owned());
        let text = reader.fetch_text().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(text, "datetime,a\n2021-01-01,1\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let reader = FileSourceReader::new("/nonexistent/sensor-charts/data.json".to_string());
        assert!(reader.fetch_text().await.is_err());
    }
}
