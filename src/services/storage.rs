//! Object storage upload service
//!
//! Artifacts land under `content/<prefix>/<file>` in an S3-compatible bucket.
//! The store is a trait so the harvest pipeline can be tested without a
//! bucket; the production implementation is a plain HTTP PUT against a
//! pre-signed or anonymous-write endpoint.

use async_trait::async_trait;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key`, overwriting any existing object
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> AppResult<()>;
}

/// HTTP-backed object store
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> AppResult<()> {
        let url = self.object_url(key);
        let size = body.len();
        let response = self
            .client
            .put(&url)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "upload of {} failed with status {}",
                key,
                response.status()
            )));
        }
        tracing::info!(key = %key, bytes = size, "uploaded object");
        Ok(())
    }
}

/// Full object key for an artifact file
pub fn object_key(prefix: &str, file_name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), file_name)
}

/// Content type by file extension; the bucket serves these directly
pub fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next() {
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("epub") => "application/epub+zip",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key() {
        assert_eq!(
            object_key("content/open_research_library_iudilif", "9780199660797.xml"),
            "content/open_research_library_iudilif/9780199660797.xml"
        );
        // trailing slash in the configured prefix must not double up
        assert_eq!(object_key("content/prefix/", "a.pdf"), "content/prefix/a.pdf");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.xml"), "application/xml");
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.epub"), "application/epub+zip");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("mystery"), "application/octet-stream");
    }

    #[test]
    fn test_object_url() {
        let store = HttpObjectStore::new(&StorageConfig {
            endpoint: "http://localhost:9000/".to_string(),
            bucket: "openresearchlibrary".to_string(),
            prefix: "content/open_research_library_iudilif".to_string(),
        });
        assert_eq!(
            store.object_url("content/open_research_library_iudilif/a.xml"),
            "http://localhost:9000/openresearchlibrary/content/open_research_library_iudilif/a.xml"
        );
    }
}
