//! Harvest orchestration
//!
//! Drives the whole pipeline for every record the feed yields: check the
//! licensing eligibility, assemble the canonical book record, skip
//! unpublishable ones, render ONIX metadata,
//! fetch the book file and cover, upload everything and clean the local
//! scratch directories. One record failing its infrastructure steps does not
//! stop the harvest; the failure is logged and counted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::RawRecord;
use crate::normalize;
use crate::oai::OaiClient;
use crate::onix::{write_onix_file, OnixMessage};
use crate::services::languages::LanguageRepository;
use crate::services::storage::{content_type_for, object_key, ObjectStore};

/// Cover image location on the library platform
const COVER_LINK_TEMPLATE: &str =
    "https://openresearchlibrary.org/ext/api/media/{book_id}/assets/thumbnail.jpg";

/// Counters reported at the end of a harvest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub published: u64,
    pub skipped: u64,
    pub failed: u64,
}

pub struct HarvestService {
    oai: OaiClient,
    http: reqwest::Client,
    store: Arc<dyn ObjectStore>,
    languages: Option<LanguageRepository>,
    storage_prefix: String,
    books_dir: PathBuf,
    images_dir: PathBuf,
    max_pages: u32,
}

impl HarvestService {
    pub fn new(
        config: &AppConfig,
        oai: OaiClient,
        store: Arc<dyn ObjectStore>,
        languages: Option<LanguageRepository>,
    ) -> Self {
        Self {
            oai,
            http: reqwest::Client::new(),
            store,
            languages,
            storage_prefix: config.storage.prefix.clone(),
            books_dir: PathBuf::from(&config.paths.books_dir),
            images_dir: PathBuf::from(&config.paths.images_dir),
            max_pages: config.feed.max_pages,
        }
    }

    /// Harvest the feed to completion (or to the configured page limit)
    pub async fn run(&self) -> AppResult<HarvestSummary> {
        std::fs::create_dir_all(&self.books_dir)?;
        std::fs::create_dir_all(&self.images_dir)?;

        let language_ids = match &self.languages {
            Some(repository) => repository.language_ids().await?,
            None => {
                tracing::info!("no database configured, language cross-reference disabled");
                HashMap::new()
            }
        };

        let mut summary = HarvestSummary::default();
        let mut token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let page = self.oai.list_records(token.as_deref()).await?;
            pages += 1;

            for raw in &page.records {
                match self.process_record(raw, &language_ids).await {
                    Ok(true) => summary.published += 1,
                    Ok(false) => summary.skipped += 1,
                    Err(error) => {
                        tracing::error!(
                            oai_identifier = %raw.oai_identifier,
                            error = %error,
                            "record failed, continuing harvest"
                        );
                        summary.failed += 1;
                    }
                }
            }

            token = page.resumption_token;
            if token.is_none() {
                break;
            }
            if self.max_pages > 0 && pages >= self.max_pages {
                tracing::info!(pages, "reached configured page limit");
                break;
            }
        }

        tracing::info!(
            published = summary.published,
            skipped = summary.skipped,
            failed = summary.failed,
            pages,
            "harvest finished"
        );
        Ok(summary)
    }

    /// Publish one record. `Ok(false)` means the record was unpublishable and
    /// skipped; any `Err` is an infrastructure failure for this record only.
    async fn process_record(
        &self,
        raw: &RawRecord,
        language_ids: &HashMap<String, i32>,
    ) -> AppResult<bool> {
        if !normalize::eligible_for_publication(raw) {
            tracing::warn!(
                oai_identifier = %raw.oai_identifier,
                "record is not an openly licensed book, skipping"
            );
            return Ok(false);
        }

        let book = normalize::assemble(raw);
        if !book.is_publishable() {
            tracing::warn!(
                oai_identifier = %raw.oai_identifier,
                "record has no valid ISBN or format, skipping"
            );
            return Ok(false);
        }

        tracing::info!(record_reference = %book.record_reference, "publishing record");

        // metadata first: it is derived purely from the record and cannot
        // fail for network reasons
        let metadata_path = self.books_dir.join(book.metadata_file_name());
        let message = OnixMessage::from_book(&book);
        write_onix_file(&metadata_path, &message)?;
        self.upload_and_remove(&metadata_path).await?;

        // book file
        if let Some(file_name) = book.book_file_name() {
            if book.download_link.is_empty() {
                tracing::warn!(isbn13 = %book.isbn13, "no download link, book file not published");
            } else {
                let book_path = self.books_dir.join(&file_name);
                self.download_to(&book.download_link, &book_path).await?;
                self.upload_and_remove(&book_path).await?;
            }
        }

        // cover image
        match &book.book_id {
            Some(book_id) => {
                let cover_url = COVER_LINK_TEMPLATE.replace("{book_id}", book_id);
                let cover_path = self.images_dir.join(book.cover_file_name());
                self.download_to(&cover_url, &cover_path).await?;
                self.upload_and_remove(&cover_path).await?;
            }
            None => {
                tracing::warn!(isbn13 = %book.isbn13, "no viewer id, cover not published");
            }
        }

        // language cross-reference
        if let Some(repository) = &self.languages {
            match language_ids.get(&book.language) {
                Some(language_id) => {
                    repository
                        .update_language_id(&book.isbn13, *language_id)
                        .await?;
                }
                None => tracing::warn!(
                    language = %book.language,
                    isbn13 = %book.isbn13,
                    "language label unknown to database, cross-reference skipped"
                ),
            }
        }

        Ok(true)
    }

    async fn download_to(&self, url: &str, path: &Path) -> AppResult<()> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        tokio::fs::write(path, &bytes).await?;
        tracing::debug!(url = %url, path = %path.display(), bytes = bytes.len(), "downloaded artifact");
        Ok(())
    }

    /// Upload a scratch file and delete it locally once the upload succeeded
    async fn upload_and_remove(&self, path: &Path) -> AppResult<()> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| AppError::Storage(format!("bad artifact path: {}", path.display())))?;

        let key = object_key(&self.storage_prefix, file_name);
        let body = tokio::fs::read(path).await?;
        self.store.put(&key, body, content_type_for(file_name)).await?;
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AppConfig, DatabaseConfig, FeedConfig, LoggingConfig, PathsConfig, StorageConfig,
    };
    use crate::services::storage::MockObjectStore;

    fn test_config(scratch: &Path) -> AppConfig {
        AppConfig {
            feed: FeedConfig::default(),
            storage: StorageConfig::default(),
            database: DatabaseConfig::default(),
            paths: PathsConfig {
                books_dir: scratch.join("books").display().to_string(),
                images_dir: scratch.join("images").display().to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    fn service_with_store(store: MockObjectStore, scratch: &Path) -> HarvestService {
        let config = test_config(scratch);
        HarvestService::new(
            &config,
            OaiClient::new(&config.feed),
            Arc::new(store),
            None,
        )
    }

    #[tokio::test]
    async fn test_unpublishable_record_is_skipped_without_io() {
        // no expectations: any store call would panic the mock
        let store = MockObjectStore::new();
        let scratch = std::env::temp_dir().join("harvest-skip-test");
        let service = service_with_store(store, &scratch);

        let mut raw = RawRecord::new("oai:test:no-isbn");
        raw.push("type", "BOOK");
        raw.push(
            "rights",
            "https://creativecommons.org/licenses/by/4.0/legalcode",
        );
        raw.push("title", "No ISBN here");
        raw.push("format", "application/pdf");

        let published = service.process_record(&raw, &HashMap::new()).await.unwrap();
        assert!(!published);
    }

    #[tokio::test]
    async fn test_closed_rights_record_is_skipped_without_io() {
        // valid ISBN and format, so only the licensing gate stops it; any
        // store call would panic the mock
        let store = MockObjectStore::new();
        let scratch = std::env::temp_dir().join("harvest-rights-test");
        let service = service_with_store(store, &scratch);

        let mut raw = RawRecord::new("oai:test:closed-rights");
        raw.push("type", "DATASET");
        raw.push("rights", "All Rights Reserved");
        raw.push("format", "application/pdf");
        raw.push("identifier", "isbn:9780199660797");

        let published = service.process_record(&raw, &HashMap::new()).await.unwrap();
        assert!(!published);
    }

    #[tokio::test]
    async fn test_metadata_upload_key_and_cleanup() {
        let scratch = std::env::temp_dir().join("harvest-upload-test");
        let _ = std::fs::remove_dir_all(&scratch);

        let mut store = MockObjectStore::new();
        store
            .expect_put()
            .withf(|key, body, content_type| {
                key == "content/open_research_library_iudilif/9780199660797.xml"
                    && content_type == "application/xml"
                    && !body.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service_with_store(store, &scratch);
        std::fs::create_dir_all(scratch.join("books")).unwrap();

        let book = crate::models::BookRecord {
            isbn13: "9780199660797".to_string(),
            record_reference: "9780199660797.pdf".to_string(),
            format: crate::models::BookFormat::Pdf,
            ..Default::default()
        };
        let path = scratch.join("books").join(book.metadata_file_name());
        write_onix_file(&path, &OnixMessage::from_book(&book)).unwrap();

        service.upload_and_remove(&path).await.unwrap();
        assert!(!path.exists(), "scratch file must be removed after upload");

        std::fs::remove_dir_all(&scratch).unwrap();
    }
}
