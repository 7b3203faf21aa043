//! Canonical book record
//!
//! The flat, normalized view of one harvested record. Everything downstream
//! (ONIX rendering, uploads, the language cross-reference) reads from this
//! struct; nothing mutates it after assembly.

use serde::{Deserialize, Serialize};

/// Electronic book format recognized by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookFormat {
    Pdf,
    Epub,
    /// Anything the feed sends that is neither PDF nor EPUB
    #[default]
    Unknown,
}

impl BookFormat {
    /// Canonical upper-case label; `Unknown` renders as the empty string
    pub fn as_str(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "PDF",
            BookFormat::Epub => "EPUB",
            BookFormat::Unknown => "",
        }
    }

    /// Lower-case file extension for known formats
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            BookFormat::Pdf => Some("pdf"),
            BookFormat::Epub => Some("epub"),
            BookFormat::Unknown => None,
        }
    }
}

impl std::fmt::Display for BookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully normalized book record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookRecord {
    /// Validated 13-digit ISBN, empty when validation failed
    pub isbn13: String,
    pub title: String,
    /// Raw language label from the feed; numeric ids live in the database
    pub language: String,
    /// BISAC codes in feed order
    pub bisac_subjects: Vec<String>,
    pub format: BookFormat,
    /// All contributors as one display string, "Given Surname, Given Surname"
    pub contributors: String,
    pub description: String,
    pub publisher_name: String,
    /// YYYYMMDD
    pub publication_date: String,
    pub allowed_countries: String,
    /// `<isbn13>.<format>`, empty unless both parts are valid
    pub record_reference: String,
    /// Platform-internal book id, taken from the viewer URL
    pub book_id: Option<String>,
    /// Where to fetch the book file from
    pub download_link: String,
}

impl BookRecord {
    /// A record without a valid ISBN (and thus no record reference) must be
    /// skipped by the orchestrator, never rendered or uploaded.
    pub fn is_publishable(&self) -> bool {
        !self.record_reference.is_empty()
    }

    /// Metadata file name, `<isbn13>.xml`
    pub fn metadata_file_name(&self) -> String {
        format!("{}.xml", self.isbn13)
    }

    /// Book file name, `<isbn13>.<format extension>`
    pub fn book_file_name(&self) -> Option<String> {
        self.format
            .extension()
            .map(|ext| format!("{}.{}", self.isbn13, ext))
    }

    /// Cover image file name, `<isbn13>.jpg`
    pub fn cover_file_name(&self) -> String {
        format!("{}.jpg", self.isbn13)
    }
}
