//! Record assembly
//!
//! Runs every field normalizer against a raw record and derives the record
//! reference. The assembler never fails: a record that cannot be published
//! simply comes back with an empty `isbn13` and `record_reference`.

use crate::models::{BookFormat, BookRecord, RawRecord};
use crate::normalize::fields;

/// Sales territory granted by the library's licensing; the feed carries no
/// per-record rights territory.
const ALLOWED_COUNTRIES: &str = "WORLD";

/// License URLs under which the library may republish a title
const CC_BY_LICENSE: &str = "https://creativecommons.org/licenses/by/4.0/legalcode";
const PUBLIC_DOMAIN_LICENSE: &str = "https://wiki.creativecommons.org/wiki/public_domain";
/// Source marker of titles funded through Knowledge Unlatched
const KNOWLEDGE_UNLATCHED_SOURCE: &str = "MODID-00000000488:Knowledge Unlatched";

/// Whether the record may be republished at all. Only books qualify, and only
/// when their rights grant CC-BY or public domain, or their source names
/// Knowledge Unlatched. Everything else in the feed (datasets, closed-rights
/// titles) is skipped before any normalization happens.
pub fn eligible_for_publication(raw: &RawRecord) -> bool {
    let is_book = raw
        .get("type")
        .and_then(<[String]>::first)
        .is_some_and(|value| value == "BOOK");
    if !is_book {
        return false;
    }

    let contains = |field: &str, marker: &str| {
        raw.get(field)
            .is_some_and(|values| values.iter().any(|value| value == marker))
    };

    contains("rights", PUBLIC_DOMAIN_LICENSE)
        || contains("rights", CC_BY_LICENSE)
        || contains("source", KNOWLEDGE_UNLATCHED_SOURCE)
}

/// Assemble a canonical [`BookRecord`] from a raw harvested record
pub fn assemble(raw: &RawRecord) -> BookRecord {
    let isbn13 = fields::parse_isbn(raw.get("identifier"));
    let format = fields::parse_format(raw.get("format"));
    let record_reference = record_reference(&isbn13, format);

    BookRecord {
        isbn13,
        title: fields::parse_title(raw.get("title")),
        language: fields::parse_language(raw.get("language")),
        bisac_subjects: fields::parse_subject(raw.get("subject")),
        format,
        contributors: fields::parse_creator(raw.get("creator")),
        description: fields::parse_description(raw.get("description")),
        publisher_name: fields::parse_publisher(raw.get("publisher")),
        publication_date: fields::parse_date(raw.get("date")),
        allowed_countries: ALLOWED_COUNTRIES.to_string(),
        record_reference,
        book_id: fields::parse_book_id(raw.get("identifier")),
        download_link: fields::parse_download_link(raw.get("identifier")),
    }
}

/// Derive `<isbn13>.<format>`, the unique reference of an ONIX product.
/// Valid only when the ISBN passed validation and the format is supported.
pub fn record_reference(isbn13: &str, format: BookFormat) -> String {
    match format.extension() {
        Some(ext) if !isbn13.is_empty() => format!("{}.{}", isbn13, ext),
        _ => {
            tracing::warn!(
                isbn13 = %isbn13,
                format = %format,
                "cannot derive record reference, record is unpublishable"
            );
            String::new()
        }
    }
}
