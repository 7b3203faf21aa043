//! Per-field normalizers
//!
//! One pure function per Dublin Core field. Input is always
//! `Option<&[String]>`: `None` when the feed never sent the field, otherwise
//! the raw value list in document order. Diagnostics go to `tracing` at warn
//! level; the return value carries only the normalized data.

use chrono::NaiveDate;

use crate::models::BookFormat;

/// Date layout used throughout ONIX
pub const ONIX_DATE_FORMAT: &str = "%Y%m%d";

/// Fallback publication date when the feed value cannot be parsed
pub const DEFAULT_PUBLICATION_DATE: &str = "20210101";

/// Synthesized download location for records without an explicit content link
const DOWNLOAD_LINK_TEMPLATE: &str =
    "https://openresearchlibrary.org/ext/api/media/{book_id}/assets/external_content.pdf";

/// Reorder creator names and join them into one display string.
///
/// Entries shaped `"Surname, Given"` (exactly one comma) become
/// `"Given Surname"`. Entries with no comma, or with more than one comma
/// ("Reagle, Jr., Joseph M."), pass through unchanged; guessing at multi-comma
/// names caused regressions before. Empty entries are dropped.
pub fn parse_creator(raw: Option<&[String]>) -> String {
    let Some(creators) = raw else {
        tracing::warn!("creator field missing, no contributors");
        return String::new();
    };

    let mut formatted = Vec::with_capacity(creators.len());
    for creator in creators {
        if creator.is_empty() {
            tracing::warn!("empty creator entry, skipping");
            continue;
        }
        if creator.matches(',').count() == 1 {
            let (surname, given) = creator.split_once(',').unwrap_or((creator.as_str(), ""));
            formatted.push(format!("{} {}", given.trim(), surname.trim()));
        } else {
            formatted.push(creator.clone());
        }
    }
    formatted.join(", ")
}

/// Parse the publication date list into `YYYYMMDD`.
///
/// Accepts the ISO-8601 timestamps the feed usually sends plus the handful of
/// loose layouts observed in practice. Anything unparseable falls back to
/// [`DEFAULT_PUBLICATION_DATE`].
pub fn parse_date(raw: Option<&[String]>) -> String {
    let value = match raw.and_then(|list| list.first()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            tracing::warn!(?raw, "wrong publishing date, using default");
            return DEFAULT_PUBLICATION_DATE.to_string();
        }
    };

    match parse_loose_date(value) {
        Some(date) => date.format(ONIX_DATE_FORMAT).to_string(),
        None => {
            tracing::warn!(date = %value, "unparseable publishing date, using default");
            DEFAULT_PUBLICATION_DATE.to_string()
        }
    }
}

/// Try the date layouts the feed has been seen to use
fn parse_loose_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y%m%d", "%Y-%m-%d", "%d.%m.%Y", "%m-%d-%Y"] {
        if format.contains('T') {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, format) {
                return Some(dt.date());
            }
        } else if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    None
}

/// First element of the description list, verbatim
pub fn parse_description(raw: Option<&[String]>) -> String {
    match raw.and_then(|list| list.first()) {
        Some(text) if !text.is_empty() => text.clone(),
        _ => {
            tracing::warn!(?raw, "wrong description");
            String::new()
        }
    }
}

/// Map the MIME-like format value onto [`BookFormat`].
///
/// Case-insensitive substring match: anything containing `pdf` is PDF,
/// anything containing `epub` is EPUB, everything else is unknown.
pub fn parse_format(raw: Option<&[String]>) -> BookFormat {
    let Some(value) = raw.and_then(|list| list.first()) else {
        tracing::warn!("format field missing");
        return BookFormat::Unknown;
    };

    let lower = value.to_lowercase();
    if lower.contains("pdf") {
        BookFormat::Pdf
    } else if lower.contains("epub") {
        BookFormat::Epub
    } else {
        tracing::warn!(format = %value, "unsupported book format");
        BookFormat::Unknown
    }
}

/// Extract and validate the ISBN-13 from the identifier list.
///
/// Candidates are the entries containing `isbn` (case-insensitive), with the
/// text after the last `:` taken as the number. The result is valid only when
/// there is exactly one candidate and it is 13 ASCII digits starting with
/// `97`. Everything else yields the empty string, which marks the whole
/// record as unpublishable.
pub fn parse_isbn(raw: Option<&[String]>) -> String {
    let Some(identifiers) = raw else {
        tracing::warn!("identifier field missing, record has no ISBN");
        return String::new();
    };

    let candidates: Vec<&str> = identifiers
        .iter()
        .filter(|entry| entry.to_lowercase().contains("isbn"))
        .map(|entry| entry.rsplit(':').next().unwrap_or(entry.as_str()))
        .collect();

    let [candidate] = candidates.as_slice() else {
        tracing::warn!(count = candidates.len(), "expected exactly one ISBN candidate");
        return String::new();
    };

    let isbn = candidate.trim();
    if isbn.len() == 13 && isbn.starts_with("97") && isbn.bytes().all(|b| b.is_ascii_digit()) {
        isbn.to_string()
    } else {
        tracing::warn!(isbn = %isbn, "ISBN failed validation");
        String::new()
    }
}

/// Platform-internal book id: the last path segment of the viewer URL.
/// `None` when no identifier entry mentions the viewer.
pub fn parse_book_id(raw: Option<&[String]>) -> Option<String> {
    let identifiers = raw?;
    let viewer = identifiers.iter().find(|entry| entry.contains("viewer"))?;
    viewer
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(String::from)
}

/// Location of the book file.
///
/// Prefers an explicit `external_content` identifier; otherwise the link is
/// synthesized from the viewer book id. Empty when neither exists.
pub fn parse_download_link(raw: Option<&[String]>) -> String {
    let Some(identifiers) = raw else {
        tracing::warn!("identifier field missing, no download link");
        return String::new();
    };

    if let Some(link) = identifiers.iter().find(|entry| entry.contains("external_content")) {
        return link.clone();
    }

    match parse_book_id(raw) {
        Some(book_id) => DOWNLOAD_LINK_TEMPLATE.replace("{book_id}", &book_id),
        None => {
            tracing::warn!("no external content link and no viewer id");
            String::new()
        }
    }
}

/// Raw language label, first element verbatim. Mapping the label to a numeric
/// code is the database collaborator's job, not done here.
pub fn parse_language(raw: Option<&[String]>) -> String {
    match raw.and_then(|list| list.first()) {
        Some(language) if !language.is_empty() => language.clone(),
        _ => {
            tracing::warn!(?raw, "wrong language");
            String::new()
        }
    }
}

/// Publisher name, first element verbatim
pub fn parse_publisher(raw: Option<&[String]>) -> String {
    match raw.and_then(|list| list.first()) {
        Some(publisher) if !publisher.is_empty() => publisher.clone(),
        _ => {
            tracing::warn!(?raw, "wrong publisher");
            String::new()
        }
    }
}

/// Title, first element verbatim
pub fn parse_title(raw: Option<&[String]>) -> String {
    match raw.and_then(|list| list.first()) {
        Some(title) if !title.is_empty() => title.clone(),
        _ => {
            tracing::warn!(?raw, "wrong title");
            String::new()
        }
    }
}

/// BISAC subject codes, in feed order.
///
/// The subject list mixes free text with `bisacsh:<CODE>` entries; only the
/// code part of the latter is kept.
pub fn parse_subject(raw: Option<&[String]>) -> Vec<String> {
    let Some(subjects) = raw else {
        return Vec::new();
    };

    subjects
        .iter()
        .filter_map(|entry| entry.split_once(':'))
        .filter(|(scheme, _)| *scheme == "bisacsh")
        .map(|(_, code)| code.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_parse_creator_reorders_single_comma() {
        let raw = list(&["Potter, Harry"]);
        assert_eq!(parse_creator(Some(&raw)), "Harry Potter");
    }

    #[test]
    fn test_parse_creator_joins_all() {
        let raw = list(&["Granger, Hermione", "Potter, Harry"]);
        assert_eq!(parse_creator(Some(&raw)), "Hermione Granger, Harry Potter");
    }

    #[test]
    fn test_parse_creator_drops_empty_entries() {
        let raw = list(&["Granger, Hermione", "Potter, Harry", ""]);
        assert_eq!(parse_creator(Some(&raw)), "Hermione Granger, Harry Potter");
    }

    #[test]
    fn test_parse_creator_passes_plain_names_through() {
        let raw = list(&["Hermione Granger", "Harry Potter"]);
        assert_eq!(parse_creator(Some(&raw)), "Hermione Granger, Harry Potter");
    }

    #[test]
    fn test_parse_creator_keeps_multi_comma_names_verbatim() {
        let raw = list(&["Reagle, Jr., Joseph M."]);
        assert_eq!(parse_creator(Some(&raw)), "Reagle, Jr., Joseph M.");
    }

    #[test]
    fn test_parse_creator_missing_input() {
        assert_eq!(parse_creator(None), "");
    }

    #[test]
    fn test_parse_creator_output_count_matches_input() {
        let raw = list(&["Potter, Harry", "Hermione Granger", "Weasley, Ron"]);
        let out = parse_creator(Some(&raw));
        assert_eq!(out.split(", ").count(), raw.len());
    }

    #[test]
    fn test_parse_date_iso8601() {
        let raw = list(&["2013-01-01T00:00:00Z"]);
        assert_eq!(parse_date(Some(&raw)), "20130101");
    }

    #[test]
    fn test_parse_date_loose_layouts() {
        let compact = list(&["20130101"]);
        assert_eq!(parse_date(Some(&compact)), "20130101");
        let dotted = list(&["01.01.2013"]);
        assert_eq!(parse_date(Some(&dotted)), "20130101");
        let dashed = list(&["06-11-1993"]);
        assert_eq!(parse_date(Some(&dashed)), "19930611");
    }

    #[test]
    fn test_parse_date_defaults() {
        let overflow = list(&["872194837902963825043"]);
        assert_eq!(parse_date(Some(&overflow)), DEFAULT_PUBLICATION_DATE);
        let empty = list(&[""]);
        assert_eq!(parse_date(Some(&empty)), DEFAULT_PUBLICATION_DATE);
        assert_eq!(parse_date(None), DEFAULT_PUBLICATION_DATE);
        assert_eq!(parse_date(Some(&[])), DEFAULT_PUBLICATION_DATE);
    }

    #[test]
    fn test_parse_date_is_idempotent_on_own_output() {
        let raw = list(&["2013-01-01T00:00:00Z"]);
        let first = parse_date(Some(&raw));
        let again = parse_date(Some(&[first.clone()]));
        assert_eq!(first, again);
    }

    #[test]
    fn test_parse_description() {
        let raw = list(&["A study of things."]);
        assert_eq!(parse_description(Some(&raw)), "A study of things.");
        assert_eq!(parse_description(Some(&list(&[""]))), "");
        assert_eq!(parse_description(None), "");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(Some(&list(&["application/pdf"]))), BookFormat::Pdf);
        assert_eq!(parse_format(Some(&list(&["application/epub+zip"]))), BookFormat::Epub);
        assert_eq!(parse_format(Some(&list(&["APPLICATION/PDF"]))), BookFormat::Pdf);
        assert_eq!(parse_format(Some(&list(&["video/mp4"]))), BookFormat::Unknown);
        assert_eq!(parse_format(None), BookFormat::Unknown);
    }

    #[test]
    fn test_parse_isbn_valid() {
        let raw = list(&[
            "https://example.org/viewer/abc123",
            "isbn:9780199660797",
        ]);
        assert_eq!(parse_isbn(Some(&raw)), "9780199660797");
    }

    #[test]
    fn test_parse_isbn_uses_text_after_last_colon() {
        let raw = list(&["urn:isbn:9780199660797"]);
        assert_eq!(parse_isbn(Some(&raw)), "9780199660797");
    }

    #[test]
    fn test_parse_isbn_rejects_multiple_candidates() {
        let raw = list(&["isbn:9780199660797", "ISBN:9788429194098"]);
        assert_eq!(parse_isbn(Some(&raw)), "");
    }

    #[test]
    fn test_parse_isbn_rejects_zero_candidates() {
        let raw = list(&["https://example.org/viewer/abc123"]);
        assert_eq!(parse_isbn(Some(&raw)), "");
        assert_eq!(parse_isbn(None), "");
    }

    #[test]
    fn test_parse_isbn_validation() {
        // wrong prefix
        assert_eq!(parse_isbn(Some(&list(&["isbn:1234567890123"]))), "");
        // wrong length
        assert_eq!(parse_isbn(Some(&list(&["isbn:97801996607"]))), "");
        // non-numeric
        assert_eq!(parse_isbn(Some(&list(&["isbn:97801996607xy"]))), "");
    }

    #[test]
    fn test_parse_book_id() {
        let raw = list(&[
            "isbn:9780199660797",
            "https://openresearchlibrary.org/viewer/29ca6d26-1df7-4187-9bd6-8cbc07e3b9a2",
        ]);
        assert_eq!(
            parse_book_id(Some(&raw)).as_deref(),
            Some("29ca6d26-1df7-4187-9bd6-8cbc07e3b9a2")
        );
    }

    #[test]
    fn test_parse_book_id_absent_is_none() {
        let raw = list(&["isbn:9780199660797"]);
        assert_eq!(parse_book_id(Some(&raw)), None);
        assert_eq!(parse_book_id(None), None);
    }

    #[test]
    fn test_parse_download_link_prefers_external_content() {
        let raw = list(&[
            "https://openresearchlibrary.org/viewer/abc",
            "https://cdn.example.org/external_content/book.pdf",
        ]);
        assert_eq!(
            parse_download_link(Some(&raw)),
            "https://cdn.example.org/external_content/book.pdf"
        );
    }

    #[test]
    fn test_parse_download_link_synthesized_from_viewer() {
        let raw = list(&["https://openresearchlibrary.org/viewer/abc"]);
        assert_eq!(
            parse_download_link(Some(&raw)),
            "https://openresearchlibrary.org/ext/api/media/abc/assets/external_content.pdf"
        );
    }

    #[test]
    fn test_parse_download_link_missing() {
        assert_eq!(parse_download_link(None), "");
        assert_eq!(parse_download_link(Some(&list(&["isbn:9780199660797"]))), "");
    }

    #[test]
    fn test_scalar_fields_first_element_verbatim() {
        assert_eq!(parse_language(Some(&list(&["English"]))), "English");
        assert_eq!(parse_publisher(Some(&list(&["Oxford University Press"]))), "Oxford University Press");
        assert_eq!(parse_title(Some(&list(&["Seduction and Desire"]))), "Seduction and Desire");
        assert_eq!(parse_language(None), "");
        assert_eq!(parse_publisher(Some(&[])), "");
        assert_eq!(parse_title(Some(&list(&[""]))), "");
    }

    #[test]
    fn test_parse_subject_keeps_bisac_order() {
        let raw = list(&[
            "Psychoanalysis",
            "bisacsh:PSY026000",
            "free text",
            "bisacsh:SOC032000",
        ]);
        assert_eq!(parse_subject(Some(&raw)), vec!["PSY026000", "SOC032000"]);
    }

    #[test]
    fn test_parse_subject_ignores_other_schemes() {
        let raw = list(&["lcsh:BF175.5", "bisacsh:PSY026000"]);
        assert_eq!(parse_subject(Some(&raw)), vec!["PSY026000"]);
        assert_eq!(parse_subject(None), Vec::<String>::new());
        assert_eq!(parse_subject(Some(&[])), Vec::<String>::new());
    }

    #[test]
    fn test_idempotence_on_scalar_outputs() {
        let title = parse_title(Some(&list(&["Seduction and Desire"])));
        assert_eq!(parse_title(Some(&[title.clone()])), title);
        let creator = parse_creator(Some(&list(&["Potter, Harry"])));
        assert_eq!(parse_creator(Some(&[creator.clone()])), creator);
    }
}
