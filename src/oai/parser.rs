//! OAI-PMH envelope parsing
//!
//! Pull-parses a ListRecords response into [`RawRecord`]s. Dublin Core
//! elements repeat freely, so every value is appended to its field's list in
//! document order. Records flagged `status="deleted"` carry no metadata and
//! are dropped. A protocol `<error>` element fails the whole page.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{AppError, AppResult};
use crate::models::RawRecord;

/// One page of a ListRecords response
#[derive(Debug, Clone, Default)]
pub struct OaiPage {
    pub records: Vec<RawRecord>,
    /// Present when the repository has more pages to give
    pub resumption_token: Option<String>,
}

/// Where text content currently belongs
enum TextTarget {
    None,
    OaiIdentifier,
    MetadataField(String),
    ResumptionToken,
    Error,
}

/// Parse a full ListRecords response body
pub fn parse_list_records(xml: &str) -> AppResult<OaiPage> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = true;

    let mut page = OaiPage::default();
    let mut current: Option<RawRecord> = None;
    let mut in_header = false;
    let mut in_metadata = false;
    let mut deleted = false;
    let mut target = TextTarget::None;
    let mut error_code: Option<String> = None;
    let mut error_message = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name()).as_str() {
                "record" => {
                    current = Some(RawRecord::new(""));
                    deleted = false;
                }
                "header" => {
                    in_header = true;
                    if attribute(&e, "status")?.as_deref() == Some("deleted") {
                        deleted = true;
                    }
                }
                "identifier" if in_header => target = TextTarget::OaiIdentifier,
                "metadata" => in_metadata = true,
                "resumptionToken" => target = TextTarget::ResumptionToken,
                "error" => {
                    error_code = Some(attribute(&e, "code")?.unwrap_or_default());
                    target = TextTarget::Error;
                }
                // oai_dc:dc is a plain container; its children are the fields
                "dc" => {}
                field if in_metadata => target = TextTarget::MetadataField(field.to_string()),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                // self-closing elements carry no text; only the header status
                // and error code attributes matter here
                match local_name(e.name()).as_str() {
                    "header" => {
                        if attribute(&e, "status")?.as_deref() == Some("deleted") {
                            deleted = true;
                        }
                    }
                    "error" => {
                        error_code = Some(attribute(&e, "code")?.unwrap_or_default());
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .xml_content()
                    .map_err(|err| AppError::Parse(format!("bad text content: {err}")))?;
                match &target {
                    TextTarget::OaiIdentifier => {
                        if let Some(record) = current.as_mut() {
                            record.oai_identifier = text.into_owned();
                        }
                    }
                    TextTarget::MetadataField(field) => {
                        if let Some(record) = current.as_mut() {
                            record.push(field.clone(), text.into_owned());
                        }
                    }
                    TextTarget::ResumptionToken => {
                        let token = text.trim().to_string();
                        if !token.is_empty() {
                            page.resumption_token = Some(token);
                        }
                    }
                    TextTarget::Error => error_message.push_str(&text),
                    TextTarget::None => {}
                }
            }
            Ok(Event::End(e)) => match local_name(e.name()).as_str() {
                "record" => {
                    if let Some(record) = current.take() {
                        if deleted {
                            tracing::debug!(
                                oai_identifier = %record.oai_identifier,
                                "skipping deleted record"
                            );
                        } else {
                            page.records.push(record);
                        }
                    }
                }
                "header" => {
                    in_header = false;
                    target = TextTarget::None;
                }
                "metadata" => in_metadata = false,
                _ => target = TextTarget::None,
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(AppError::Parse(format!("malformed OAI response: {err}"))),
        }
    }

    if let Some(code) = error_code {
        return Err(AppError::oai(code, error_message));
    }

    Ok(page)
}

/// Element name without its namespace prefix
fn local_name(name: QName<'_>) -> String {
    let name = String::from_utf8_lossy(name.as_ref()).into_owned();
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name,
    }
}

/// Read one attribute by unprefixed name
fn attribute(e: &BytesStart<'_>, name: &str) -> AppResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| AppError::Parse(format!("bad attribute: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let key = key.rsplit_once(':').map_or(key.clone(), |(_, k)| k.to_string());
        if key == name {
            let value = attr
                .unescape_value()
                .map_err(|err| AppError::Parse(format!("bad attribute value: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
