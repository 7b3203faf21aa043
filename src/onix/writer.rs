//! ONIX XML serialization
//!
//! Event-based writer producing an ONIX 3.0-shaped document from an
//! [`OnixMessage`]. Only I/O and encoding errors propagate; the message
//! itself is always serializable.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::AppResult;
use crate::onix::model::OnixMessage;

/// ONIX 3.0 reference-tag namespace
const ONIX_NS: &str = "http://ns.editeur.org/onix/3.0/reference";

/// Write the message to `path`, creating parent directories as needed
pub fn write_onix_file(path: &Path, message: &OnixMessage) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_onix(&mut writer, message)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), "wrote ONIX metadata file");
    Ok(())
}

/// Serialize the message to any writer
pub fn write_onix<W: Write>(out: W, message: &OnixMessage) -> AppResult<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("ONIXMessage");
    root.push_attribute(("xmlns", ONIX_NS));
    root.push_attribute(("release", "3.0"));
    xml.write_event(Event::Start(root))?;

    // header
    xml.write_event(Event::Start(BytesStart::new("Header")))?;
    write_text_element(&mut xml, "SentDateTime", &message.header.sent_date_time)?;
    xml.write_event(Event::End(BytesEnd::new("Header")))?;

    // product
    let product = &message.product;
    xml.write_event(Event::Start(BytesStart::new("Product")))?;
    write_text_element(&mut xml, "RecordReference", &product.record_reference)?;
    write_text_element(&mut xml, "NotificationType", &product.notification_type)?;

    xml.write_event(Event::Start(BytesStart::new("ProductIdentifier")))?;
    // 15 = ISBN-13
    write_text_element(&mut xml, "ProductIDType", "15")?;
    write_text_element(&mut xml, "IDValue", &product.product_identifier.product_id_value)?;
    xml.write_event(Event::End(BytesEnd::new("ProductIdentifier")))?;

    let descriptive = &product.descriptive_detail;
    xml.write_event(Event::Start(BytesStart::new("DescriptiveDetail")))?;
    write_text_element(&mut xml, "ProductFormDetail", &descriptive.product_form_detail)?;

    xml.write_event(Event::Start(BytesStart::new("TitleDetail")))?;
    xml.write_event(Event::Start(BytesStart::new("TitleElement")))?;
    write_text_element(
        &mut xml,
        "TitleText",
        &descriptive.title_detail.title_element.title_text,
    )?;
    xml.write_event(Event::End(BytesEnd::new("TitleElement")))?;
    xml.write_event(Event::End(BytesEnd::new("TitleDetail")))?;

    for contributor in &descriptive.contributors {
        xml.write_event(Event::Start(BytesStart::new("Contributor")))?;
        write_text_element(&mut xml, "SequenceNumber", &contributor.sequence_number)?;
        write_text_element(&mut xml, "ContributorRole", &contributor.contributor_role)?;
        write_text_element(&mut xml, "PersonName", &contributor.person_name)?;
        xml.write_event(Event::End(BytesEnd::new("Contributor")))?;
    }

    xml.write_event(Event::Start(BytesStart::new("Language")))?;
    write_text_element(&mut xml, "LanguageCode", &descriptive.language.language_code)?;
    xml.write_event(Event::End(BytesEnd::new("Language")))?;

    xml.write_event(Event::Start(BytesStart::new("Subject")))?;
    // 10 = BISAC subject heading
    write_text_element(&mut xml, "SubjectSchemeIdentifier", "10")?;
    write_text_element(&mut xml, "SubjectCode", &descriptive.subject.subject_code)?;
    xml.write_event(Event::End(BytesEnd::new("Subject")))?;
    xml.write_event(Event::End(BytesEnd::new("DescriptiveDetail")))?;

    xml.write_event(Event::Start(BytesStart::new("CollateralDetail")))?;
    xml.write_event(Event::Start(BytesStart::new("TextContent")))?;
    // 03 = description
    write_text_element(&mut xml, "TextType", "03")?;
    write_text_element(&mut xml, "Text", &product.collateral_detail.text_content_text)?;
    xml.write_event(Event::End(BytesEnd::new("TextContent")))?;
    xml.write_event(Event::End(BytesEnd::new("CollateralDetail")))?;

    let publishing = &product.publishing_detail;
    xml.write_event(Event::Start(BytesStart::new("PublishingDetail")))?;
    xml.write_event(Event::Start(BytesStart::new("Publisher")))?;
    write_text_element(&mut xml, "PublisherName", &publishing.publisher.publisher_name)?;
    xml.write_event(Event::End(BytesEnd::new("Publisher")))?;
    xml.write_event(Event::Start(BytesStart::new("PublishingDate")))?;
    write_text_element(
        &mut xml,
        "Date",
        &publishing.publishing_date.publishing_date_date,
    )?;
    xml.write_event(Event::End(BytesEnd::new("PublishingDate")))?;
    xml.write_event(Event::Start(BytesStart::new("SalesRights")))?;
    xml.write_event(Event::Start(BytesStart::new("Territory")))?;
    write_text_element(
        &mut xml,
        "CountriesIncluded",
        &publishing.sales_rights.countries_included,
    )?;
    xml.write_event(Event::End(BytesEnd::new("Territory")))?;
    xml.write_event(Event::End(BytesEnd::new("SalesRights")))?;
    xml.write_event(Event::End(BytesEnd::new("PublishingDetail")))?;

    let supply = &product.product_supply;
    xml.write_event(Event::Start(BytesStart::new("ProductSupply")))?;
    xml.write_event(Event::Start(BytesStart::new("SupplyDetail")))?;
    xml.write_event(Event::Start(BytesStart::new("Supplier")))?;
    write_text_element(&mut xml, "SupplierName", &supply.supplier.supplier_name)?;
    xml.write_event(Event::End(BytesEnd::new("Supplier")))?;
    write_text_element(&mut xml, "ProductAvailability", &supply.product_availability)?;
    xml.write_event(Event::Start(BytesStart::new("Price")))?;
    write_text_element(&mut xml, "PriceType", &supply.price.price_type)?;
    write_text_element(&mut xml, "PriceAmount", &supply.price.price_amount)?;
    write_text_element(&mut xml, "CurrencyCode", &supply.price.currency_code)?;
    xml.write_event(Event::End(BytesEnd::new("Price")))?;
    xml.write_event(Event::End(BytesEnd::new("SupplyDetail")))?;
    xml.write_event(Event::End(BytesEnd::new("ProductSupply")))?;

    xml.write_event(Event::End(BytesEnd::new("Product")))?;
    xml.write_event(Event::End(BytesEnd::new("ONIXMessage")))?;
    Ok(())
}

/// Write `<name>value</name>` in one go
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> AppResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
