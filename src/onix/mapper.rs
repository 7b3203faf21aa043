//! Book record to ONIX message mapping
//!
//! A one-shot pure reshape: the canonical flat record becomes the nested
//! header/product tree. No state survives the call.

use chrono::{NaiveDate, Utc};

use crate::models::{BookFormat, BookRecord};
use crate::normalize::fields::ONIX_DATE_FORMAT;
use crate::onix::model::{
    CollateralDetail, Contributor, DescriptiveDetail, Header, Language, OnixMessage, Price,
    Product, ProductIdentifier, ProductSupply, Publisher, PublishingDate, PublishingDetail,
    SalesRights, Subject, Supplier, TitleDetail, TitleElement,
};

/// Fixed supplier for every product the library distributes
const SUPPLIER_NAME: &str = "Open Research Library";

/// ONIX notification type: notification confirmed on publication
const NOTIFICATION_TYPE: &str = "03";

/// ONIX product availability: available
const PRODUCT_AVAILABILITY: &str = "20";

impl OnixMessage {
    /// Render a publishable book record into an ONIX message dated today
    pub fn from_book(book: &BookRecord) -> Self {
        Self::from_book_at(book, Utc::now().date_naive())
    }

    /// Render with an explicit message date
    pub fn from_book_at(book: &BookRecord, sent_date: NaiveDate) -> Self {
        let header = Header {
            sent_date_time: sent_date.format(ONIX_DATE_FORMAT).to_string(),
        };

        let product_form_detail = match book.format {
            BookFormat::Pdf => "E107",
            _ => "E101",
        };

        let descriptive_detail = DescriptiveDetail {
            product_form_detail: product_form_detail.to_string(),
            title_detail: TitleDetail {
                title_element: TitleElement {
                    title_text: book.title.clone(),
                },
            },
            contributors: contributors(&book.contributors),
            language: Language {
                language_code: book.language.clone(),
            },
            // ONIX carries a single main subject; the feed's first BISAC code wins
            subject: Subject {
                subject_code: book.bisac_subjects.first().cloned().unwrap_or_default(),
            },
        };

        let publishing_detail = PublishingDetail {
            publisher: Publisher {
                publisher_name: book.publisher_name.clone(),
            },
            publishing_date: PublishingDate {
                publishing_date_date: book.publication_date.clone(),
            },
            sales_rights: SalesRights {
                countries_included: book.allowed_countries.clone(),
            },
        };

        let product_supply = ProductSupply {
            supplier: Supplier {
                supplier_name: SUPPLIER_NAME.to_string(),
            },
            product_availability: PRODUCT_AVAILABILITY.to_string(),
            price: Price {
                currency_code: "GBP".to_string(),
                price_amount: "0".to_string(),
                price_type: "01".to_string(),
            },
        };

        let product = Product {
            record_reference: book.record_reference.clone(),
            notification_type: NOTIFICATION_TYPE.to_string(),
            product_identifier: ProductIdentifier {
                product_id_value: book.isbn13.clone(),
            },
            descriptive_detail,
            collateral_detail: CollateralDetail {
                text_content_text: book.description.clone(),
            },
            publishing_detail,
            product_supply,
        };

        OnixMessage { header, product }
    }
}

/// Wrap the contributor display string into a list of one A01 role record
fn contributors(person_name: &str) -> Vec<Contributor> {
    vec![Contributor {
        contributor_role: "A01".to_string(),
        person_name: person_name.to_string(),
        sequence_number: "1".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookFormat;

    fn sample_book() -> BookRecord {
        BookRecord {
            isbn13: "9780199660797".to_string(),
            title: "Scheherazade's Children".to_string(),
            language: "English".to_string(),
            bisac_subjects: vec!["PSY026000".to_string(), "SOC032000".to_string()],
            format: BookFormat::Pdf,
            contributors: "Helga Reinisch".to_string(),
            description: "A study of desire in analysis.".to_string(),
            publisher_name: "Oxford University Press".to_string(),
            publication_date: "20130101".to_string(),
            allowed_countries: "WORLD".to_string(),
            record_reference: "9780199660797.pdf".to_string(),
            book_id: Some("29ca6d26".to_string()),
            download_link: String::new(),
        }
    }

    #[test]
    fn test_pdf_maps_to_e107() {
        let message = OnixMessage::from_book(&sample_book());
        assert_eq!(message.product.descriptive_detail.product_form_detail, "E107");
    }

    #[test]
    fn test_non_pdf_maps_to_e101() {
        let mut book = sample_book();
        book.format = BookFormat::Epub;
        let message = OnixMessage::from_book(&book);
        assert_eq!(message.product.descriptive_detail.product_form_detail, "E101");
    }

    #[test]
    fn test_contributors_wrapped_as_single_role_record() {
        let message = OnixMessage::from_book(&sample_book());
        let contributors = &message.product.descriptive_detail.contributors;
        assert_eq!(contributors.len(), 1);
        assert_eq!(contributors[0].contributor_role, "A01");
        assert_eq!(contributors[0].sequence_number, "1");
        assert_eq!(contributors[0].person_name, "Helga Reinisch");
    }

    #[test]
    fn test_first_bisac_subject_only() {
        let message = OnixMessage::from_book(&sample_book());
        assert_eq!(
            message.product.descriptive_detail.subject.subject_code,
            "PSY026000"
        );
    }

    #[test]
    fn test_header_carries_explicit_date() {
        let date = NaiveDate::from_ymd_opt(2020, 8, 9).unwrap();
        let message = OnixMessage::from_book_at(&sample_book(), date);
        assert_eq!(message.header.sent_date_time, "20200809");
    }

    #[test]
    fn test_fixed_supply_block() {
        let message = OnixMessage::from_book(&sample_book());
        let supply = &message.product.product_supply;
        assert_eq!(supply.supplier.supplier_name, "Open Research Library");
        assert_eq!(supply.product_availability, "20");
        assert_eq!(supply.price.currency_code, "GBP");
        assert_eq!(supply.price.price_amount, "0");
        assert_eq!(supply.price.price_type, "01");
    }

    #[test]
    fn test_product_identity_fields() {
        let message = OnixMessage::from_book(&sample_book());
        assert_eq!(message.product.record_reference, "9780199660797.pdf");
        assert_eq!(message.product.notification_type, "03");
        assert_eq!(
            message.product.product_identifier.product_id_value,
            "9780199660797"
        );
    }
}
