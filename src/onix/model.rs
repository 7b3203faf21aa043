//! ONIX message model
//!
//! Explicit structs for the subset of ONIX 3.0 the library emits. Each value
//! is constructed per message; there is no shared mutable template.

use serde::Serialize;

/// A complete ONIX message: one header, one product
#[derive(Debug, Clone, Serialize)]
pub struct OnixMessage {
    pub header: Header,
    pub product: Product,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    /// YYYYMMDD, the day the message was generated
    pub sent_date_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub record_reference: String,
    pub notification_type: String,
    pub product_identifier: ProductIdentifier,
    pub descriptive_detail: DescriptiveDetail,
    pub collateral_detail: CollateralDetail,
    pub publishing_detail: PublishingDetail,
    pub product_supply: ProductSupply,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductIdentifier {
    pub product_id_value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptiveDetail {
    pub product_form_detail: String,
    pub title_detail: TitleDetail,
    pub contributors: Vec<Contributor>,
    pub language: Language,
    pub subject: Subject,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleDetail {
    pub title_element: TitleElement,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleElement {
    pub title_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contributor {
    pub contributor_role: String,
    pub person_name: String,
    pub sequence_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub language_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    pub subject_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollateralDetail {
    pub text_content_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishingDetail {
    pub publisher: Publisher,
    pub publishing_date: PublishingDate,
    pub sales_rights: SalesRights,
}

#[derive(Debug, Clone, Serialize)]
pub struct Publisher {
    pub publisher_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishingDate {
    pub publishing_date_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesRights {
    pub countries_included: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSupply {
    pub supplier: Supplier,
    pub product_availability: String,
    pub price: Price,
}

#[derive(Debug, Clone, Serialize)]
pub struct Supplier {
    pub supplier_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Price {
    pub currency_code: String,
    pub price_amount: String,
    pub price_type: String,
}
