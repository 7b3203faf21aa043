//! OAI-PMH feed access
//!
//! A minimal ListRecords client for `oai_dc` metadata: [`client`] speaks HTTP
//! and follows resumption tokens, [`parser`] turns the protocol envelope into
//! raw records. Failures here are infrastructure errors and abort the
//! harvest, unlike normalization which never fails.

pub mod client;
pub mod parser;

pub use client::OaiClient;
pub use parser::{parse_list_records, OaiPage};
