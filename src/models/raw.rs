//! Raw OAI-PMH record model
//!
//! An `oai_dc` record is a bag of repeated Dublin Core elements. The feed is
//! third-party and uncontrolled: keys may be absent, lists may be empty, and
//! the same logical field may carry junk entries. Every lookup therefore
//! returns an `Option` and the normalizer functions own the defaulting.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw harvested record: field name to ordered list of values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// OAI identifier of the record (header, not a metadata field)
    pub oai_identifier: String,
    fields: IndexMap<String, Vec<String>>,
}

impl RawRecord {
    pub fn new(oai_identifier: impl Into<String>) -> Self {
        Self {
            oai_identifier: oai_identifier.into(),
            fields: IndexMap::new(),
        }
    }

    /// Append a value to a field, creating the field on first use.
    /// Repeated Dublin Core elements accumulate in document order.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_insert_with(Vec::new)
            .push(value.into());
    }

    /// Get all values for a field, `None` when the feed never sent it
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Number of distinct fields present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
