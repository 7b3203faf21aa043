//! Language cross-reference repository
//!
//! The ONIX metadata store keeps languages as numeric ids while the feed
//! sends plain labels ("English"). This repository loads the label-to-id
//! mapping once per harvest and patches `meta_data.language_id` for each
//! published ISBN.

use std::collections::HashMap;

use sqlx::{MySqlPool, Row};

use crate::error::AppResult;

#[derive(Clone)]
pub struct LanguageRepository {
    pool: MySqlPool,
}

impl LanguageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Load the full language label to id mapping
    pub async fn language_ids(&self) -> AppResult<HashMap<String, i32>> {
        let rows = sqlx::query("SELECT id, language FROM languages")
            .fetch_all(&self.pool)
            .await?;

        let mut mapping = HashMap::with_capacity(rows.len());
        for row in rows {
            let id: i32 = row.try_get("id")?;
            let language: String = row.try_get("language")?;
            mapping.insert(language, id);
        }
        tracing::debug!(languages = mapping.len(), "loaded language mapping");
        Ok(mapping)
    }

    /// Point the metadata row for `isbn13` at the given language id.
    /// Returns the number of rows touched (zero when the ISBN is not stored).
    pub async fn update_language_id(&self, isbn13: &str, language_id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE meta_data SET language_id = ? WHERE ProductIdentifier_ISBN13_IDValue = ?",
        )
        .bind(language_id)
        .bind(isbn13)
        .execute(&self.pool)
        .await?;

        let affected = result.rows_affected();
        if affected == 0 {
            tracing::warn!(isbn13 = %isbn13, "no metadata row for ISBN, language not updated");
        }
        Ok(affected)
    }
}
