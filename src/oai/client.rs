//! OAI-PMH HTTP client
//!
//! Thin wrapper around `reqwest` for the ListRecords verb. Paging state is
//! the caller's: each call returns at most one page plus the token for the
//! next one.

use crate::config::FeedConfig;
use crate::error::AppResult;
use crate::oai::parser::{parse_list_records, OaiPage};

pub struct OaiClient {
    client: reqwest::Client,
    endpoint: String,
    metadata_prefix: String,
}

impl OaiClient {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            metadata_prefix: config.metadata_prefix.clone(),
        }
    }

    /// Fetch one page of records. Pass the previous page's resumption token
    /// to continue a harvest; the initial request must not carry one.
    pub async fn list_records(&self, resumption_token: Option<&str>) -> AppResult<OaiPage> {
        let request = match resumption_token {
            // the protocol forbids combining resumptionToken with other arguments
            Some(token) => self
                .client
                .get(&self.endpoint)
                .query(&[("verb", "ListRecords"), ("resumptionToken", token)]),
            None => self.client.get(&self.endpoint).query(&[
                ("verb", "ListRecords"),
                ("metadataPrefix", self.metadata_prefix.as_str()),
            ]),
        };

        tracing::debug!(endpoint = %self.endpoint, token = ?resumption_token, "fetching feed page");
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let page = parse_list_records(&body)?;
        tracing::info!(
            records = page.records.len(),
            has_more = page.resumption_token.is_some(),
            "fetched feed page"
        );
        Ok(page)
    }
}
