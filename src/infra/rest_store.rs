use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::app::ports::{BulkInsertAck, RosterStorePort};
use crate::config::StoreConfig;
use crate::error::{ImportError, Result};
use crate::pipeline::payload::ParticipantRecord;

/// REST adapter for the roster store. Posts the whole batch as one JSON
/// array; an array response enumerates the created records.
///
/// Credentials: `api_key` from config, or the ROSTER_STORE_API_KEY
/// environment variable when the config leaves it unset.
pub struct RestRosterStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestRosterStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ROSTER_STORE_API_KEY").ok());

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl RosterStorePort for RestRosterStore {
    async fn create_many(
        &self,
        campaign_id: &str,
        batch: &[ParticipantRecord],
    ) -> Result<BulkInsertAck> {
        let endpoint = format!(
            "{}/campaigns/{}/participants:batchCreate",
            self.base_url, campaign_id
        );

        let mut request = self.client.post(&endpoint).json(&batch);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ImportError::Store {
                message: format!("{} - {}", status, body),
            });
        }

        // The store may answer with the created records or with an opaque
        // acknowledgement; only an array counts as an enumeration
        let created = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.as_array().map(|records| records.len()));

        Ok(BulkInsertAck { created })
    }
}
