use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::ports::RosterStorePort;
use crate::domain::ParsedRow;
use crate::error::{ImportError, Result};
use crate::pipeline::payload::build_payload;

/// Result of a completed import attempt
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub submitted: usize,
    pub created: usize,
}

/// Orchestrates one import action: build the payload from the current row
/// buffer and issue exactly one create-many request. The caller keeps
/// ownership of the rows, so a failed batch leaves the buffer untouched for
/// a manual retry.
pub struct ImportService {
    store: Arc<dyn RosterStorePort>,
    in_flight: AtomicBool,
}

impl ImportService {
    pub fn new(store: Arc<dyn RosterStorePort>) -> Self {
        Self {
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn submit(
        &self,
        rows: &[ParsedRow],
        campaign_id: &str,
        category: &str,
    ) -> Result<ImportOutcome> {
        let batch = build_payload(rows, category);
        if batch.is_empty() {
            warn!("no importable rows; nothing submitted");
            return Ok(ImportOutcome {
                submitted: 0,
                created: 0,
            });
        }

        // One submission per buffer at a time
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ImportError::SubmissionInFlight);
        }

        let batch_id = Uuid::new_v4();
        info!(%batch_id, campaign = campaign_id, category, size = batch.len(), "submitting batch");
        let result = self.store.create_many(campaign_id, &batch).await;
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(ack) => {
                // Fall back to the submitted count when the store response
                // does not enumerate individual records
                let created = ack.created.unwrap_or(batch.len());
                info!(%batch_id, created, "batch accepted");
                Ok(ImportOutcome {
                    submitted: batch.len(),
                    created,
                })
            }
            Err(e) => {
                warn!(%batch_id, error = %e, "batch failed; buffer preserved for retry");
                Err(e)
            }
        }
    }
}
