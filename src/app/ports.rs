use async_trait::async_trait;

use crate::error::Result;
use crate::pipeline::payload::ParticipantRecord;

/// Acknowledgement from the bulk-insert collaborator.
#[derive(Clone, Debug)]
pub struct BulkInsertAck {
    /// Number of records the store enumerated as created; None when the
    /// response does not enumerate individual records
    pub created: Option<usize>,
}

/// Remote roster store boundary. The pipeline itself performs no network
/// I/O; this port is the only way a batch leaves the process.
#[async_trait]
pub trait RosterStorePort: Send + Sync {
    async fn create_many(
        &self,
        campaign_id: &str,
        batch: &[ParticipantRecord],
    ) -> Result<BulkInsertAck>;
}
