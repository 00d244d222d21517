// Observation store collaborator (read-only view)

use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::models::StoredItem;

/// One logical table per monitor type, keyed by thing id.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Items in `table` whose thing id equals `thing_id`, most recent first.
    async fn query(
        &self,
        table: &str,
        thing_id: &str,
    ) -> Result<Vec<StoredItem>, CollaboratorError>;
}
