// Device registry collaborator (read-only view)

use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::models::ThingEntry;

/// Read-only view of the device registry.
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// All things known to the registry.
    async fn list_things(&self) -> Result<Vec<ThingEntry>, CollaboratorError>;

    /// Principals (certificates / credentials) attached to `thing_name`. Empty when the thing
    /// is registered but not provisioned.
    async fn list_thing_principals(
        &self,
        thing_name: &str,
    ) -> Result<Vec<String>, CollaboratorError>;
}
