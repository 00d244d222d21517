// The three lookups, each short-circuiting with a ResolveError.

use tracing::debug;

use crate::catalog::MonitorCatalog;
use crate::error::ResolveError;
use crate::models::{MonitorType, Observation, ThingEntry};
use crate::registry::DeviceRegistry;
use crate::store::ObservationStore;

pub(super) fn validate_thing_id(thing_id: &str) -> Result<&str, ResolveError> {
    if thing_id.trim().is_empty() {
        return Err(ResolveError::BlankThingId);
    }
    Ok(thing_id)
}

/// Device existence check: the registry listing must contain `thing_id`.
pub(super) async fn check_thing_exists(
    registry: &dyn DeviceRegistry,
    thing_id: &str,
) -> Result<ThingEntry, ResolveError> {
    let things = registry
        .list_things()
        .await
        .map_err(ResolveError::Registry)?;
    debug!(things_count = things.len(), "registry listing received");
    things
        .into_iter()
        .find(|t| t.thing_name == thing_id)
        .ok_or_else(|| ResolveError::UnknownThing {
            thing_id: thing_id.to_string(),
        })
}

/// Credential presence check: at least one principal must be attached.
pub(super) async fn check_principals(
    registry: &dyn DeviceRegistry,
    thing_id: &str,
) -> Result<usize, ResolveError> {
    let principals = registry
        .list_thing_principals(thing_id)
        .await
        .map_err(ResolveError::Principals)?;
    if principals.is_empty() {
        return Err(ResolveError::NoPrincipals {
            thing_id: thing_id.to_string(),
        });
    }
    Ok(principals.len())
}

/// Query the monitor type's table and parse the first (most recent) item.
pub(super) async fn query_latest(
    store: &dyn ObservationStore,
    catalog: &MonitorCatalog,
    monitor_type: MonitorType,
    thing_id: &str,
) -> Result<Observation, ResolveError> {
    let table = catalog.table(monitor_type);
    let items = store
        .query(table, thing_id)
        .await
        .map_err(ResolveError::Store)?;
    let Some(item) = items.into_iter().next() else {
        return Err(ResolveError::NoObservation {
            thing_id: thing_id.to_string(),
            monitor_type,
            table: table.to_string(),
        });
    };
    Observation::parse(monitor_type, &item.observation).map_err(|source| {
        ResolveError::CorruptPayload {
            thing_id: thing_id.to_string(),
            monitor_type,
            source,
        }
    })
}
