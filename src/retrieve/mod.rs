// Observation resolution & retrieval.
//
// thing id -> registry listing -> principals -> observation table -> parsed record.
// Each step is an await point on a collaborator; the first failure ends the request.

mod steps;

use serde::Deserialize;
use std::sync::Arc;
use tracing::Instrument;

use crate::catalog::MonitorCatalog;
use crate::error::{ErrorKind, ResolveError, RetrieveError};
use crate::models::{MonitorType, Observation, ResolvedThing};
use crate::registry::DeviceRegistry;
use crate::store::ObservationStore;

/// Request payload: at minimum the thing id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    pub thing_id: String,
}

impl RetrieveRequest {
    pub fn new(thing_id: impl Into<String>) -> Self {
        Self {
            thing_id: thing_id.into(),
        }
    }
}

/// Per-request execution context. Failures are logged against its request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Context with a fresh v4 UUID request id.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

/// Cheap to clone; share one per process.
#[derive(Clone)]
pub struct Retriever {
    registry: Arc<dyn DeviceRegistry>,
    store: Arc<dyn ObservationStore>,
    catalog: Arc<MonitorCatalog>,
}

impl Retriever {
    pub fn new(
        registry: Arc<dyn DeviceRegistry>,
        store: Arc<dyn ObservationStore>,
        catalog: MonitorCatalog,
    ) -> Self {
        Self {
            registry,
            store,
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &MonitorCatalog {
        &self.catalog
    }

    /// Latest observation of `monitor_type` for a registered, provisioned thing.
    pub async fn retrieve(
        &self,
        monitor_type: MonitorType,
        request: &RetrieveRequest,
        ctx: &RequestContext,
    ) -> Result<Observation, RetrieveError> {
        let span = tracing::info_span!(
            "retrieve",
            request_id = %ctx.request_id(),
            thing_id = %request.thing_id,
            %monitor_type,
        );
        async {
            match self.resolve_observation(monitor_type, &request.thing_id).await {
                Ok(observation) => {
                    tracing::debug!(
                        counter = observation.counter(),
                        timestamp = %observation.timestamp(),
                        "observation retrieved"
                    );
                    Ok(observation)
                }
                Err(e) => Err(log_and_narrow(e, &request.thing_id)),
            }
        }
        .instrument(span)
        .await
    }

    /// Registry entry and principal count for a registered, provisioned thing.
    pub async fn resolve_thing(
        &self,
        request: &RetrieveRequest,
        ctx: &RequestContext,
    ) -> Result<ResolvedThing, RetrieveError> {
        let span = tracing::info_span!(
            "resolve_thing",
            request_id = %ctx.request_id(),
            thing_id = %request.thing_id,
        );
        async {
            self.resolve_provisioned(&request.thing_id)
                .await
                .map_err(|e| log_and_narrow(e, &request.thing_id))
        }
        .instrument(span)
        .await
    }

    async fn resolve_provisioned(&self, thing_id: &str) -> Result<ResolvedThing, ResolveError> {
        let thing_id = steps::validate_thing_id(thing_id)?;
        let entry = steps::check_thing_exists(self.registry.as_ref(), thing_id).await?;
        let principal_count = steps::check_principals(self.registry.as_ref(), thing_id).await?;
        Ok(ResolvedThing {
            entry,
            principal_count,
        })
    }

    async fn resolve_observation(
        &self,
        monitor_type: MonitorType,
        thing_id: &str,
    ) -> Result<Observation, ResolveError> {
        let thing = self.resolve_provisioned(thing_id).await?;
        steps::query_latest(
            self.store.as_ref(),
            &self.catalog,
            monitor_type,
            &thing.entry.thing_name,
        )
        .await
    }
}

fn log_and_narrow(e: ResolveError, thing_id: &str) -> RetrieveError {
    let step = e.step();
    match e.kind() {
        ErrorKind::ResourceNotFound => {
            tracing::warn!(error = %e, %step, "resource not found");
        }
        ErrorKind::Deserialization => {
            tracing::error!(error = %e, %step, "stored observation could not be parsed");
        }
        ErrorKind::ServiceUnavailable => {
            tracing::error!(error = %e, %step, "collaborator call failed");
        }
    }
    e.into_public(thing_id)
}
