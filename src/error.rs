// Error taxonomy for observation retrieval.
//
// Collaborators fail with `CollaboratorError`. The resolution pipeline works with the richer
// `ResolveError`, which records which lookup failed, and narrows it into the public
// `RetrieveError` before it leaves the crate. Display strings start with the kind name so
// callers that only see text can still match on it.

use serde::Serialize;
use std::fmt;

use crate::models::MonitorType;

/// Lookup that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStep {
    /// The request itself (e.g. blank thing id), before any collaborator is called.
    Request,
    /// Device existence check against the registry thing listing.
    Registry,
    /// Credential presence check (principals attached to the thing).
    Principals,
    /// Observation store query and payload parsing.
    Observation,
}

impl fmt::Display for LookupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupStep::Request => "request",
            LookupStep::Registry => "registry",
            LookupStep::Principals => "principals",
            LookupStep::Observation => "observation",
        })
    }
}

/// Failure reported by the device registry or the observation store.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid table name '{0}'")]
    InvalidTable(String),

    #[error("malformed registry data: {0}")]
    Malformed(String),
}

/// Externally visible error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ResourceNotFound,
    Deserialization,
    ServiceUnavailable,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::ResourceNotFound => "ResourceNotFoundError",
            ErrorKind::Deserialization => "DeserializationError",
            ErrorKind::ServiceUnavailable => "ServiceUnavailableError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown thing, unprovisioned thing and missing observation all look the same to callers.
/// The failing step is kept for logs and diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ResourceNotFoundError: requested resource for thing '{thing_id}' does not exist")]
pub struct ResourceNotFound {
    thing_id: String,
    step: LookupStep,
}

impl ResourceNotFound {
    pub(crate) fn new(thing_id: impl Into<String>, step: LookupStep) -> Self {
        Self {
            thing_id: thing_id.into(),
            step,
        }
    }

    pub fn thing_id(&self) -> &str {
        &self.thing_id
    }

    pub fn step(&self) -> LookupStep {
        self.step
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error(transparent)]
    NotFound(#[from] ResourceNotFound),

    #[error(
        "DeserializationError: stored {monitor_type} observation for thing '{thing_id}' is malformed: {source}"
    )]
    Deserialization {
        thing_id: String,
        monitor_type: MonitorType,
        #[source]
        source: serde_json::Error,
    },

    #[error("ServiceUnavailableError: {step} lookup failed: {source}")]
    Unavailable {
        step: LookupStep,
        #[source]
        source: CollaboratorError,
    },
}

impl RetrieveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RetrieveError::NotFound(_) => ErrorKind::ResourceNotFound,
            RetrieveError::Deserialization { .. } => ErrorKind::Deserialization,
            RetrieveError::Unavailable { .. } => ErrorKind::ServiceUnavailable,
        }
    }

    pub fn step(&self) -> LookupStep {
        match self {
            RetrieveError::NotFound(e) => e.step(),
            RetrieveError::Deserialization { .. } => LookupStep::Observation,
            RetrieveError::Unavailable { step, .. } => *step,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::ResourceNotFound
    }
}

/// Pipeline-internal error: one variant per way a lookup can fail.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ResolveError {
    #[error("thing id is empty")]
    BlankThingId,

    #[error("thing '{thing_id}' is not registered")]
    UnknownThing { thing_id: String },

    #[error("thing '{thing_id}' has no attached principals")]
    NoPrincipals { thing_id: String },

    #[error("no {monitor_type} observation stored for thing '{thing_id}' in {table}")]
    NoObservation {
        thing_id: String,
        monitor_type: MonitorType,
        table: String,
    },

    #[error("stored {monitor_type} observation for thing '{thing_id}' is malformed: {source}")]
    CorruptPayload {
        thing_id: String,
        monitor_type: MonitorType,
        #[source]
        source: serde_json::Error,
    },

    #[error("registry list things failed: {0}")]
    Registry(#[source] CollaboratorError),

    #[error("registry list principals failed: {0}")]
    Principals(#[source] CollaboratorError),

    #[error("observation store query failed: {0}")]
    Store(#[source] CollaboratorError),
}

impl ResolveError {
    pub(crate) fn step(&self) -> LookupStep {
        match self {
            ResolveError::BlankThingId => LookupStep::Request,
            ResolveError::UnknownThing { .. } | ResolveError::Registry(_) => LookupStep::Registry,
            ResolveError::NoPrincipals { .. } | ResolveError::Principals(_) => {
                LookupStep::Principals
            }
            ResolveError::NoObservation { .. }
            | ResolveError::CorruptPayload { .. }
            | ResolveError::Store(_) => LookupStep::Observation,
        }
    }

    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::BlankThingId
            | ResolveError::UnknownThing { .. }
            | ResolveError::NoPrincipals { .. }
            | ResolveError::NoObservation { .. } => ErrorKind::ResourceNotFound,
            ResolveError::CorruptPayload { .. } => ErrorKind::Deserialization,
            ResolveError::Registry(_) | ResolveError::Principals(_) | ResolveError::Store(_) => {
                ErrorKind::ServiceUnavailable
            }
        }
    }

    /// Narrow into the public error. `thing_id` is the id as requested.
    pub(crate) fn into_public(self, thing_id: &str) -> RetrieveError {
        let step = self.step();
        match self {
            ResolveError::BlankThingId
            | ResolveError::UnknownThing { .. }
            | ResolveError::NoPrincipals { .. }
            | ResolveError::NoObservation { .. } => {
                RetrieveError::NotFound(ResourceNotFound::new(thing_id, step))
            }
            ResolveError::CorruptPayload {
                thing_id,
                monitor_type,
                source,
            } => RetrieveError::Deserialization {
                thing_id,
                monitor_type,
                source,
            },
            ResolveError::Registry(source)
            | ResolveError::Principals(source)
            | ResolveError::Store(source) => RetrieveError::Unavailable { step, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_steps_narrow_to_one_kind() {
        let errors = [
            ResolveError::BlankThingId,
            ResolveError::UnknownThing {
                thing_id: "t".into(),
            },
            ResolveError::NoPrincipals {
                thing_id: "t".into(),
            },
            ResolveError::NoObservation {
                thing_id: "t".into(),
                monitor_type: MonitorType::Disk,
                table: "DragonPulse-monitorDisk".into(),
            },
        ];
        let mut steps = Vec::new();
        for e in errors {
            let public = e.into_public("t");
            assert_eq!(public.kind(), ErrorKind::ResourceNotFound);
            assert!(public.to_string().starts_with("ResourceNotFoundError"));
            steps.push(public.step());
        }
        assert_eq!(
            steps,
            vec![
                LookupStep::Request,
                LookupStep::Registry,
                LookupStep::Principals,
                LookupStep::Observation
            ]
        );
    }

    #[test]
    fn corrupt_payload_stays_distinct_from_not_found() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let public = ResolveError::CorruptPayload {
            thing_id: "t".into(),
            monitor_type: MonitorType::Process,
            source,
        }
        .into_public("t");
        assert_eq!(public.kind(), ErrorKind::Deserialization);
        assert!(public.to_string().starts_with("DeserializationError"));
        assert!(!public.is_not_found());
    }

    #[test]
    fn collaborator_failure_keeps_its_step() {
        let public = ResolveError::Principals(CollaboratorError::Transport("reset".into()))
            .into_public("t");
        assert_eq!(public.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(public.step(), LookupStep::Principals);
        assert!(public.to_string().starts_with("ServiceUnavailableError"));
        assert!(public.to_string().contains("reset"));
    }
}
