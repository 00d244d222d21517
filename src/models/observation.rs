// Observation union and the raw store item it is parsed from

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{
    DiskObservation, GeneralObservation, MonitorType, NetworkObservation, ProcessObservation,
};

/// A row as returned by the observation store: the thing id plus the serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub thing_id: String,
    pub observation: String,
}

/// Serializes as the inner record. Together with the `extra` maps on every shape, the JSON sent
/// to clients is the payload the agent stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Observation {
    Disk(DiskObservation),
    General(GeneralObservation),
    Network(NetworkObservation),
    Process(ProcessObservation),
}

impl Observation {
    /// Parse a stored payload into the shape selected by `monitor_type`.
    pub fn parse(monitor_type: MonitorType, payload: &str) -> serde_json::Result<Self> {
        Ok(match monitor_type {
            MonitorType::Disk => Observation::Disk(serde_json::from_str(payload)?),
            MonitorType::General => Observation::General(serde_json::from_str(payload)?),
            MonitorType::Network => Observation::Network(serde_json::from_str(payload)?),
            MonitorType::Process => Observation::Process(serde_json::from_str(payload)?),
        })
    }

    pub fn monitor_type(&self) -> MonitorType {
        match self {
            Observation::Disk(_) => MonitorType::Disk,
            Observation::General(_) => MonitorType::General,
            Observation::Network(_) => MonitorType::Network,
            Observation::Process(_) => MonitorType::Process,
        }
    }

    pub fn thing_id(&self) -> &str {
        match self {
            Observation::Disk(o) => &o.thing_id,
            Observation::General(o) => &o.thing_id,
            Observation::Network(o) => &o.thing_id,
            Observation::Process(o) => &o.thing_id,
        }
    }

    pub fn counter(&self) -> u64 {
        match self {
            Observation::Disk(o) => o.counter,
            Observation::General(o) => o.counter,
            Observation::Network(o) => o.counter,
            Observation::Process(o) => o.counter,
        }
    }

    /// As reported by the agent; any JSON number is accepted.
    pub fn timestamp(&self) -> &Number {
        match self {
            Observation::Disk(o) => &o.timestamp,
            Observation::General(o) => &o.timestamp,
            Observation::Network(o) => &o.timestamp,
            Observation::Process(o) => &o.timestamp,
        }
    }
}
