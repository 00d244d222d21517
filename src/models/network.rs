// Network monitor payload (per-interface counters)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceStat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx_bytes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_bytes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx_packets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_packets: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Only the envelope (`thingId`, `timestamp`, `counter`) is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkObservation {
    pub thing_id: String,
    pub timestamp: Number,
    pub counter: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<InterfaceStat>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
