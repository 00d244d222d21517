// General monitor payload (host identity, uptime, load and memory summary)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Only the envelope (`thingId`, `timestamp`, `counter`) is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralObservation {
    pub thing_id: String,
    pub timestamp: Number,
    pub counter: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_avg: Option<Vec<String>>,
    /// total, used, free (KiB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<String>>,
    /// total, used, free (KiB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
