// Process monitor payload (top-style snapshot)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEntry {
    pub pid: String,
    pub command: String,
    pub cpu: String,
    /// Accumulated CPU time as reported by the agent, e.g. "3:15.27".
    pub ttime: String,
    pub memory: String,
    pub state: String,
    pub user: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Values are kept as the strings the agent reported.
///
/// - `load_avg`: 1, 5 and 15 minute load averages
/// - `cpu_usage`: user, system, idle percentages
/// - `tasks`: total, running, sleeping, stopped
/// - `memory`: total, used, free, buffers (KiB)
///
/// Fields not listed here are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessObservation {
    pub thing_id: String,
    pub timestamp: Number,
    pub counter: u64,
    pub load_avg: Vec<String>,
    pub cpu_usage: Vec<String>,
    pub tasks: Vec<String>,
    pub memory: Vec<String>,
    pub process_list: Vec<ProcessEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
