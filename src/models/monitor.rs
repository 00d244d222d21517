// Monitor type tag: selects the observation shape and its backing table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorType {
    Disk,
    General,
    Network,
    Process,
}

impl MonitorType {
    pub const ALL: [MonitorType; 4] = [
        MonitorType::Disk,
        MonitorType::General,
        MonitorType::Network,
        MonitorType::Process,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            MonitorType::Disk => 0,
            MonitorType::General => 1,
            MonitorType::Network => 2,
            MonitorType::Process => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonitorType::Disk => "disk",
            MonitorType::General => "general",
            MonitorType::Network => "network",
            MonitorType::Process => "process",
        }
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown monitor type '{0}' (expected disk, general, network or process)")]
pub struct UnknownMonitorType(pub String);

impl FromStr for MonitorType {
    type Err = UnknownMonitorType;

    /// Exact lowercase names only, matching the serde representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disk" => Ok(MonitorType::Disk),
            "general" => Ok(MonitorType::General),
            "network" => Ok(MonitorType::Network),
            "process" => Ok(MonitorType::Process),
            _ => Err(UnknownMonitorType(s.to_string())),
        }
    }
}
