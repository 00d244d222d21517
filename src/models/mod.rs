// Domain models: registry entries, monitor types and observation payloads

mod disk;
mod general;
mod monitor;
mod network;
mod observation;
mod process;
mod thing;

pub use disk::{DiskObservation, FilesystemStat};
pub use general::GeneralObservation;
pub use monitor::{MonitorType, UnknownMonitorType};
pub use network::{InterfaceStat, NetworkObservation};
pub use observation::{Observation, StoredItem};
pub use process::{ProcessEntry, ProcessObservation};
pub use thing::{ResolvedThing, ThingEntry};
