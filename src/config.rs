use serde::Deserialize;
use std::collections::HashSet;

use crate::catalog::{MonitorCatalog, is_valid_table_name};
use crate::models::MonitorType;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub topics: TopicsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_busy_timeout_secs() -> u64 {
    5
}

/// Observation table per monitor type.
#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    #[serde(default = "default_disk_table")]
    pub disk: String,
    #[serde(default = "default_general_table")]
    pub general: String,
    #[serde(default = "default_network_table")]
    pub network: String,
    #[serde(default = "default_process_table")]
    pub process: String,
}

fn default_disk_table() -> String {
    "DragonPulse-monitorDisk".into()
}

fn default_general_table() -> String {
    "DragonPulse-monitorGeneral".into()
}

fn default_network_table() -> String {
    "DragonPulse-monitorNetwork".into()
}

fn default_process_table() -> String {
    "DragonPulse-monitorProcess".into()
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            disk: default_disk_table(),
            general: default_general_table(),
            network: default_network_table(),
            process: default_process_table(),
        }
    }
}

impl TablesConfig {
    pub fn get(&self, monitor_type: MonitorType) -> &str {
        match monitor_type {
            MonitorType::Disk => &self.disk,
            MonitorType::General => &self.general,
            MonitorType::Network => &self.network,
            MonitorType::Process => &self.process,
        }
    }
}

/// Telemetry topic each monitor type is published on by the agents. Informational here:
/// delivery into the observation tables happens upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicsConfig {
    #[serde(default = "default_disk_topic")]
    pub disk: String,
    #[serde(default = "default_general_topic")]
    pub general: String,
    #[serde(default = "default_network_topic")]
    pub network: String,
    #[serde(default = "default_process_topic")]
    pub process: String,
}

fn default_disk_topic() -> String {
    "DragonPulseMonitorDisk".into()
}

fn default_general_topic() -> String {
    "DragonPulseMonitorGeneral".into()
}

fn default_network_topic() -> String {
    "DragonPulseMonitorNetwork".into()
}

fn default_process_topic() -> String {
    "DragonPulseMonitorProcess".into()
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            disk: default_disk_topic(),
            general: default_general_topic(),
            network: default_network_topic(),
            process: default_process_topic(),
        }
    }
}

impl TopicsConfig {
    pub fn get(&self, monitor_type: MonitorType) -> &str {
        match monitor_type {
            MonitorType::Disk => &self.disk,
            MonitorType::General => &self.general,
            MonitorType::Network => &self.network,
            MonitorType::Process => &self.process,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn monitor_catalog(&self) -> MonitorCatalog {
        MonitorCatalog::new(&self.tables, &self.topics)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.database.busy_timeout_secs > 0,
            "database.busy_timeout_secs must be > 0, got {}",
            self.database.busy_timeout_secs
        );

        let mut seen = HashSet::new();
        for monitor_type in MonitorType::ALL {
            let table = self.tables.get(monitor_type);
            anyhow::ensure!(
                is_valid_table_name(table),
                "tables.{} must be 3-255 chars of [A-Za-z0-9_.-], got {:?}",
                monitor_type,
                table
            );
            anyhow::ensure!(
                seen.insert(table),
                "tables.{} duplicates another monitor table ({})",
                monitor_type,
                table
            );
            anyhow::ensure!(
                !self.topics.get(monitor_type).trim().is_empty(),
                "topics.{} must be non-empty",
                monitor_type
            );
        }
        Ok(())
    }
}
