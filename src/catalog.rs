// Monitor type -> observation table / telemetry topic lookup.
// Built once from config and shared read-only by the retriever and the HTTP layer.

use serde::Serialize;

use crate::config::{TablesConfig, TopicsConfig};
use crate::models::MonitorType;

/// One row of the catalog, as exposed by GET /api/monitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorRoute {
    pub monitor_type: MonitorType,
    pub table: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorCatalog {
    /// Indexed by `MonitorType::index`.
    routes: [MonitorRoute; 4],
}

impl MonitorCatalog {
    pub fn new(tables: &TablesConfig, topics: &TopicsConfig) -> Self {
        let routes = MonitorType::ALL.map(|monitor_type| MonitorRoute {
            monitor_type,
            table: tables.get(monitor_type).to_string(),
            topic: topics.get(monitor_type).to_string(),
        });
        Self { routes }
    }

    pub fn route(&self, monitor_type: MonitorType) -> &MonitorRoute {
        &self.routes[monitor_type.index()]
    }

    pub fn table(&self, monitor_type: MonitorType) -> &str {
        &self.route(monitor_type).table
    }

    pub fn topic(&self, monitor_type: MonitorType) -> &str {
        &self.route(monitor_type).topic
    }

    pub fn routes(&self) -> &[MonitorRoute] {
        &self.routes
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.table.as_str())
    }
}

impl Default for MonitorCatalog {
    fn default() -> Self {
        Self::new(&TablesConfig::default(), &TopicsConfig::default())
    }
}

/// Table names follow the DynamoDB rules (3-255 chars of `[A-Za-z0-9_.-]`), which also keeps
/// them safe to use as quoted SQLite identifiers.
pub fn is_valid_table_name(name: &str) -> bool {
    (3..=255).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_maps_every_monitor_type() {
        let catalog = MonitorCatalog::default();
        assert_eq!(catalog.routes().len(), 4);
        assert_eq!(
            catalog.table(MonitorType::Process),
            "DragonPulse-monitorProcess"
        );
        assert_eq!(catalog.table(MonitorType::Disk), "DragonPulse-monitorDisk");
        assert_eq!(
            catalog.topic(MonitorType::Network),
            "DragonPulseMonitorNetwork"
        );
        for route in catalog.routes() {
            assert_eq!(catalog.route(route.monitor_type), route);
        }
    }

    #[test]
    fn custom_tables_stay_with_their_monitor_type() {
        let tables = TablesConfig {
            disk: "obs_disk".into(),
            general: "obs_general".into(),
            network: "obs_network".into(),
            process: "obs_process".into(),
        };
        let catalog = MonitorCatalog::new(&tables, &TopicsConfig::default());
        for monitor_type in MonitorType::ALL {
            let route = catalog.route(monitor_type);
            assert_eq!(route.monitor_type, monitor_type);
            assert_eq!(route.table, format!("obs_{}", monitor_type));
        }
    }

    #[test]
    fn table_name_rules() {
        assert!(is_valid_table_name("DragonPulse-monitorGeneral"));
        assert!(is_valid_table_name("obs.disk_v2"));
        assert!(!is_valid_table_name("ab"));
        assert!(!is_valid_table_name("bad\"name"));
        assert!(!is_valid_table_name("has space"));
        assert!(!is_valid_table_name(&"x".repeat(256)));
    }
}
