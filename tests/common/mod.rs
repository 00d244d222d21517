// Shared test helpers: in-memory collaborators, fixtures, SQLite seeding
#![allow(dead_code)]

use async_trait::async_trait;
use dragonpulse::error::CollaboratorError;
use dragonpulse::models::*;
use dragonpulse::registry::DeviceRegistry;
use dragonpulse::store::ObservationStore;
use serde_json::{Map, Number};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory registry that counts calls and can be told to fail.
#[derive(Default)]
pub struct StubRegistry {
    things: Vec<ThingEntry>,
    principals: HashMap<String, Vec<String>>,
    fail_list_things: bool,
    fail_list_principals: bool,
    pub list_things_calls: AtomicUsize,
    pub list_principals_calls: AtomicUsize,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thing(mut self, name: &str, principals: &[&str]) -> Self {
        self.things.push(ThingEntry::new(name));
        self.principals.insert(
            name.to_string(),
            principals.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn failing_list_things(mut self) -> Self {
        self.fail_list_things = true;
        self
    }

    pub fn failing_list_principals(mut self) -> Self {
        self.fail_list_principals = true;
        self
    }

    pub fn list_things_calls(&self) -> usize {
        self.list_things_calls.load(Ordering::SeqCst)
    }

    pub fn list_principals_calls(&self) -> usize {
        self.list_principals_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceRegistry for StubRegistry {
    async fn list_things(&self) -> Result<Vec<ThingEntry>, CollaboratorError> {
        self.list_things_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_things {
            return Err(CollaboratorError::Transport("registry unreachable".into()));
        }
        Ok(self.things.clone())
    }

    async fn list_thing_principals(
        &self,
        thing_name: &str,
    ) -> Result<Vec<String>, CollaboratorError> {
        self.list_principals_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_principals {
            return Err(CollaboratorError::Transport("registry unreachable".into()));
        }
        Ok(self.principals.get(thing_name).cloned().unwrap_or_default())
    }
}

/// In-memory store keyed by (table, thing id); items are returned in insertion order.
#[derive(Default)]
pub struct StubStore {
    items: HashMap<(String, String), Vec<StoredItem>>,
    fail: bool,
    pub query_calls: AtomicUsize,
    pub queried_tables: std::sync::Mutex<Vec<String>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, table: &str, thing_id: &str, payload: String) -> Self {
        self.items
            .entry((table.to_string(), thing_id.to_string()))
            .or_default()
            .push(StoredItem {
                thing_id: thing_id.to_string(),
                observation: payload,
            });
        self
    }

    /// Every query fails, so a test can prove the store is never reached.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn queried_tables(&self) -> Vec<String> {
        self.queried_tables.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObservationStore for StubStore {
    async fn query(
        &self,
        table: &str,
        thing_id: &str,
    ) -> Result<Vec<StoredItem>, CollaboratorError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.queried_tables.lock().unwrap().push(table.to_string());
        if self.fail {
            return Err(CollaboratorError::Transport("Not implemented!".into()));
        }
        Ok(self
            .items
            .get(&(table.to_string(), thing_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn new_thing_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn process(pid: &str, command: &str, cpu: &str, ttime: &str, memory: &str, state: &str) -> ProcessEntry {
    ProcessEntry {
        pid: pid.into(),
        command: command.into(),
        cpu: cpu.into(),
        ttime: ttime.into(),
        memory: memory.into(),
        state: state.into(),
        user: "root".into(),
        extra: Map::new(),
    }
}

/// Process observation as a device agent reports it: counter 1, three load averages, three
/// processes.
pub fn process_observation(thing_id: &str) -> ProcessObservation {
    ProcessObservation {
        thing_id: thing_id.to_string(),
        timestamp: Number::from(now_secs()),
        counter: 1,
        load_avg: strings(&["1.14", "1.12", "1.14"]),
        cpu_usage: strings(&["2.4", "1.1", "96.4"]),
        tasks: strings(&["183", "2", "181", "0"]),
        memory: strings(&["922892", "800944", "121948", "38584"]),
        process_list: vec![
            process("605", "Xorg", "86.9", "3:15.27", "170400", "running"),
            process("3795", "iftop", "30.7", "0:00.07", "163228", "sleeping"),
            process("3798", "top", "15.3", "0:00.08", "5172", "running"),
        ],
        extra: Map::new(),
    }
}

pub fn disk_observation(thing_id: &str, counter: u64) -> DiskObservation {
    DiskObservation {
        thing_id: thing_id.to_string(),
        timestamp: Number::from(now_secs()),
        counter,
        filesystems: Some(vec![FilesystemStat {
            filesystem: Some("/dev/root".into()),
            size: Some("7.2G".into()),
            used: Some("3.1G".into()),
            available: Some("3.8G".into()),
            use_percent: Some("45%".into()),
            mounted_on: Some("/".into()),
            extra: Map::new(),
        }]),
        extra: Map::new(),
    }
}

pub fn general_observation(thing_id: &str) -> GeneralObservation {
    GeneralObservation {
        thing_id: thing_id.to_string(),
        timestamp: Number::from(now_secs()),
        counter: 7,
        hostname: Some("edge-01".into()),
        kernel: Some("4.4.13-v7+".into()),
        uptime: Some("3 days, 4:12".into()),
        users: Some("1".into()),
        load_avg: Some(strings(&["0.10", "0.08", "0.05"])),
        memory: Some(strings(&["922892", "800944", "121948"])),
        swap: Some(strings(&["102396", "0", "102396"])),
        extra: Map::new(),
    }
}

pub fn network_observation(thing_id: &str) -> NetworkObservation {
    NetworkObservation {
        thing_id: thing_id.to_string(),
        timestamp: Number::from(now_secs()),
        counter: 3,
        interfaces: Some(vec![InterfaceStat {
            name: Some("eth0".into()),
            address: Some("192.168.1.20".into()),
            rx_bytes: Some("1048576".into()),
            tx_bytes: Some("524288".into()),
            rx_packets: Some("1024".into()),
            tx_packets: Some("512".into()),
            extra: Map::new(),
        }]),
        extra: Map::new(),
    }
}

/// Insert a thing and its principals directly, the way the registry side would.
pub async fn seed_thing(pool: &SqlitePool, name: &str, attributes: &str, principals: &[&str]) {
    sqlx::query("INSERT INTO things (thing_name, attributes) VALUES ($1, $2)")
        .bind(name)
        .bind(attributes)
        .execute(pool)
        .await
        .unwrap();
    for principal in principals {
        sqlx::query("INSERT INTO thing_principals (thing_name, principal) VALUES ($1, $2)")
            .bind(name)
            .bind(principal)
            .execute(pool)
            .await
            .unwrap();
    }
}

/// Insert an observation row directly, the way the ingestion side would.
pub async fn seed_observation(
    pool: &SqlitePool,
    table: &str,
    thing_id: &str,
    created_at: i64,
    payload: &str,
) {
    let sql = format!(
        "INSERT INTO \"{}\" (thing_id, created_at, observation) VALUES ($1, $2, $3)",
        table
    );
    sqlx::query(&sql)
        .bind(thing_id)
        .bind(created_at)
        .bind(payload)
        .execute(pool)
        .await
        .unwrap();
}
