// Device registry models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A thing as listed by the device registry. Only `thing_name` is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingEntry {
    pub thing_name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ThingEntry {
    pub fn new(thing_name: impl Into<String>) -> Self {
        Self {
            thing_name: thing_name.into(),
            attributes: BTreeMap::new(),
        }
    }
}

/// A registered thing with at least one attached principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedThing {
    #[serde(flatten)]
    pub entry: ThingEntry,
    pub principal_count: usize,
}
