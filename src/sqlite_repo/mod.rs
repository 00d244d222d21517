// SQLite-backed device registry and observation store.
// Uses sqlx for async + connection pooling. Read-only apart from `init`, which creates the
// schema; rows are written by the ingestion side sharing the same database file.

mod schema;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

use crate::catalog::MonitorCatalog;
use crate::config::DatabaseConfig;
use crate::error::CollaboratorError;
use crate::models::{StoredItem, ThingEntry};
use crate::registry::DeviceRegistry;
use crate::store::ObservationStore;

pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Connect to SQLite at `config.path`, create parent dir and DB if missing, enable WAL.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(&config.path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(config.busy_timeout_secs))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    /// Create registry tables and one observation table per catalog entry. Idempotent.
    pub async fn init(&self, catalog: &MonitorCatalog) -> anyhow::Result<()> {
        sqlx::query(schema::CREATE_THINGS)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_THING_PRINCIPALS)
            .execute(&self.pool)
            .await?;

        for table in catalog.tables() {
            sqlx::query(&schema::create_observation_table(table)?)
                .execute(&self.pool)
                .await?;
            sqlx::query(&schema::create_observation_index(table)?)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DeviceRegistry for SqliteRepo {
    #[instrument(skip(self), fields(repo = "sqlite", operation = "list_things"))]
    async fn list_things(&self) -> Result<Vec<ThingEntry>, CollaboratorError> {
        let rows = sqlx::query("SELECT thing_name, attributes FROM things ORDER BY thing_name")
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let thing_name: String = row.try_get("thing_name")?;
            let attributes: String = row.try_get("attributes")?;
            let attributes: BTreeMap<String, String> = serde_json::from_str(&attributes)
                .map_err(|e| {
                    CollaboratorError::Malformed(format!(
                        "attributes of thing '{}': {}",
                        thing_name, e
                    ))
                })?;
            out.push(ThingEntry {
                thing_name,
                attributes,
            });
        }
        Ok(out)
    }

    #[instrument(skip(self), fields(repo = "sqlite", operation = "list_thing_principals"))]
    async fn list_thing_principals(
        &self,
        thing_name: &str,
    ) -> Result<Vec<String>, CollaboratorError> {
        let principals = sqlx::query_scalar::<_, String>(
            "SELECT principal FROM thing_principals WHERE thing_name = $1 ORDER BY principal",
        )
        .bind(thing_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(principals)
    }
}

#[async_trait]
impl ObservationStore for SqliteRepo {
    #[instrument(skip(self), fields(repo = "sqlite", operation = "query"))]
    async fn query(
        &self,
        table: &str,
        thing_id: &str,
    ) -> Result<Vec<StoredItem>, CollaboratorError> {
        let sql = schema::select_latest(table)?;
        let rows = sqlx::query(&sql)
            .bind(thing_id)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(StoredItem {
                thing_id: row.try_get("thing_id")?,
                observation: row.try_get("observation")?,
            });
        }
        Ok(out)
    }
}
