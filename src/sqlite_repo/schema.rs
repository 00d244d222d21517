// Table DDL and identifier quoting. Observation table names come from config, so every
// statement that embeds one goes through `quoted_table`.

use crate::catalog::is_valid_table_name;
use crate::error::CollaboratorError;

pub(super) const CREATE_THINGS: &str = r#"
    CREATE TABLE IF NOT EXISTS things (
        thing_name TEXT PRIMARY KEY,
        attributes TEXT NOT NULL DEFAULT '{}'
    )
"#;

pub(super) const CREATE_THING_PRINCIPALS: &str = r#"
    CREATE TABLE IF NOT EXISTS thing_principals (
        thing_name TEXT NOT NULL,
        principal TEXT NOT NULL,
        PRIMARY KEY (thing_name, principal)
    )
"#;

/// `"name"`, or an error when the name is not a valid table name.
pub(super) fn quoted_table(name: &str) -> Result<String, CollaboratorError> {
    if !is_valid_table_name(name) {
        return Err(CollaboratorError::InvalidTable(name.to_string()));
    }
    Ok(format!("\"{}\"", name))
}

pub(super) fn create_observation_table(name: &str) -> Result<String, CollaboratorError> {
    let table = quoted_table(name)?;
    Ok(format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            thing_id TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            observation TEXT NOT NULL
        )
        "#
    ))
}

pub(super) fn create_observation_index(name: &str) -> Result<String, CollaboratorError> {
    let table = quoted_table(name)?;
    // Derived from a validated table name; SQLite puts no limit on identifier length.
    let index = format!("\"idx_{}_thing_created\"", name);
    Ok(format!(
        "CREATE INDEX IF NOT EXISTS {index} ON {table}(thing_id, created_at)"
    ))
}

pub(super) fn select_latest(name: &str) -> Result<String, CollaboratorError> {
    let table = quoted_table(name)?;
    Ok(format!(
        "SELECT thing_id, observation FROM {table}
         WHERE thing_id = $1
         ORDER BY created_at DESC, rowid DESC
         LIMIT 1"
    ))
}
