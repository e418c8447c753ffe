//! Document stores
//!
//! Each store owns a handful of JSON documents in the `documents` table and
//! exposes the mutations the planning screens need. Mutations that span two
//! documents (project add/remove, global-entity delete) run inside a single
//! SQLite transaction.

pub mod project;
pub mod settings;
pub mod strategy;

pub use project::ProjectStore;
pub use settings::GlobalSettingsStore;
pub use strategy::StrategyStore;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;

/// Read the raw JSON value stored under `key`, if any.
pub(crate) fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM documents WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("Failed to read document '{}'", key))
}

/// Insert or replace the JSON value stored under `key`.
pub(crate) fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO documents (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
        params![key, value, Utc::now().to_rfc3339()],
    )
    .with_context(|| format!("Failed to write document '{}'", key))?;
    Ok(())
}

/// Remove the value stored under `key`. Missing keys are fine.
pub(crate) fn delete_value(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM documents WHERE key = ?1", params![key])
        .with_context(|| format!("Failed to delete document '{}'", key))?;
    Ok(())
}

/// Decode a stored JSON document, substituting the built-in default when the
/// document is missing or fails to parse. Corrupt rows are logged, never
/// surfaced to the caller.
pub(crate) fn decode_or<T, F>(key: &str, raw: Option<String>, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match raw {
        Some(text) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Discarding corrupt document '{}': {}", key, e);
                default()
            }
        },
        None => default(),
    }
}
