//! libSQL backend — `StateStore` over a local database file.
//!
//! The whole selection snapshot is one JSON blob in the `settings` table
//! under a single fixed key, upserted on every save.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{params, Connection, Database};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::store::migrations;
use crate::store::traits::{state_keys, StateStore};
use crate::wizard::SelectionState;

/// libSQL-backed selection store.
///
/// Holds a single connection reused for all operations;
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<Database>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open database: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        info!(path = %path.display(), "Selection store opened");
        Ok(Self { db: Arc::new(db), conn })
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to create in-memory db: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self { db: Arc::new(db), conn })
    }
}

#[async_trait]
impl StateStore for LibSqlStore {
    async fn load(&self) -> Result<SelectionState, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT value FROM settings WHERE key = ?1",
                params![state_keys::SELECTIONS],
            )
            .await
            .map_err(|e| StoreError::Query(format!("load: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let blob: String = row.get(0).unwrap_or_default();
                Ok(SelectionState::from_json(&blob))
            }
            Ok(None) => Ok(SelectionState::default()),
            Err(e) => {
                // A broken row is recoverable: the wizard restarts clean.
                warn!(error = %e, "Failed to read selection blob, starting empty");
                Ok(SelectionState::default())
            }
        }
    }

    async fn save(&self, state: &SelectionState) -> Result<(), StoreError> {
        let blob = serde_json::to_string(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![state_keys::SELECTIONS, blob, now],
            )
            .await
            .map_err(|e| StoreError::Query(format!("save: {e}")))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM settings WHERE key = ?1",
                params![state_keys::SELECTIONS],
            )
            .await
            .map_err(|e| StoreError::Query(format!("clear: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{StepSelection, WizardStep};
    use rust_decimal_macros::dec;

    fn sample_state() -> SelectionState {
        let mut state = SelectionState::default();
        let mut sel = StepSelection::with_value(WizardStep::Subcategory, "company-profile");
        sel.cost = dec!(600);
        state.set(WizardStep::Subcategory, sel);
        state
    }

    #[tokio::test]
    async fn missing_blob_loads_empty() {
        let store = LibSqlStore::new_memory().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_load_round_trip() {
        let store = LibSqlStore::new_memory().await.unwrap();
        let state = sample_state();
        store.save(&state).await.unwrap();
        assert_eq!(store.load().await.unwrap(), state);
    }

    #[tokio::test]
    async fn save_overwrites() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store.save(&sample_state()).await.unwrap();

        let mut updated = sample_state();
        updated.set(
            WizardStep::Hosting,
            StepSelection::with_value(WizardStep::Hosting, "basic-hosting"),
        );
        store.save(&updated).await.unwrap();
        assert_eq!(store.load().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn clear_resets_to_empty() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store.save(&sample_state()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_blob_loads_empty() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store
            .conn
            .execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![state_keys::SELECTIONS, "{not json", "2026-01-01T00:00:00Z"],
            )
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.db");

        let store = LibSqlStore::new_local(&path).await.unwrap();
        store.save(&sample_state()).await.unwrap();
        drop(store);

        let reopened = LibSqlStore::new_local(&path).await.unwrap();
        assert_eq!(reopened.load().await.unwrap(), sample_state());
    }
}
