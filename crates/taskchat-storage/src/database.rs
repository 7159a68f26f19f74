// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use taskchat_config::model::StorageConfig;
use taskchat_core::TaskchatError;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::migrations::run_migrations;

/// Convert a tokio-rusqlite error into TaskchatError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TaskchatError {
    TaskchatError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the host database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file with WAL enabled and run migrations.
    pub async fn open(path: &str) -> Result<Self, TaskchatError> {
        Self::open_with_options(path, true).await
    }

    /// Open the database described by the storage config section.
    pub async fn open_from_config(config: &StorageConfig) -> Result<Self, TaskchatError> {
        Self::open_with_options(&config.database_path, config.wal_mode).await
    }

    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, TaskchatError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(TaskchatError::storage)?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| TaskchatError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.initialize(wal_mode).await?;
        info!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// In-memory database with the full schema, for tests and dry runs.
    pub async fn open_in_memory() -> Result<Self, TaskchatError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| TaskchatError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.initialize(false).await?;
        Ok(db)
    }

    async fn initialize(&self, wal_mode: bool) -> Result<(), TaskchatError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                        row.get::<_, String>(0)
                    })?;
                    conn.pragma_update(None, "synchronous", "NORMAL")?;
                }
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.pragma_update(None, "busy_timeout", 5000)?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        let applied = self
            .conn
            .call(|conn| -> Result<Result<usize, String>, rusqlite::Error> {
                Ok(run_migrations(conn).map_err(|e| e.to_string()))
            })
            .await
            .map_err(map_tr_err)?
            .map_err(|e| TaskchatError::Storage { source: e.into() })?;
        debug!(applied, "migrations complete");
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), TaskchatError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}
