// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host configuration parameters (key/value).

use rusqlite::{OptionalExtension, params};
use taskchat_core::TaskchatError;

use crate::database::Database;

pub async fn get_param(db: &Database, key: &str) -> Result<Option<String>, TaskchatError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                "SELECT value FROM config_params WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or overwrite a parameter.
pub async fn set_param(db: &Database, key: &str, value: &str) -> Result<(), TaskchatError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute(
                "INSERT INTO config_params (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
