// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partners and the named references that point at them.

use rusqlite::{OptionalExtension, params};
use taskchat_core::TaskchatError;
use taskchat_core::types::PartnerId;

use crate::database::Database;

/// Insert a partner. Returns its id.
pub async fn insert_partner(db: &Database, name: &str) -> Result<PartnerId, TaskchatError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute("INSERT INTO partners (name) VALUES (?1)", params![name])?;
            Ok(PartnerId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Point `reference` at `partner`, replacing any previous target.
pub async fn link_reference(
    db: &Database,
    reference: &str,
    partner: PartnerId,
) -> Result<(), TaskchatError> {
    let reference = reference.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute(
                "INSERT INTO identity_refs (reference, partner_id) VALUES (?1, ?2)
                 ON CONFLICT(reference) DO UPDATE SET partner_id = excluded.partner_id",
                params![reference, partner.0],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn resolve_reference(
    db: &Database,
    reference: &str,
) -> Result<Option<PartnerId>, TaskchatError> {
    let reference = reference.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                "SELECT partner_id FROM identity_refs WHERE reference = ?1",
                params![reference],
                |row| row.get(0).map(PartnerId),
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
