// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw string access to the `kv` table. Values are opaque here; the store
//! decides what they mean.

use rusqlite::{params, Connection, OptionalExtension};

pub fn get_item(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
        r.get(0)
    })
    .optional()
}

pub fn set_item(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Writes all pairs or none of them.
pub fn multi_set(conn: &Connection, items: &[(&str, String)]) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    for (key, value) in items {
        set_item(&tx, key, value)?;
    }
    tx.commit()
}

pub fn multi_remove(conn: &Connection, keys: &[&str]) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    for key in keys {
        tx.execute("DELETE FROM kv WHERE key=?1", params![key])?;
    }
    tx.commit()
}
