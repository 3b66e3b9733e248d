//! SQLite-backed persistence gateway.
//!
//! # Invariants
//! - One row per key in `blobs`; `save` is an upsert replacing `payload`.
//! - The connection is only touched while holding the gateway lock.

use crate::db::{open_db, open_db_in_memory};
use crate::store::gateway::{GatewayError, GatewayResult, PersistenceGateway};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Durable blob store in a single SQLite file.
pub struct SqliteGateway {
    conn: Mutex<Connection>,
}

impl SqliteGateway {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> GatewayResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps a connection that has already been migrated via `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> GatewayResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| GatewayError::LockPoisoned)
    }
}

impl PersistenceGateway for SqliteGateway {
    fn save(&self, key: &str, blob: &[u8]) -> GatewayResult<()> {
        let started_at = Instant::now();
        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO blobs (key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, blob],
        );

        match result {
            Ok(_) => {
                info!(
                    "event=gateway_save module=store status=ok bytes={} duration_ms={}",
                    blob.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=gateway_save module=store status=error bytes={} duration_ms={} error={}",
                    blob.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn load(&self, key: &str) -> GatewayResult<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let payload = conn
            .query_row(
                "SELECT payload FROM blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(payload)
    }
}
