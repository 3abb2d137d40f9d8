//! Shared storage handle.
//!
//! # Responsibility
//! - Own the single SQLite connection used by all repositories.
//! - Serialize access to that connection across threads.
//! - Publish table invalidations for every successful write.
//!
//! # Invariants
//! - Invalidations are published before the connection lock is released, so
//!   no reader can observe committed data that live queries have not been
//!   told about.
//! - Live queries subscribe before their first snapshot is computed.
//! - Live queries hold a weak reference; dropping every `Store` clone ends
//!   their sequences.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory};
use crate::live::{ChangeHub, LiveQuery, Table};
use crate::repo::{RepoError, RepoResult};
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

const REQUIRED_TABLES: [&str; 3] = ["classes", "students", "attendance"];

/// Cheaply clonable handle to the attendance database.
///
/// Construct it once at the composition root and hand clones to
/// repositories. All clones share one connection and one change hub.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

pub(crate) struct StoreInner {
    conn: Mutex<Connection>,
    changes: ChangeHub,
}

impl Store {
    /// Opens (or creates) a database file and applies migrations.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_from_connection(open_db(path)?)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` when a core table is absent.
    pub fn try_from_connection(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            inner: Arc::new(StoreInner {
                conn: Mutex::new(conn),
                changes: ChangeHub::default(),
            }),
        })
    }

    /// Runs `op` against the raw connection.
    ///
    /// Mutations made here are not published to live queries.
    pub fn with_connection<T>(&self, op: impl FnOnce(&Connection) -> T) -> T {
        op(&self.inner.lock())
    }

    /// Number of live queries still attached.
    pub fn live_query_count(&self) -> usize {
        self.inner.changes.subscriber_count()
    }

    pub(crate) fn read<T>(&self, op: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        self.inner.read(op)
    }

    /// Runs a mutation and, on success, invalidates `tables`.
    pub(crate) fn write<T>(
        &self,
        tables: &[Table],
        op: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = self.inner.lock();
        match op(&conn) {
            Ok(value) => {
                self.inner.changes.publish(tables);
                debug!(
                    "event=store_write module=store status=ok tables={}",
                    Table::join(tables)
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error tables={} error={}",
                    Table::join(tables),
                    err
                );
                Err(err)
            }
        }
    }

    /// Creates a live query over `tables` that re-runs `fetch` on change.
    pub(crate) fn watch<T, F>(&self, tables: &[Table], fetch: F) -> LiveQuery<T>
    where
        F: Fn(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let signals = self.inner.changes.subscribe(tables);
        debug!(
            "event=live_subscribe module=store status=ok tables={}",
            Table::join(tables)
        );
        LiveQuery::new(Arc::downgrade(&self.inner), signals, Box::new(fetch))
    }
}

impl StoreInner {
    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-operation leaves SQLite consistent: open transactions
        // roll back when dropped.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn read<T>(&self, op: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        op(&self.lock())
    }
}

pub(crate) fn upgrade(store: &Weak<StoreInner>) -> RepoResult<Arc<StoreInner>> {
    store.upgrade().ok_or(RepoError::StoreClosed)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
