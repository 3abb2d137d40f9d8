//! Live query handle returned by `watch_*` repository operations.

use crate::db::{upgrade, StoreInner};
use crate::repo::RepoResult;
use rusqlite::Connection;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Weak;
use std::time::Duration;

type Fetch<T> = Box<dyn Fn(&Connection) -> RepoResult<T> + Send>;

/// A query whose result is delivered as a sequence of snapshots.
///
/// The first call to `next()` yields the current result
/// immediately. Every later call blocks until a write touches one of the
/// query's tables and then yields a fresh snapshot. `None` means the store
/// has been dropped and no further snapshots will come.
///
/// The handle is `Send`, so it can be moved to a background thread that
/// forwards snapshots to the UI context.
pub struct LiveQuery<T> {
    store: Weak<StoreInner>,
    signals: Receiver<()>,
    fetch: Fetch<T>,
    emitted_initial: bool,
}

impl<T> LiveQuery<T> {
    pub(crate) fn new(store: Weak<StoreInner>, signals: Receiver<()>, fetch: Fetch<T>) -> Self {
        Self {
            store,
            signals,
            fetch,
            emitted_initial: false,
        }
    }

    /// Runs the query now without consuming any pending change signal.
    pub fn snapshot(&self) -> RepoResult<T> {
        let store = upgrade(&self.store)?;
        store.read(|conn| (self.fetch)(conn))
    }

    /// Like `Iterator::next`, but gives up after `timeout`.
    ///
    /// Returns `None` on timeout as well as after the store is dropped.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<RepoResult<T>> {
        if !self.take_initial() {
            match self.signals.recv_timeout(timeout) {
                Ok(()) => {}
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
        self.emit()
    }

    /// Returns a snapshot only if one is already due.
    pub fn try_next(&mut self) -> Option<RepoResult<T>> {
        if !self.take_initial() {
            match self.signals.try_recv() {
                Ok(()) => {}
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
        self.emit()
    }

    fn take_initial(&mut self) -> bool {
        if self.emitted_initial {
            return false;
        }
        self.emitted_initial = true;
        true
    }

    fn emit(&mut self) -> Option<RepoResult<T>> {
        // Coalesce bursts: one snapshot covers every signal queued so far.
        while self.signals.try_recv().is_ok() {}
        match upgrade(&self.store) {
            Ok(store) => Some(store.read(|conn| (self.fetch)(conn))),
            Err(_) => None,
        }
    }
}

impl<T> Iterator for LiveQuery<T> {
    type Item = RepoResult<T>;

    /// Blocks until the next snapshot is due.
    fn next(&mut self) -> Option<Self::Item> {
        if !self.take_initial() {
            self.signals.recv().ok()?;
        }
        self.emit()
    }
}
