//! Table-level change notification hub.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Mutex, PoisonError};

/// Tables that writes can invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Classes,
    Students,
    Attendance,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Students => "students",
            Self::Attendance => "attendance",
        }
    }

    pub(crate) fn join(tables: &[Table]) -> String {
        tables
            .iter()
            .map(|table| table.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

struct Subscriber {
    tables: Vec<Table>,
    sender: SyncSender<()>,
}

#[derive(Default)]
pub(crate) struct ChangeHub {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeHub {
    /// Registers interest in `tables`.
    ///
    /// At most one signal is queued per subscriber; further publishes while
    /// it is pending are absorbed by it.
    pub(crate) fn subscribe(&self, tables: &[Table]) -> Receiver<()> {
        let (sender, receiver) = sync_channel(1);
        self.lock().push(Subscriber {
            tables: tables.to_vec(),
            sender,
        });
        receiver
    }

    /// Signals every subscriber reading any of `changed`.
    ///
    /// Subscribers whose receiver is gone are dropped here.
    pub(crate) fn publish(&self, changed: &[Table]) {
        self.lock().retain(|subscriber| {
            let interested = subscriber.tables.iter().any(|table| changed.contains(table));
            if !interested {
                return true;
            }
            match subscriber.sender.try_send(()) {
                Ok(()) | Err(TrySendError::Full(())) => true,
                Err(TrySendError::Disconnected(())) => false,
            }
        });
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
