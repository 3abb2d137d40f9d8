//! Continuously observable queries.
//!
//! # Responsibility
//! - Route table invalidations from writes to interested subscribers.
//! - Turn invalidations into fresh query snapshots for callers.
//!
//! # Invariants
//! - Invalidation is table-granular; a query re-runs whenever any table it
//!   reads from was written.
//! - Pending invalidations coalesce into a single snapshot.

mod hub;
mod query;

pub(crate) use hub::ChangeHub;
pub use hub::Table;
pub use query::LiveQuery;
