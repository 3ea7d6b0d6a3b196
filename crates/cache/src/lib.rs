//! Stable-identity entity cache with generation-based incremental refresh.
//!
//! An external enumerator periodically re-discovers a changing collection of
//! real-world objects (services, processes, connections, ...). This crate
//! stores one entity per object under a deterministic *stable id* and
//! reconciles each fresh enumeration against the previous one in place:
//! surviving objects are updated (same allocation, so selections and handles
//! held by consumers stay valid), vanished objects are evicted, new objects
//! are inserted. The whole reconciliation is a single linear pass driven by a
//! monotonic generation counter; no explicit diff is ever built.
//!
//! # Mental model
//!
//! 1. **Construction:** an [`EntityStore`] is created with the [`Schema`] of
//!    its resource kind.
//! 2. **Refresh:** [`EntityStore::begin_refresh`] stamps every stored entity
//!    with the previous generation and advances the counter, returning a
//!    [`RefreshCycle`]. The driver then, per discovered object, either
//!    [`RefreshCycle::lookup`]s it (marking it seen) and mutates it in place,
//!    or [`RefreshCycle::append`]s a freshly built entity.
//!    [`RefreshCycle::finish`] sweeps everything left unmarked.
//! 3. **Consumption:** display code iterates the store's order (optionally
//!    after [`EntityStore::sort`]) and reads cells through the
//!    [`CacheEntity`] accessors. Consumers that outlive a refresh clone an
//!    [`EntityRef`]; the entity is destroyed when the last holder drops it.
//!
//! # Concurrency
//!
//! Store operations take `&mut self` and belong to a single owner thread.
//! [`EntityRef`] handles are atomically counted and may be read from any
//! thread; entity types that want cross-thread reads during in-place updates
//! put their mutable state behind a lock (see the kind adapters in
//! `vantage-kinds`).

mod entity;
mod error;
mod schema;
pub mod store;
mod value;

pub use entity::{CacheEntity, EntityRef};
pub use error::CacheError;
pub use schema::{ColumnSpec, ColumnType, Schema};
pub use store::{EntityStore, RefreshCycle, RefreshStats, Upsert};
pub use value::PropertyValue;
