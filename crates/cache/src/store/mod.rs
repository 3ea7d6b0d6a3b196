//! The entity store: dual-view identity cache with incremental refresh.
//!
//! # Role
//!
//! This module owns the reconciliation machinery. A single slot vector is
//! the source of truth for both ownership and display order; the identity
//! index maps stable ids to slot positions and never owns anything.
//!
//! # Mental model
//!
//! 1. **Upsert:** [`EntityStore::append`] inserts by stable id; a duplicate
//!    id keeps the first entity ("first wins") and drops the incoming one.
//! 2. **Mark:** [`EntityStore::begin_refresh`] stamps all slots with the
//!    previous generation, advances the counter, and returns a
//!    [`RefreshCycle`] — the only way to touch-mark entities.
//! 3. **Sweep:** [`RefreshCycle::finish`] evicts every slot not stamped
//!    with the current generation. The generation counter is the diff.
//!
//! # Invariants
//!
//! - Identity-index keys equal the stable ids of the slot vector, and each
//!   maps to its slot's position.
//!   - Enforced in: every structural mutation in [`table`] rebuilds or
//!     patches the index alongside the slot vector.
//!   - Tested by: `invariants::check_store`, applied after every operation
//!     in the store test-suite.
//!   - Failure symptom: lookups return the wrong entity or phantom rows
//!     survive a refresh.
//! - The store owns exactly one handle per live entity (its slot); external
//!   holders retain independently.
//!   - Tested by: `tests::test_handle_release_across_threads`.
//!   - Failure symptom: entities destroyed while still displayed, or leaked
//!     after eviction.
//! - A slot's last-seen stamp never exceeds the store generation.
//!   - Tested by: `invariants::check_store`.

mod refresh;
mod sort;
mod table;

pub use refresh::{RefreshCycle, RefreshStats};
pub use table::{EntityStore, Upsert};

#[cfg(test)]
pub(crate) mod invariants;

#[cfg(test)]
pub(crate) mod test_fixtures;
