//! Refresh-cycle bracketing: the mark phase as a typestate.
//!
//! # Role
//!
//! A [`RefreshCycle`] is the only way to touch-mark entities, so the
//! mark/sweep protocol cannot be half-applied: marking outside a cycle does
//! not typecheck, and the sweep runs exactly when the cycle is finished.

use crate::entity::{CacheEntity, EntityRef};
use crate::error::CacheError;
use crate::store::table::{EntityStore, Upsert};

/// Counters describing one finished refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
	/// Entities looked up (or re-appended) and marked as still present.
	pub touched: usize,
	/// Entities newly inserted this cycle.
	pub appended: usize,
	/// Entities evicted by the sweep.
	pub evicted: usize,
	/// Entities remaining after the sweep.
	pub remaining: usize,
}

/// An in-progress refresh cycle over an [`EntityStore`].
///
/// Obtained from [`EntityStore::begin_refresh`]. The driver walks the fresh
/// enumeration, calling [`lookup`](Self::lookup) for objects it may already
/// know (mutating survivors in place through their own update methods) and
/// [`append`](Self::append) for new ones, then calls
/// [`finish`](Self::finish) to evict everything the enumeration no longer
/// reported.
///
/// Dropping a cycle without finishing abandons it: nothing is evicted, and
/// the next `begin_refresh` re-stamps every slot, so an abandoned cycle has
/// no lasting effect. A partially driven cycle must never cause a mass
/// eviction.
#[must_use = "a refresh cycle evicts nothing until finish() is called"]
pub struct RefreshCycle<'a, E: CacheEntity> {
	store: &'a mut EntityStore<E>,
	touched: usize,
	appended: usize,
}

impl<E: CacheEntity> EntityStore<E> {
	/// Begins a refresh cycle.
	///
	/// Stamps every stored entity with the pre-increment generation, then
	/// advances the store generation; after this call every existing
	/// entity's stamp is one behind "current", which is what the sweep in
	/// [`RefreshCycle::finish`] keys off.
	pub fn begin_refresh(&mut self) -> RefreshCycle<'_, E> {
		let previous = self.generation;
		self.stamp_all(previous);
		self.generation += 1;
		RefreshCycle {
			store: self,
			touched: 0,
			appended: 0,
		}
	}
}

impl<E: CacheEntity> RefreshCycle<'_, E> {
	/// Returns the generation this cycle is marking against.
	pub fn generation(&self) -> u64 {
		self.store.generation()
	}

	/// O(1) lookup by stable id, marking the entity as seen this cycle.
	///
	/// The caller does not gain ownership; the borrow is valid until the
	/// next mutation. Survivors keep their allocation, so handles and
	/// selection state held elsewhere remain valid.
	pub fn lookup(&mut self, id: &str) -> Option<&EntityRef<E>> {
		if self.store.contains(id) {
			self.touched += 1;
		}
		self.store.touch(id)
	}

	/// Upserts an entity, counting it for this cycle.
	///
	/// Same semantics as [`EntityStore::append`], with one addition: if the
	/// id already exists, the surviving entity is also marked as seen —
	/// an enumerator reporting an id means the object still exists, so a
	/// driver that only ever appends still reconciles correctly.
	pub fn append(&mut self, entity: E) -> Result<Upsert<E>, CacheError> {
		let outcome = self.store.append(entity)?;
		match &outcome {
			Upsert::Inserted(_) => self.appended += 1,
			Upsert::KeptExisting(handle) => {
				let _ = self.store.touch(handle.stable_id());
				self.touched += 1;
			}
		}
		Ok(outcome)
	}

	/// Sweeps every entity not seen this cycle and closes the cycle.
	///
	/// A cycle in which nothing was touched or appended evicts everything;
	/// the enumeration reported "empty" and the store now agrees.
	pub fn finish(self) -> RefreshStats {
		let evicted = self.store.sweep();
		let stats = RefreshStats {
			touched: self.touched,
			appended: self.appended,
			evicted,
			remaining: self.store.len(),
		};
		tracing::debug!(
			schema = self.store.schema().label(),
			generation = self.store.generation(),
			touched = stats.touched,
			appended = stats.appended,
			evicted = stats.evicted,
			remaining = stats.remaining,
			"refresh cycle finished"
		);
		stats
	}
}
