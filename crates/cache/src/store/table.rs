//! Slot table and identity index.
//!
//! # Role
//!
//! Structural operations on the store: upsert, lookup, removal, ordering.
//! Refresh-cycle bracketing lives in [`super::refresh`]; comparators live
//! in [`super::sort`].

use rustc_hash::FxHashMap;

use crate::entity::{CacheEntity, EntityRef};
use crate::error::CacheError;
use crate::schema::{ColumnType, Schema};

/// One stored entity plus its staleness bookkeeping.
///
/// The last-seen stamp belongs to the store, not the entity: entities know
/// nothing about refresh cycles.
pub(super) struct Slot<E> {
	pub(super) handle: EntityRef<E>,
	pub(super) last_seen: u64,
}

/// Outcome of an identity upsert.
pub enum Upsert<E> {
	/// The id was new; the entity was inserted and stamped with the current
	/// generation.
	Inserted(EntityRef<E>),
	/// The id was already present; the incoming entity was dropped and the
	/// surviving (first-appended) entity is returned.
	KeptExisting(EntityRef<E>),
}

impl<E> Upsert<E> {
	/// Returns the handle of the entity now stored under the id.
	pub fn handle(&self) -> &EntityRef<E> {
		match self {
			Upsert::Inserted(h) | Upsert::KeptExisting(h) => h,
		}
	}

	/// Consumes the outcome, returning the stored entity's handle.
	pub fn into_handle(self) -> EntityRef<E> {
		match self {
			Upsert::Inserted(h) | Upsert::KeptExisting(h) => h,
		}
	}

	/// Returns true if the entity was actually inserted.
	pub fn was_inserted(&self) -> bool {
		matches!(self, Upsert::Inserted(_))
	}
}

impl<E: CacheEntity> std::fmt::Debug for Upsert<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Upsert::Inserted(h) => f.debug_tuple("Inserted").field(&h.stable_id()).finish(),
			Upsert::KeptExisting(h) => {
				f.debug_tuple("KeptExisting").field(&h.stable_id()).finish()
			}
		}
	}
}

/// Stable-identity entity store.
///
/// The slot vector defines iteration/display order and owns one handle per
/// entity; the identity index maps stable ids to slot positions for O(1)
/// lookup. Structural operations take `&mut self` and belong to a single
/// owner thread; cloned [`EntityRef`]s remain readable from any thread.
pub struct EntityStore<E: CacheEntity> {
	schema: Schema,
	pub(super) slots: Vec<Slot<E>>,
	pub(super) by_id: FxHashMap<Box<str>, usize>,
	pub(super) generation: u64,
}

impl<E: CacheEntity> EntityStore<E> {
	/// Creates an empty store for the given resource-kind schema.
	pub fn new(schema: Schema) -> Self {
		Self {
			schema,
			slots: Vec::new(),
			by_id: FxHashMap::default(),
			generation: 0,
		}
	}

	/// Returns the store's column schema.
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// Returns the current generation. Advances by one per refresh cycle.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns the number of stored entities.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns true if the store is empty.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// O(1) lookup by stable id. Does not mark the entity as seen; touch
	/// marking is only reachable through [`super::RefreshCycle`].
	pub fn get(&self, id: &str) -> Option<&EntityRef<E>> {
		self.by_id.get(id).map(|&idx| &self.slots[idx].handle)
	}

	/// Returns true if an entity is stored under `id`.
	pub fn contains(&self, id: &str) -> bool {
		self.by_id.contains_key(id)
	}

	/// Upserts an entity by stable id.
	///
	/// A new id is inserted at the end of the order and stamped with the
	/// current generation. A duplicate id keeps the existing entity — the
	/// first one appended wins — and the incoming entity is dropped; the
	/// caller gets the survivor via [`Upsert::KeptExisting`]. An empty
	/// stable id is rejected without touching either index.
	pub fn append(&mut self, entity: E) -> Result<Upsert<E>, CacheError> {
		let id = entity.stable_id();
		if id.is_empty() {
			tracing::warn!(schema = self.schema.label(), "append rejected: empty stable id");
			return Err(CacheError::EmptyStableId);
		}
		if let Some(&idx) = self.by_id.get(id) {
			tracing::warn!(
				schema = self.schema.label(),
				stable_id = id,
				"duplicate append, keeping existing entity"
			);
			return Ok(Upsert::KeptExisting(self.slots[idx].handle.clone()));
		}
		let handle = EntityRef::new(entity);
		let key: Box<str> = handle.stable_id().into();
		self.by_id.insert(key, self.slots.len());
		self.slots.push(Slot {
			handle: handle.clone(),
			last_seen: self.generation,
		});
		Ok(Upsert::Inserted(handle))
	}

	/// Removes the entity stored under `id`, returning its handle.
	///
	/// The entity survives as long as the returned handle (or any other
	/// holder) keeps it alive. This is also the "rename" path: remove, then
	/// re-append under the new identity.
	pub fn remove(&mut self, id: &str) -> Option<EntityRef<E>> {
		let idx = self.by_id.remove(id)?;
		let slot = self.slots.remove(idx);
		for (i, s) in self.slots.iter().enumerate().skip(idx) {
			if let Some(entry) = self.by_id.get_mut(s.handle.stable_id()) {
				*entry = i;
			}
		}
		Some(slot.handle)
	}

	/// Releases every entity and empties both views.
	pub fn clear(&mut self) {
		self.slots.clear();
		self.by_id.clear();
	}

	/// Iterates the store in display order.
	pub fn iter(&self) -> impl Iterator<Item = &EntityRef<E>> {
		self.slots.iter().map(|s| &s.handle)
	}

	/// Returns a retained handle for every stored entity, in display order.
	pub fn handles(&self) -> Vec<EntityRef<E>> {
		self.slots.iter().map(|s| s.handle.clone()).collect()
	}

	/// Sorts the display order by `column` under its schema-declared type.
	pub fn sort(&mut self, column: usize, ascending: bool) -> Result<(), CacheError> {
		let ty = self
			.schema
			.column_type(column)
			.ok_or_else(|| self.column_error(column))?;
		self.sort_as(column, ascending, ty)
	}

	/// Sorts the display order by `column`, overriding the declared type.
	///
	/// An out-of-range column is rejected and the order is left untouched.
	pub fn sort_as(
		&mut self,
		column: usize,
		ascending: bool,
		ty: ColumnType,
	) -> Result<(), CacheError> {
		if column >= self.schema.len() {
			return Err(self.column_error(column));
		}
		super::sort::sort_slots(&mut self.slots, column, ascending, ty);
		self.rebuild_index();
		Ok(())
	}

	fn column_error(&self, column: usize) -> CacheError {
		tracing::warn!(
			schema = self.schema.label(),
			column,
			columns = self.schema.len(),
			"sort rejected: column out of range"
		);
		CacheError::ColumnOutOfRange {
			schema: self.schema.label(),
			column,
			columns: self.schema.len(),
		}
	}

	/// Rewrites the identity index from the slot vector.
	pub(super) fn rebuild_index(&mut self) {
		self.by_id.clear();
		for (idx, slot) in self.slots.iter().enumerate() {
			self.by_id.insert(slot.handle.stable_id().into(), idx);
		}
	}

	/// Stamps every slot's last-seen generation.
	pub(super) fn stamp_all(&mut self, stamp: u64) {
		for slot in &mut self.slots {
			slot.last_seen = stamp;
		}
	}

	/// Marks the entity under `id` as seen in the current generation.
	pub(super) fn touch(&mut self, id: &str) -> Option<&EntityRef<E>> {
		let idx = *self.by_id.get(id)?;
		let slot = &mut self.slots[idx];
		slot.last_seen = self.generation;
		Some(&slot.handle)
	}

	/// Evicts every slot not stamped with the current generation.
	pub(super) fn sweep(&mut self) -> usize {
		let before = self.slots.len();
		let generation = self.generation;
		self.slots.retain(|s| s.last_seen == generation);
		let evicted = before - self.slots.len();
		if evicted > 0 {
			self.rebuild_index();
		}
		evicted
	}
}
