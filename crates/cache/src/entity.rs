//! The snapshot entity abstraction and its shared-ownership handle.

use std::ops::Deref;
use std::sync::Arc;

use crate::value::PropertyValue;

/// An entity stored in the cache: a stable identity plus indexed properties.
///
/// Implementors represent one enumerated real-world object (a service, a
/// process, a connection). The stable id is computed deterministically from
/// fields that are immutable for the object's lifetime, so two independent
/// enumerations of the same object yield the same id. It must never change
/// after construction; "renaming" is a remove plus a re-append under the new
/// identity.
///
/// Mutable display state lives inside the entity (typically behind a lock,
/// see `vantage-kinds`) so refresh drivers can update survivors in place
/// while display consumers on other threads keep reading them.
pub trait CacheEntity: Send + Sync + 'static {
	/// Deterministic identity of the underlying real-world object.
	fn stable_id(&self) -> &str;

	/// Typed value of the property at `column`, per the kind's schema.
	///
	/// Out-of-schema columns yield [`PropertyValue::Absent`].
	fn property(&self, column: usize) -> PropertyValue;

	/// Human-readable rendering of the property at `column`.
	///
	/// The default derives the cell text from the typed value; kinds
	/// override columns whose raw value is not presentable (byte sizes,
	/// timestamps).
	fn render(&self, column: usize) -> String {
		self.property(column).render()
	}

	/// Presentation hint: whether the underlying object is live/active.
	fn is_running(&self) -> bool {
		true
	}

	/// Presentation hint: whether the underlying object is disabled.
	fn is_disabled(&self) -> bool {
		false
	}
}

/// Shared-ownership handle to a cached entity.
///
/// The store, in-flight selections, and long-running operations each hold an
/// independent handle; the entity is destroyed exactly once, when the last
/// handle is dropped. Cloning retains, dropping releases, and the count is
/// atomic, so handles may be moved to and read from any thread regardless of
/// what the owner thread does to the store.
pub struct EntityRef<E> {
	inner: Arc<E>,
}

impl<E> EntityRef<E> {
	/// Wraps a freshly constructed entity. The creator holds the first
	/// reference.
	pub fn new(entity: E) -> Self {
		Self { inner: Arc::new(entity) }
	}

	/// Returns true if both handles point at the same entity allocation.
	///
	/// This is object identity, not value equality: a survivor of a refresh
	/// cycle compares equal to the handle taken before the cycle.
	pub fn same_entity(a: &Self, b: &Self) -> bool {
		Arc::ptr_eq(&a.inner, &b.inner)
	}

	/// Returns the current number of holders. Test/diagnostic aid; the
	/// value is stale the moment it is read.
	pub fn holders(&self) -> usize {
		Arc::strong_count(&self.inner)
	}
}

impl<E> Clone for EntityRef<E> {
	fn clone(&self) -> Self {
		Self { inner: self.inner.clone() }
	}
}

impl<E> Deref for EntityRef<E> {
	type Target = E;

	fn deref(&self) -> &E {
		&self.inner
	}
}

impl<E: CacheEntity> std::fmt::Debug for EntityRef<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EntityRef")
			.field("stable_id", &self.inner.stable_id())
			.field("holders", &self.holders())
			.finish()
	}
}
