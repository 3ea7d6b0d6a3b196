//! Structural invariant checks shared by the store test-suite.
//!
//! `check_store` asserts the identity-index ↔ slot-order contract after a
//! mutation; the tests here drive each structural operation through it.

use super::table::EntityStore;
use crate::entity::CacheEntity;

/// Asserts the store's structural invariants.
///
/// - The identity index and the slot vector have the same cardinality.
/// - Every index entry points at the slot holding its id.
/// - No slot is stamped past the store generation.
pub(crate) fn check_store<E: CacheEntity>(store: &EntityStore<E>) {
	assert_eq!(
		store.by_id.len(),
		store.slots.len(),
		"identity index and slot table must have the same size"
	);
	for (idx, slot) in store.slots.iter().enumerate() {
		let id = slot.handle.stable_id();
		assert_eq!(
			store.by_id.get(id).copied(),
			Some(idx),
			"index entry for `{id}` must point at its slot"
		);
		assert!(
			slot.last_seen <= store.generation,
			"slot `{id}` stamped past the store generation"
		);
	}
}

#[cfg(test)]
mod tests {
	use super::check_store;
	use crate::store::EntityStore;
	use crate::store::test_fixtures::{make_entity, test_schema};

	#[test]
	fn test_invariants_across_structural_ops() {
		let mut store = EntityStore::new(test_schema());
		check_store(&store);

		for (id, value) in [("a", 3), ("b", 1), ("c", 2), ("d", 4)] {
			store.append(make_entity(id, value)).unwrap();
			check_store(&store);
		}

		// Duplicate append leaves both views untouched.
		store.append(make_entity("b", 99)).unwrap();
		check_store(&store);

		// Removal from the middle must reindex the tail.
		let _ = store.remove("b");
		check_store(&store);

		store.sort(1, true).unwrap();
		check_store(&store);

		let mut cycle = store.begin_refresh();
		let _ = cycle.lookup("a");
		cycle.append(make_entity("e", 5)).unwrap();
		let _ = cycle.finish();
		check_store(&store);

		store.clear();
		check_store(&store);
	}
}
