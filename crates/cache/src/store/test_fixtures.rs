//! Shared fixtures for the store test-suite.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::entity::CacheEntity;
use crate::schema::{ColumnSpec, ColumnType, Schema};
use crate::value::PropertyValue;

pub(crate) const COL_NAME: usize = 0;
pub(crate) const COL_VALUE: usize = 1;
pub(crate) const COL_SIZE: usize = 2;

pub(crate) fn test_schema() -> Schema {
	Schema::new(
		"test",
		[
			ColumnSpec::new("Name", "name", ColumnType::Text),
			ColumnSpec::new("Value", "value", ColumnType::Signed),
			ColumnSpec::new("Size", "size", ColumnType::Bytes),
		],
	)
}

/// Test entity with in-place mutable fields and optional drop counting.
pub(crate) struct TestEntity {
	id: String,
	name: Mutex<String>,
	value: AtomicI64,
	value_absent: AtomicBool,
	size: AtomicU64,
	drops: Option<Arc<AtomicUsize>>,
}

impl TestEntity {
	pub(crate) fn value(&self) -> i64 {
		self.value.load(Ordering::SeqCst)
	}

	pub(crate) fn set_value(&self, value: i64) {
		self.value_absent.store(false, Ordering::SeqCst);
		self.value.store(value, Ordering::SeqCst);
	}

	/// Makes the value column report [`PropertyValue::Absent`].
	pub(crate) fn clear_value(&self) {
		self.value_absent.store(true, Ordering::SeqCst);
	}
}

impl Drop for TestEntity {
	fn drop(&mut self) {
		if let Some(drops) = &self.drops {
			drops.fetch_add(1, Ordering::SeqCst);
		}
	}
}

impl CacheEntity for TestEntity {
	fn stable_id(&self) -> &str {
		&self.id
	}

	fn property(&self, column: usize) -> PropertyValue {
		match column {
			COL_NAME => PropertyValue::Text(self.name.lock().unwrap().clone()),
			COL_VALUE => {
				if self.value_absent.load(Ordering::SeqCst) {
					PropertyValue::Absent
				} else {
					PropertyValue::Signed(self.value.load(Ordering::SeqCst))
				}
			}
			COL_SIZE => PropertyValue::Unsigned(self.size.load(Ordering::SeqCst)),
			_ => PropertyValue::Absent,
		}
	}
}

fn build(id: &str, name: &str, value: i64, size: u64, drops: Option<Arc<AtomicUsize>>) -> TestEntity {
	TestEntity {
		id: id.to_string(),
		name: Mutex::new(name.to_string()),
		value: AtomicI64::new(value),
		value_absent: AtomicBool::new(false),
		size: AtomicU64::new(size),
		drops,
	}
}

pub(crate) fn make_entity(id: &str, value: i64) -> TestEntity {
	build(id, id, value, 0, None)
}

pub(crate) fn make_named(id: &str, name: &str) -> TestEntity {
	build(id, name, 0, 0, None)
}

pub(crate) fn make_sized(id: &str, size: u64) -> TestEntity {
	build(id, id, 0, size, None)
}

pub(crate) fn make_counted(id: &str, value: i64, drops: &Arc<AtomicUsize>) -> TestEntity {
	build(id, id, value, 0, Some(drops.clone()))
}

pub(crate) fn drop_counter() -> Arc<AtomicUsize> {
	Arc::new(AtomicUsize::new(0))
}
