//! Process kind: schema, stable identity, and entity adapter.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use vantage_cache::{CacheEntity, ColumnSpec, ColumnType, PropertyValue, Schema};

use crate::render;

pub const COL_PID: usize = 0;
pub const COL_NAME: usize = 1;
pub const COL_MEMORY: usize = 2;
pub const COL_STARTED: usize = 3;
pub const COL_UPTIME: usize = 4;

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
	Schema::new(
		"processes",
		[
			ColumnSpec::new("PID", "pid", ColumnType::Unsigned),
			ColumnSpec::new("Name", "name", ColumnType::Text),
			ColumnSpec::new("Memory", "memory", ColumnType::Bytes),
			ColumnSpec::new("Started", "started", ColumnType::Text),
			ColumnSpec::new("Uptime", "uptime", ColumnType::Duration),
		],
	)
});

/// Column table for the process kind.
pub fn schema() -> Schema {
	SCHEMA.clone()
}

/// Stable identity formula for processes: pid plus creation timestamp.
///
/// A pid alone is recycled by the OS; pairing it with the creation time
/// distinguishes a reused pid from the process it used to belong to.
pub fn stable_id(pid: u32, started: DateTime<Local>) -> String {
	format!("{pid}:{}", started.timestamp())
}

/// Mutable per-refresh statistics of a process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessStats {
	pub memory_bytes: u64,
	pub uptime: Duration,
}

/// One process row.
pub struct ProcessEntity {
	stable_id: String,
	pid: u32,
	name: String,
	started: DateTime<Local>,
	stats: RwLock<ProcessStats>,
}

impl ProcessEntity {
	pub fn new(pid: u32, name: &str, started: DateTime<Local>) -> Self {
		Self {
			stable_id: stable_id(pid, started),
			pid,
			name: name.to_string(),
			started,
			stats: RwLock::new(ProcessStats::default()),
		}
	}

	/// Replaces the refreshed statistics in place.
	pub fn update(&self, stats: ProcessStats) {
		*self.stats.write() = stats;
	}

	pub fn pid(&self) -> u32 {
		self.pid
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn stats(&self) -> ProcessStats {
		*self.stats.read()
	}
}

impl CacheEntity for ProcessEntity {
	fn stable_id(&self) -> &str {
		&self.stable_id
	}

	fn property(&self, column: usize) -> PropertyValue {
		match column {
			COL_PID => PropertyValue::Unsigned(u64::from(self.pid)),
			COL_NAME => PropertyValue::from(self.name.as_str()),
			COL_MEMORY => PropertyValue::Unsigned(self.stats.read().memory_bytes),
			COL_STARTED => PropertyValue::Text(render::timestamp(self.started)),
			COL_UPTIME => PropertyValue::Text(render::duration(self.stats.read().uptime)),
			_ => PropertyValue::Absent,
		}
	}

	fn render(&self, column: usize) -> String {
		match column {
			COL_MEMORY => render::bytes(self.stats.read().memory_bytes),
			_ => self.property(column).render(),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use chrono::{Local, TimeZone};
	use vantage_cache::{CacheEntity, PropertyValue};

	use super::{COL_MEMORY, COL_UPTIME, ProcessEntity, ProcessStats, schema, stable_id};

	fn started() -> chrono::DateTime<Local> {
		Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
	}

	#[test]
	fn test_stable_id_distinguishes_recycled_pids() {
		let a = stable_id(4242, started());
		let b = stable_id(4242, started() + chrono::Duration::seconds(90));
		assert_ne!(a, b, "same pid, different creation time, different process");
		assert_eq!(a, stable_id(4242, started()));
	}

	#[test]
	fn test_memory_renders_human_readable_but_sorts_typed() {
		let proc = ProcessEntity::new(100, "cache_bench", started());
		proc.update(ProcessStats {
			memory_bytes: 3 * 1024 * 1024,
			uptime: Duration::from_secs(61),
		});
		assert_eq!(
			proc.property(COL_MEMORY),
			PropertyValue::Unsigned(3 * 1024 * 1024)
		);
		assert_ne!(proc.render(COL_MEMORY), (3 * 1024 * 1024u64).to_string());
	}

	#[test]
	fn test_uptime_is_duration_flavored_text() {
		let proc = ProcessEntity::new(100, "idle", started());
		proc.update(ProcessStats {
			memory_bytes: 0,
			uptime: Duration::from_secs(2 * 3600 + 3 * 60 + 4),
		});
		assert_eq!(
			proc.property(COL_UPTIME),
			PropertyValue::Text("002:03:04".to_string())
		);
		assert_eq!(schema().column_type(COL_UPTIME).map(|t| t.is_numeric()), Some(false));
	}
}
