//! Service kind: schema, stable identity, and entity adapter.

use std::sync::LazyLock;

use parking_lot::RwLock;
use vantage_cache::{CacheEntity, ColumnSpec, ColumnType, PropertyValue, Schema};

pub const COL_NAME: usize = 0;
pub const COL_DISPLAY_NAME: usize = 1;
pub const COL_STATUS: usize = 2;
pub const COL_START_MODE: usize = 3;
pub const COL_PID: usize = 4;

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
	Schema::new(
		"services",
		[
			ColumnSpec::new("Name", "name", ColumnType::Text),
			ColumnSpec::new("Display Name", "display_name", ColumnType::Text),
			ColumnSpec::new("Status", "status", ColumnType::Text),
			ColumnSpec::new("Start Mode", "start_mode", ColumnType::Text),
			ColumnSpec::new("PID", "pid", ColumnType::Unsigned),
		],
	)
});

/// Column table for the service kind.
pub fn schema() -> Schema {
	SCHEMA.clone()
}

/// Stable identity formula for services: the service name, lowercased.
///
/// Service names are unique per machine and case-insensitive on the
/// platforms that have system services, so the name alone identifies "the
/// same service" across enumerations.
pub fn stable_id(name: &str) -> String {
	name.to_ascii_lowercase()
}

/// Lifecycle status of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
	Running,
	Stopped,
	Paused,
	Pending,
}

impl ServiceStatus {
	pub fn label(self) -> &'static str {
		match self {
			ServiceStatus::Running => "Running",
			ServiceStatus::Stopped => "Stopped",
			ServiceStatus::Paused => "Paused",
			ServiceStatus::Pending => "Pending",
		}
	}
}

/// Configured start mode of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
	Auto,
	Manual,
	Disabled,
}

impl StartMode {
	pub fn label(self) -> &'static str {
		match self {
			StartMode::Auto => "Auto",
			StartMode::Manual => "Manual",
			StartMode::Disabled => "Disabled",
		}
	}
}

/// Mutable per-refresh state of a service.
#[derive(Debug, Clone)]
pub struct ServiceState {
	pub display_name: String,
	pub status: ServiceStatus,
	pub start_mode: StartMode,
	pub pid: Option<u32>,
}

/// One service row.
///
/// Identity fields are immutable; everything an enumerator refreshes lives
/// in [`ServiceState`] behind a lock, so [`update`](Self::update) mutates in
/// place without disturbing handles held elsewhere.
pub struct ServiceEntity {
	stable_id: String,
	name: String,
	state: RwLock<ServiceState>,
}

impl ServiceEntity {
	pub fn new(name: &str, state: ServiceState) -> Self {
		Self {
			stable_id: stable_id(name),
			name: name.to_string(),
			state: RwLock::new(state),
		}
	}

	/// Replaces the mutable state in place. Identity and outstanding
	/// handles are unaffected.
	pub fn update(&self, state: ServiceState) {
		*self.state.write() = state;
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn state(&self) -> ServiceState {
		self.state.read().clone()
	}
}

impl CacheEntity for ServiceEntity {
	fn stable_id(&self) -> &str {
		&self.stable_id
	}

	fn property(&self, column: usize) -> PropertyValue {
		let state = self.state.read();
		match column {
			COL_NAME => PropertyValue::from(self.name.as_str()),
			COL_DISPLAY_NAME => PropertyValue::from(state.display_name.as_str()),
			COL_STATUS => PropertyValue::from(state.status.label()),
			COL_START_MODE => PropertyValue::from(state.start_mode.label()),
			COL_PID => state
				.pid
				.map(|pid| PropertyValue::Unsigned(u64::from(pid)))
				.unwrap_or(PropertyValue::Absent),
			_ => PropertyValue::Absent,
		}
	}

	fn is_running(&self) -> bool {
		self.state.read().status == ServiceStatus::Running
	}

	fn is_disabled(&self) -> bool {
		self.state.read().start_mode == StartMode::Disabled
	}
}

#[cfg(test)]
mod tests {
	use vantage_cache::{CacheEntity, PropertyValue};

	use super::{
		COL_PID, COL_STATUS, ServiceEntity, ServiceState, ServiceStatus, StartMode, schema,
		stable_id,
	};

	fn stopped() -> ServiceState {
		ServiceState {
			display_name: "Print Spooler".to_string(),
			status: ServiceStatus::Stopped,
			start_mode: StartMode::Manual,
			pid: None,
		}
	}

	#[test]
	fn test_stable_id_is_case_insensitive() {
		assert_eq!(stable_id("Spooler"), stable_id("spooler"));
		assert_eq!(stable_id("Spooler"), "spooler");
	}

	#[test]
	fn test_schema_shape() {
		let schema = schema();
		assert_eq!(schema.len(), 5);
		assert_eq!(schema.index_of("pid"), Some(COL_PID));
		assert_eq!(schema.index_of("status"), Some(COL_STATUS));
	}

	#[test]
	fn test_update_in_place_preserves_identity() {
		let svc = ServiceEntity::new("Spooler", stopped());
		assert!(!svc.is_running());
		assert_eq!(svc.property(COL_PID), PropertyValue::Absent);

		svc.update(ServiceState {
			status: ServiceStatus::Running,
			pid: Some(412),
			..stopped()
		});
		assert_eq!(svc.stable_id(), "spooler");
		assert!(svc.is_running());
		assert_eq!(svc.property(COL_PID), PropertyValue::Unsigned(412));
		assert_eq!(svc.render(COL_PID), "412");
	}

	#[test]
	fn test_disabled_hint_tracks_start_mode() {
		let svc = ServiceEntity::new("Spooler", ServiceState {
			start_mode: StartMode::Disabled,
			..stopped()
		});
		assert!(svc.is_disabled());
	}
}
