//! Network-connection kind: schema, stable identity, and entity adapter.

use std::net::SocketAddr;
use std::sync::LazyLock;

use parking_lot::RwLock;
use vantage_cache::{CacheEntity, ColumnSpec, ColumnType, PropertyValue, Schema};

use crate::render;

pub const COL_PROTOCOL: usize = 0;
pub const COL_LOCAL: usize = 1;
pub const COL_REMOTE: usize = 2;
pub const COL_STATE: usize = 3;
pub const COL_PID: usize = 4;
pub const COL_BYTES_IN: usize = 5;
pub const COL_BYTES_OUT: usize = 6;

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
	Schema::new(
		"connections",
		[
			ColumnSpec::new("Protocol", "protocol", ColumnType::Text),
			ColumnSpec::new("Local Address", "local", ColumnType::Text),
			ColumnSpec::new("Remote Address", "remote", ColumnType::Text),
			ColumnSpec::new("State", "state", ColumnType::Text),
			ColumnSpec::new("PID", "pid", ColumnType::Unsigned),
			ColumnSpec::new("Bytes In", "bytes_in", ColumnType::Bytes),
			ColumnSpec::new("Bytes Out", "bytes_out", ColumnType::Bytes),
		],
	)
});

/// Column table for the connection kind.
pub fn schema() -> Schema {
	SCHEMA.clone()
}

/// Transport protocol of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
	Tcp,
	Udp,
}

impl Protocol {
	pub fn label(self) -> &'static str {
		match self {
			Protocol::Tcp => "tcp",
			Protocol::Udp => "udp",
		}
	}
}

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
	Listen,
	Established,
	CloseWait,
	TimeWait,
	Closed,
}

impl ConnState {
	pub fn label(self) -> &'static str {
		match self {
			ConnState::Listen => "Listen",
			ConnState::Established => "Established",
			ConnState::CloseWait => "CloseWait",
			ConnState::TimeWait => "TimeWait",
			ConnState::Closed => "Closed",
		}
	}
}

/// Stable identity formula for connections: `protocol:local-addr:local-port`.
///
/// The local endpoint is fixed for the lifetime of a socket, while the
/// remote endpoint, state, and counters all change; two enumerations of the
/// same socket therefore agree on this key.
pub fn stable_id(protocol: Protocol, local: SocketAddr) -> String {
	format!("{}:{local}", protocol.label())
}

/// Mutable per-refresh state of a connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionInfo {
	pub remote: Option<SocketAddr>,
	pub state: ConnState,
	pub pid: Option<u32>,
	pub bytes_in: u64,
	pub bytes_out: u64,
}

/// One connection row.
pub struct ConnectionEntity {
	stable_id: String,
	protocol: Protocol,
	local: SocketAddr,
	info: RwLock<ConnectionInfo>,
}

impl ConnectionEntity {
	pub fn new(protocol: Protocol, local: SocketAddr, info: ConnectionInfo) -> Self {
		Self {
			stable_id: stable_id(protocol, local),
			protocol,
			local,
			info: RwLock::new(info),
		}
	}

	/// Replaces the refreshed state in place.
	pub fn update(&self, info: ConnectionInfo) {
		*self.info.write() = info;
	}

	pub fn protocol(&self) -> Protocol {
		self.protocol
	}

	pub fn local(&self) -> SocketAddr {
		self.local
	}

	pub fn info(&self) -> ConnectionInfo {
		*self.info.read()
	}
}

impl CacheEntity for ConnectionEntity {
	fn stable_id(&self) -> &str {
		&self.stable_id
	}

	fn property(&self, column: usize) -> PropertyValue {
		let info = self.info.read();
		match column {
			COL_PROTOCOL => PropertyValue::from(self.protocol.label()),
			COL_LOCAL => PropertyValue::Text(self.local.to_string()),
			COL_REMOTE => info
				.remote
				.map(|addr| PropertyValue::Text(addr.to_string()))
				.unwrap_or(PropertyValue::Absent),
			COL_STATE => PropertyValue::from(info.state.label()),
			COL_PID => info
				.pid
				.map(|pid| PropertyValue::Unsigned(u64::from(pid)))
				.unwrap_or(PropertyValue::Absent),
			COL_BYTES_IN => PropertyValue::Unsigned(info.bytes_in),
			COL_BYTES_OUT => PropertyValue::Unsigned(info.bytes_out),
			_ => PropertyValue::Absent,
		}
	}

	fn render(&self, column: usize) -> String {
		match column {
			COL_BYTES_IN => render::bytes(self.info.read().bytes_in),
			COL_BYTES_OUT => render::bytes(self.info.read().bytes_out),
			_ => self.property(column).render(),
		}
	}

	fn is_running(&self) -> bool {
		matches!(
			self.info.read().state,
			ConnState::Listen | ConnState::Established
		)
	}
}
