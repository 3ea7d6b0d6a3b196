//! Cell rendering helpers shared by the kind adapters.

use std::time::Duration;

use bytesize::ByteSize;
use chrono::{DateTime, Local};

/// Renders a byte count as a human-readable size.
pub fn bytes(n: u64) -> String {
	ByteSize::b(n).to_string()
}

/// Renders a duration as `HHH:MM:SS`.
///
/// Hours are zero-padded to three digits so lexicographic order matches
/// chronological order; duration columns carry their rendering as the
/// typed value and sort as text.
pub fn duration(d: Duration) -> String {
	let secs = d.as_secs();
	format!("{:03}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Renders a local timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp(t: DateTime<Local>) -> String {
	t.format("%Y-%m-%d %H:%M:%S").to_string()
}
