//! Column schema tables.
//!
//! # Role
//!
//! Each resource kind declares its columns once, as an ordered table of
//! `{display name, binding name, type}`. Sort and display code is written
//! against the table instead of per-kind accessors, and a column index is
//! stable for the lifetime of the kind's schema.

use std::sync::Arc;

use serde::Serialize;

/// Declared sort/display type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
	/// Free-form text; sorted case-insensitively.
	Text,
	/// Signed integer.
	Signed,
	/// Unsigned integer.
	Unsigned,
	/// Byte size; sorted numerically, rendered human-readably.
	Bytes,
	/// Duration; carried as rendered text, sorted like text.
	Duration,
}

impl ColumnType {
	/// Returns true if values under this type compare numerically.
	pub fn is_numeric(self) -> bool {
		matches!(self, ColumnType::Signed | ColumnType::Unsigned | ColumnType::Bytes)
	}
}

/// One column of a resource kind's schema.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSpec {
	/// Human-readable header text.
	pub display: &'static str,
	/// Programmatic name, unique within a schema.
	pub binding: &'static str,
	/// Declared sort/display type.
	pub ty: ColumnType,
}

impl ColumnSpec {
	/// Creates a new column spec.
	pub const fn new(display: &'static str, binding: &'static str, ty: ColumnType) -> Self {
		Self { display, binding, ty }
	}
}

/// Ordered, immutable column table for one resource kind.
///
/// Cloning is cheap; the column slice is shared.
#[derive(Debug, Clone)]
pub struct Schema {
	label: &'static str,
	columns: Arc<[ColumnSpec]>,
}

impl Schema {
	/// Creates a schema from an ordered column list.
	///
	/// Binding names must be unique within the table; duplicates indicate a
	/// kind definition bug and are rejected in debug builds.
	pub fn new(label: &'static str, columns: impl IntoIterator<Item = ColumnSpec>) -> Self {
		let columns: Arc<[ColumnSpec]> = columns.into_iter().collect();
		debug_assert!(
			columns
				.iter()
				.enumerate()
				.all(|(i, c)| columns[..i].iter().all(|p| p.binding != c.binding)),
			"duplicate column binding in schema `{label}`"
		);
		Self { label, columns }
	}

	/// Returns the schema's label (the resource kind name).
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the number of columns.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Returns true if the schema has no columns.
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// Returns the column at `index`, if in range.
	pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
		self.columns.get(index)
	}

	/// Returns the declared type of the column at `index`, if in range.
	pub fn column_type(&self, index: usize) -> Option<ColumnType> {
		self.columns.get(index).map(|c| c.ty)
	}

	/// Returns the index of the column with the given binding name.
	pub fn index_of(&self, binding: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.binding == binding)
	}

	/// Returns the full column table.
	pub fn columns(&self) -> &[ColumnSpec] {
		&self.columns
	}

	/// Returns an iterator over the columns in display order.
	pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
		self.columns.iter()
	}
}
