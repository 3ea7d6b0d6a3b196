use serde::Serialize;

use crate::schema::ColumnType;

/// Typed value of a single entity property.
///
/// Every cell a consumer can see has both a typed value (used by the sort
/// engine) and a string rendering (used for display). `Absent` covers
/// properties that do not apply to a particular entity, e.g. the pid of a
/// stopped service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
	/// No value for this entity. Serializes as `null`; sorts as zero under
	/// numeric column types.
	Absent,
	/// Signed integer value.
	Signed(i64),
	/// Unsigned integer value (also used for byte sizes).
	Unsigned(u64),
	/// String value.
	Text(String),
}

impl PropertyValue {
	/// Returns the signed value if this is a `Signed` variant.
	pub fn as_signed(&self) -> Option<i64> {
		match self {
			PropertyValue::Signed(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the unsigned value if this is an `Unsigned` variant.
	pub fn as_unsigned(&self) -> Option<u64> {
		match self {
			PropertyValue::Unsigned(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `Text` variant.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			PropertyValue::Text(v) => Some(v),
			_ => None,
		}
	}

	/// Returns true if this value is absent.
	pub fn is_absent(&self) -> bool {
		matches!(self, PropertyValue::Absent)
	}

	/// Returns true if this value carries the natural payload for `ty`.
	///
	/// `Absent` matches every column type; a column may be empty for any
	/// entity.
	pub fn matches_type(&self, ty: ColumnType) -> bool {
		matches!(
			(self, ty),
			(PropertyValue::Absent, _)
				| (PropertyValue::Signed(_), ColumnType::Signed)
				| (PropertyValue::Unsigned(_), ColumnType::Unsigned)
				| (PropertyValue::Unsigned(_), ColumnType::Bytes)
				| (PropertyValue::Text(_), ColumnType::Text)
				| (PropertyValue::Text(_), ColumnType::Duration)
		)
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			PropertyValue::Absent => "absent",
			PropertyValue::Signed(_) => "signed",
			PropertyValue::Unsigned(_) => "unsigned",
			PropertyValue::Text(_) => "text",
		}
	}

	/// Default string rendering of this value.
	///
	/// Entity types override cell rendering where the default is not
	/// presentable (byte sizes, timestamps); everything else falls through
	/// to this.
	pub fn render(&self) -> String {
		match self {
			PropertyValue::Absent => String::new(),
			PropertyValue::Signed(v) => v.to_string(),
			PropertyValue::Unsigned(v) => v.to_string(),
			PropertyValue::Text(v) => v.clone(),
		}
	}
}

impl From<i64> for PropertyValue {
	fn from(v: i64) -> Self {
		PropertyValue::Signed(v)
	}
}

impl From<u64> for PropertyValue {
	fn from(v: u64) -> Self {
		PropertyValue::Unsigned(v)
	}
}

impl From<String> for PropertyValue {
	fn from(v: String) -> Self {
		PropertyValue::Text(v)
	}
}

impl From<&str> for PropertyValue {
	fn from(v: &str) -> Self {
		PropertyValue::Text(v.to_string())
	}
}
