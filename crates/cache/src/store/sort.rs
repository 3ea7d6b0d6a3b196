//! Type-aware comparators for the store's display order.
//!
//! # Role
//!
//! Builds a total order over entities for one column under a declared
//! [`ColumnType`]. Numeric flavors compare widened typed values; text
//! flavors compare case-folded strings with an ordinal tie-break.

use std::cmp::Ordering;

use crate::entity::CacheEntity;
use crate::schema::ColumnType;
use crate::value::PropertyValue;

use super::table::Slot;

/// Sorts the slot vector in place by `column` under `ty`.
///
/// Descending order reverses the comparator result only, so which elements
/// compare equal is direction-independent. Numeric ties are broken
/// arbitrarily (the sort is not required to be stable).
pub(super) fn sort_slots<E: CacheEntity>(
	slots: &mut [Slot<E>],
	column: usize,
	ascending: bool,
	ty: ColumnType,
) {
	slots.sort_by(|a, b| {
		let ord = compare(&*a.handle, &*b.handle, column, ty);
		if ascending { ord } else { ord.reverse() }
	});
}

/// Compares two entities on `column` under the declared type.
fn compare<E: CacheEntity>(a: &E, b: &E, column: usize, ty: ColumnType) -> Ordering {
	if ty.is_numeric() {
		numeric_key(&a.property(column)).cmp(&numeric_key(&b.property(column)))
	} else {
		compare_text(&text_key(a, column), &text_key(b, column))
	}
}

/// Widens a typed value to a common signed 128-bit sort key.
///
/// Absent (and type-mismatched) values sort as zero. Widening to `i128`
/// keeps negative signed values below zero instead of wrapping them into
/// the unsigned range.
fn numeric_key(value: &PropertyValue) -> i128 {
	match value {
		PropertyValue::Signed(v) => *v as i128,
		PropertyValue::Unsigned(v) => *v as i128,
		PropertyValue::Absent | PropertyValue::Text(_) => 0,
	}
}

/// Sort key for text flavors: the typed value when it is already text,
/// otherwise the entity's rendered cell.
fn text_key<E: CacheEntity>(entity: &E, column: usize) -> String {
	match entity.property(column) {
		PropertyValue::Text(s) => s,
		_ => entity.render(column),
	}
}

/// Case-insensitive comparison with an ordinal tie-break.
///
/// Full Unicode case folding via `char::to_lowercase`; strings that fold
/// equal fall back to ordinal byte order so the result is still a total
/// order.
fn compare_text(a: &str, b: &str) -> Ordering {
	a.chars()
		.flat_map(char::to_lowercase)
		.cmp(b.chars().flat_map(char::to_lowercase))
		.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
	use std::cmp::Ordering;

	use super::{compare_text, numeric_key};
	use crate::value::PropertyValue;

	#[test]
	fn test_numeric_key_widening() {
		assert!(numeric_key(&PropertyValue::Signed(-1)) < numeric_key(&PropertyValue::Unsigned(0)));
		assert!(
			numeric_key(&PropertyValue::Unsigned(u64::MAX))
				> numeric_key(&PropertyValue::Signed(i64::MAX))
		);
		assert_eq!(numeric_key(&PropertyValue::Absent), 0);
		assert_eq!(numeric_key(&PropertyValue::Text("9".into())), 0);
	}

	#[test]
	fn test_compare_text_case_insensitive() {
		assert_eq!(compare_text("apple", "BANANA"), Ordering::Less);
		assert_eq!(compare_text("Cherry", "banana"), Ordering::Greater);
		// Fold-equal strings stay distinguishable through the ordinal
		// tie-break.
		assert_eq!(compare_text("Apple", "apple"), Ordering::Less);
		assert_eq!(compare_text("same", "same"), Ordering::Equal);
	}
}
