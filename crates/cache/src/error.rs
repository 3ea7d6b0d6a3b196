/// Errors produced by invalid store calls.
///
/// Lookup misses are ordinary `Option` results, never errors: the store is a
/// pure data structure and does not fail because of the content it holds.
/// Duplicate-identity appends are resolved by policy (first wins) and
/// reported through [`crate::store::Upsert`], not as errors. Only calls that
/// are invalid regardless of content land here, and each one leaves the
/// store's indices untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
	/// An entity was handed to the store with an empty stable id.
	#[error("entity has an empty stable id")]
	EmptyStableId,

	/// A sort named a column index outside the schema.
	#[error("column {column} out of range for schema `{schema}` with {columns} columns")]
	ColumnOutOfRange {
		schema: &'static str,
		column: usize,
		columns: usize,
	},
}
