//! The type for database row IDs.

/// Alias for the integer type used for database row IDs.
pub type DatabaseID = i64;
