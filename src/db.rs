/*! This module defines traits for setting up and reading from the application's SQLite database. */

use rusqlite::{Connection, Row};

use crate::{
    Error,
    stores::sqlite::{SQLiteBudgetStore, SQLiteSavingsGoalStore, SQLiteTransactionStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type to map a row to.
    type ReturnType;

    /// Convert a row into a concrete type, reading from the first column.
    ///
    /// # Errors
    /// Returns an error if a column contains an invalid type or is out of bounds.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from the column at `offset`.
    ///
    /// # Errors
    /// Returns an error if a column contains an invalid type or is out of bounds.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for the domain models in the database.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    SQLiteTransactionStore::create_table(connection)?;
    SQLiteBudgetStore::create_table(connection)?;
    SQLiteSavingsGoalStore::create_table(connection)?;

    Ok(())
}
