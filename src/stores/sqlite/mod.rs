//! Contains convenience type alias and function for [AppState] that uses
//! the SQLite backend.

pub mod budget;
pub mod savings_goal;
pub mod transaction;

pub use budget::SQLiteBudgetStore;
pub use savings_goal::SQLiteSavingsGoalStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState =
    AppState<SQLiteBudgetStore, SQLiteSavingsGoalStore, SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the
/// domain models. All three stores share the one connection behind an
/// `Arc<Mutex>`.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        SQLiteBudgetStore::new(connection.clone()),
        SQLiteSavingsGoalStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection),
    ))
}
