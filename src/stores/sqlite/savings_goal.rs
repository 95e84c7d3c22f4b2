//! Implements a SQLite backed savings goal store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseID,
    db::{CreateTable, MapRow},
    savings_goal::{NewSavingsGoal, SavingsGoal},
    stores::SavingsGoalStore,
};

/// Stores savings goals in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteSavingsGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSavingsGoalStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const SAVINGS_GOAL_COLUMNS: &str =
    "id, name, target_amount, current_amount, target_date, created_at";

impl SavingsGoalStore for SQLiteSavingsGoalStore {
    /// Retrieve all savings goals, newest first with the row ID as a stable
    /// tiebreak for records created in the same second.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn get_all(&self) -> Result<Vec<SavingsGoal>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {SAVINGS_GOAL_COLUMNS} FROM savings_goals ORDER BY created_at DESC, id DESC"
            ))?
            .query_map([], Self::map_row)?
            .map(|maybe_goal| maybe_goal.map_err(Error::SqlError))
            .collect()
    }

    /// Create a new savings goal in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn create(&mut self, new_goal: NewSavingsGoal) -> Result<SavingsGoal, Error> {
        let goal = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO savings_goals (name, target_amount, current_amount, target_date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {SAVINGS_GOAL_COLUMNS}"
            ))?
            .query_row(
                (
                    new_goal.name,
                    new_goal.target_amount,
                    new_goal.current_amount,
                    new_goal.target_date,
                ),
                Self::map_row,
            )?;

        Ok(goal)
    }

    /// Overwrite every field of the savings goal with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingSavingsGoal] if `id` does not refer to a valid savings goal,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn replace(&mut self, id: DatabaseID, new_goal: NewSavingsGoal) -> Result<SavingsGoal, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "UPDATE savings_goals
                 SET name = ?1, target_amount = ?2, current_amount = ?3, target_date = ?4
                 WHERE id = ?5
                 RETURNING {SAVINGS_GOAL_COLUMNS}"
            ))?
            .query_row(
                (
                    new_goal.name,
                    new_goal.target_amount,
                    new_goal.current_amount,
                    new_goal.target_date,
                    id,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingSavingsGoal,
                error => error.into(),
            })
    }

    /// Delete the savings goal with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingSavingsGoal] if `id` does not refer to a valid savings goal,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM savings_goals WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            Err(Error::DeleteMissingSavingsGoal)
        } else {
            Ok(())
        }
    }
}

impl CreateTable for SQLiteSavingsGoalStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS savings_goals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    target_amount REAL NOT NULL,
                    current_amount REAL DEFAULT 0,
                    target_date TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteSavingsGoalStore {
    type ReturnType = SavingsGoal;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(SavingsGoal {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            target_amount: row.get(offset + 2)?,
            current_amount: row.get(offset + 3)?,
            target_date: row.get(offset + 4)?,
            created_at: row.get(offset + 5)?,
        })
    }
}

#[cfg(test)]
mod sqlite_savings_goal_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, db::initialize, savings_goal::NewSavingsGoal, stores::SavingsGoalStore};

    use super::SQLiteSavingsGoalStore;

    fn get_test_store() -> SQLiteSavingsGoalStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteSavingsGoalStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_without_target_date_round_trips() {
        let mut store = get_test_store();

        let created = store
            .create(NewSavingsGoal {
                name: "Emergency fund".to_string(),
                target_amount: 5000.0,
                current_amount: 0.0,
                target_date: None,
            })
            .unwrap();

        assert_eq!(created.target_date, None);
        assert_eq!(store.get_all().unwrap(), vec![created]);
    }

    #[test]
    fn replace_overwrites_every_field() {
        let mut store = get_test_store();
        let created = store
            .create(NewSavingsGoal {
                name: "Holiday".to_string(),
                target_amount: 1200.0,
                current_amount: 0.0,
                target_date: None,
            })
            .unwrap();

        let updated = store
            .replace(
                created.id,
                NewSavingsGoal {
                    name: "Holiday 2025".to_string(),
                    target_amount: 1500.0,
                    current_amount: 300.0,
                    target_date: Some("2025-06-01".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Holiday 2025");
        assert_eq!(updated.current_amount, 300.0);
        assert_eq!(updated.target_date, Some("2025-06-01".to_string()));
    }

    #[test]
    fn replace_missing_goal_fails() {
        let mut store = get_test_store();

        let result = store.replace(
            42,
            NewSavingsGoal {
                name: "Ghost".to_string(),
                target_amount: 1.0,
                current_amount: 0.0,
                target_date: None,
            },
        );

        assert_eq!(result, Err(Error::UpdateMissingSavingsGoal));
    }

    #[test]
    fn delete_missing_goal_fails() {
        let mut store = get_test_store();

        assert_eq!(store.delete(42), Err(Error::DeleteMissingSavingsGoal));
    }
}
