//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    budget::{Budget, NewBudget},
    database_id::DatabaseID,
    db::{CreateTable, MapRow},
    stores::BudgetStore,
};

/// Stores budgets in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const BUDGET_COLUMNS: &str = "id, category, amount, period, start_date, created_at";

impl BudgetStore for SQLiteBudgetStore {
    /// Retrieve all budgets, newest first with the row ID as a stable
    /// tiebreak for records created in the same second.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {BUDGET_COLUMNS} FROM budgets ORDER BY created_at DESC, id DESC"
            ))?
            .query_map([], Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    /// Create a new budget in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO budgets (category, amount, period, start_date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {BUDGET_COLUMNS}"
            ))?
            .query_row(
                (
                    new_budget.category,
                    new_budget.amount,
                    new_budget.period,
                    new_budget.start_date,
                ),
                Self::map_row,
            )?;

        Ok(budget)
    }

    /// Overwrite every field of the budget with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingBudget] if `id` does not refer to a valid budget,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn replace(&mut self, id: DatabaseID, new_budget: NewBudget) -> Result<Budget, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "UPDATE budgets
                 SET category = ?1, amount = ?2, period = ?3, start_date = ?4
                 WHERE id = ?5
                 RETURNING {BUDGET_COLUMNS}"
            ))?
            .query_row(
                (
                    new_budget.category,
                    new_budget.amount,
                    new_budget.period,
                    new_budget.start_date,
                    id,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingBudget,
                error => error.into(),
            })
    }

    /// Delete the budget with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingBudget] if `id` does not refer to a valid budget,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM budgets WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            Err(Error::DeleteMissingBudget)
        } else {
            Ok(())
        }
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budgets (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    category TEXT NOT NULL,
                    amount REAL NOT NULL,
                    period TEXT NOT NULL,
                    start_date TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    type ReturnType = Budget;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Budget {
            id: row.get(offset)?,
            category: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            period: row.get(offset + 3)?,
            start_date: row.get(offset + 4)?,
            created_at: row.get(offset + 5)?,
        })
    }
}

#[cfg(test)]
mod sqlite_budget_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, budget::NewBudget, db::initialize, stores::BudgetStore};

    use super::SQLiteBudgetStore;

    fn get_test_store() -> SQLiteBudgetStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteBudgetStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_budget(category: &str, amount: f64) -> NewBudget {
        NewBudget {
            category: category.to_string(),
            amount,
            period: "monthly".to_string(),
            start_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn create_then_get_all_round_trips() {
        let mut store = get_test_store();

        let created = store.create(new_budget("food", 100.0)).unwrap();
        let budgets = store.get_all().unwrap();

        assert_eq!(budgets, vec![created]);
    }

    #[test]
    fn get_all_orders_newest_first() {
        let mut store = get_test_store();
        store.create(new_budget("food", 100.0)).unwrap();
        store.create(new_budget("transport", 50.0)).unwrap();

        let categories: Vec<String> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|budget| budget.category)
            .collect();

        assert_eq!(categories, vec!["transport", "food"]);
    }

    #[test]
    fn replace_overwrites_every_field() {
        let mut store = get_test_store();
        let created = store.create(new_budget("food", 100.0)).unwrap();

        let updated = store
            .replace(
                created.id,
                NewBudget {
                    category: "groceries".to_string(),
                    amount: 150.0,
                    period: "monthly".to_string(),
                    start_date: "2024-02-01".to_string(),
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.category, "groceries");
        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.start_date, "2024-02-01");
    }

    #[test]
    fn replace_missing_budget_fails() {
        let mut store = get_test_store();

        let result = store.replace(42, new_budget("ghost", 1.0));

        assert_eq!(result, Err(Error::UpdateMissingBudget));
    }

    #[test]
    fn delete_missing_budget_fails() {
        let mut store = get_test_store();

        assert_eq!(store.delete(42), Err(Error::DeleteMissingBudget));
    }
}
