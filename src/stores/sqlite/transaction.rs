//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    Error,
    database_id::DatabaseID,
    db::{CreateTable, MapRow},
    stores::{
        TransactionStore,
        transaction::{CategoryTotal, MonthTotals, TransactionFilter},
    },
    transaction::{NewTransaction, Transaction},
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const TRANSACTION_COLUMNS: &str = "id, description, amount, category, type, date, created_at";

impl TransactionStore for SQLiteTransactionStore {
    /// Query for transactions in the database.
    ///
    /// Each filter that is present contributes one AND-ed predicate;
    /// filters that are absent are left out of the query entirely. Results
    /// are ordered by date descending with the row ID as a stable
    /// insertion-order tiebreak.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn get_filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts =
            vec![format!("SELECT {TRANSACTION_COLUMNS} FROM transactions")];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(category) = &filter.category {
            where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(category.clone()));
        }

        if let Some(transaction_type) = filter.transaction_type {
            where_clause_parts.push(format!("type = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(transaction_type.as_str().to_string()));
        }

        if let Some(start_date) = &filter.start_date {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(start_date.clone()));
        }

        if let Some(end_date) = &filter.end_date {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(end_date.clone()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        query_string_parts.push("ORDER BY date DESC, id ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO transactions (description, amount, category, type, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    new_transaction.description,
                    new_transaction.amount,
                    new_transaction.category,
                    new_transaction.transaction_type,
                    new_transaction.date,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Overwrite every field of the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn replace(
        &mut self,
        id: DatabaseID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "UPDATE transactions
                 SET description = ?1, amount = ?2, category = ?3, type = ?4, date = ?5
                 WHERE id = ?6
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    new_transaction.description,
                    new_transaction.amount,
                    new_transaction.category,
                    new_transaction.transaction_type,
                    new_transaction.date,
                    id,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => error.into(),
            })
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM transactions WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            Err(Error::DeleteMissingTransaction)
        } else {
            Ok(())
        }
    }

    /// The income and expense sums for the month labeled `month`.
    ///
    /// Month membership is `date LIKE '<month>%'`, a textual prefix match.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn month_totals(&self, month: &str) -> Result<MonthTotals, Error> {
        let totals = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT
                    SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END),
                    SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END)
                 FROM transactions
                 WHERE date LIKE ?1",
            )?
            .query_row((format!("{month}%"),), |row| {
                Ok(MonthTotals {
                    income: row.get::<_, Option<f64>>(0)?.unwrap_or(0.0),
                    expenses: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                })
            })?;

        Ok(totals)
    }

    /// The expense sums per category for the month labeled `month`,
    /// largest sum first.
    ///
    /// Ties between categories with equal sums are left to SQLite's group
    /// ordering.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn expense_totals_by_category(&self, month: &str) -> Result<Vec<CategoryTotal>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT category, SUM(amount) AS total
                 FROM transactions
                 WHERE type = 'expense' AND date LIKE ?1
                 GROUP BY category
                 ORDER BY total DESC",
            )?
            .query_map((format!("{month}%"),), |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    amount: row.get(1)?,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(Error::SqlError))
            .collect()
    }

    /// The total expenses in `category` during the month labeled `month`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn category_expense_total(&self, category: &str, month: &str) -> Result<f64, Error> {
        let total = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT SUM(amount)
                 FROM transactions
                 WHERE category = ?1 AND type = 'expense' AND date LIKE ?2",
            )?
            .query_row((category, format!("{month}%")), |row| {
                row.get::<_, Option<f64>>(0)
            })?
            .unwrap_or(0.0);

        Ok(total)
    }

    /// The `limit` most recent transactions across all time.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn most_recent(&self, limit: u64) -> Result<Vec<Transaction>, Error> {
        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY date DESC, id ASC LIMIT {limit}"
        );

        self.connection
            .lock()
            .unwrap()
            .prepare(&query)?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    amount REAL NOT NULL,
                    category TEXT NOT NULL,
                    type TEXT NOT NULL,
                    date TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            description: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            category: row.get(offset + 3)?,
            transaction_type: row.get(offset + 4)?,
            date: row.get(offset + 5)?,
            created_at: row.get(offset + 6)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        stores::{TransactionFilter, TransactionStore},
        transaction::{NewTransaction, TransactionType},
    };

    use super::SQLiteTransactionStore;

    fn get_test_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_transaction(
        description: &str,
        amount: f64,
        category: &str,
        transaction_type: TransactionType,
        date: &str,
    ) -> NewTransaction {
        NewTransaction {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            transaction_type,
            date: date.to_string(),
        }
    }

    #[test]
    fn create_assigns_monotonic_ids() {
        let mut store = get_test_store();

        let first = store
            .create(new_transaction(
                "coffee",
                4.5,
                "food",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();
        let second = store
            .create(new_transaction(
                "lunch",
                12.0,
                "food",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn get_filtered_applies_all_predicates() {
        let mut store = get_test_store();
        store
            .create(new_transaction(
                "coffee",
                4.5,
                "food",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "refund",
                4.5,
                "food",
                TransactionType::Income,
                "2024-03-06",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "bus",
                2.5,
                "transport",
                TransactionType::Expense,
                "2024-03-07",
            ))
            .unwrap();

        let filter = TransactionFilter {
            category: Some("food".to_string()),
            transaction_type: Some(TransactionType::Expense),
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-31".to_string()),
        };
        let results = store.get_filtered(&filter).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].description, "coffee");
    }

    #[test]
    fn get_filtered_ties_broken_by_insertion_order() {
        let mut store = get_test_store();
        store
            .create(new_transaction(
                "first",
                1.0,
                "misc",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "second",
                2.0,
                "misc",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();

        let results = store.get_filtered(&TransactionFilter::default()).unwrap();

        assert_eq!(results[0].description, "first");
        assert_eq!(results[1].description, "second");
    }

    #[test]
    fn replace_missing_transaction_fails() {
        let mut store = get_test_store();

        let result = store.replace(
            42,
            new_transaction("ghost", 1.0, "misc", TransactionType::Expense, "2024-03-05"),
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let mut store = get_test_store();

        assert_eq!(store.delete(42), Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn month_totals_sums_by_type() {
        let mut store = get_test_store();
        store
            .create(new_transaction(
                "salary",
                1000.0,
                "work",
                TransactionType::Income,
                "2024-03-01",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "coffee",
                4.5,
                "food",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "rent",
                800.0,
                "housing",
                TransactionType::Expense,
                "2024-04-01",
            ))
            .unwrap();

        let totals = store.month_totals("2024-03").unwrap();

        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expenses, 4.5);
    }

    #[test]
    fn month_totals_empty_month_is_zero() {
        let store = get_test_store();

        let totals = store.month_totals("2024-03").unwrap();

        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expenses, 0.0);
    }

    #[test]
    fn month_totals_ignores_malformed_dates() {
        let mut store = get_test_store();
        store
            .create(new_transaction(
                "coffee",
                4.5,
                "food",
                TransactionType::Expense,
                "03/05/2024",
            ))
            .unwrap();

        assert_eq!(store.month_totals("2024-03").unwrap().expenses, 0.0);
    }

    #[test]
    fn expense_totals_by_category_sorts_largest_first() {
        let mut store = get_test_store();
        store
            .create(new_transaction(
                "coffee",
                4.5,
                "food",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "groceries",
                60.0,
                "food",
                TransactionType::Expense,
                "2024-03-10",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "bus",
                2.5,
                "transport",
                TransactionType::Expense,
                "2024-03-07",
            ))
            .unwrap();

        let breakdown = store.expense_totals_by_category("2024-03").unwrap();

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "food");
        assert_eq!(breakdown[0].amount, 64.5);
        assert_eq!(breakdown[1].category, "transport");
        assert_eq!(breakdown[1].amount, 2.5);
    }

    #[test]
    fn category_expense_total_ignores_income_and_other_months() {
        let mut store = get_test_store();
        store
            .create(new_transaction(
                "coffee",
                4.5,
                "food",
                TransactionType::Expense,
                "2024-03-05",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "refund",
                10.0,
                "food",
                TransactionType::Income,
                "2024-03-06",
            ))
            .unwrap();
        store
            .create(new_transaction(
                "groceries",
                60.0,
                "food",
                TransactionType::Expense,
                "2024-04-01",
            ))
            .unwrap();

        assert_eq!(store.category_expense_total("food", "2024-03").unwrap(), 4.5);
    }

    #[test]
    fn most_recent_limits_and_orders() {
        let mut store = get_test_store();
        for day in 1..=7 {
            store
                .create(new_transaction(
                    &format!("day {day}"),
                    1.0,
                    "misc",
                    TransactionType::Expense,
                    &format!("2024-03-{day:02}"),
                ))
                .unwrap();
        }

        let recent = store.most_recent(5).unwrap();

        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].date, "2024-03-07");
        assert_eq!(recent[4].date, "2024-03-03");
    }
}
