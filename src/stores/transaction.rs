//! Defines the transaction store trait and its query types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseID,
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// Handles the storage, retrieval, and monthly aggregation of transactions.
pub trait TransactionStore {
    /// Retrieve the transactions matching `filter`, newest date first with
    /// insertion order as the tiebreak.
    fn get_filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error>;

    /// Create a new transaction in the store and return it with its
    /// assigned ID.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Overwrite every field of the transaction with `id`.
    ///
    /// Implementers should return [Error::UpdateMissingTransaction] if `id`
    /// does not refer to a stored transaction.
    fn replace(
        &mut self,
        id: DatabaseID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction with `id`.
    ///
    /// Implementers should return [Error::DeleteMissingTransaction] if `id`
    /// does not refer to a stored transaction.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;

    /// The income and expense sums for the month labeled `month` ("YYYY-MM").
    ///
    /// A transaction counts toward a month if and only if its date string
    /// starts with the label, so malformed dates count toward no month.
    fn month_totals(&self, month: &str) -> Result<MonthTotals, Error>;

    /// The expense sums per category for the month labeled `month`,
    /// largest sum first.
    fn expense_totals_by_category(&self, month: &str) -> Result<Vec<CategoryTotal>, Error>;

    /// The total expenses in `category` during the month labeled `month`.
    fn category_expense_total(&self, category: &str, month: &str) -> Result<f64, Error>;

    /// The `limit` most recent transactions across all time, newest date
    /// first.
    fn most_recent(&self, limit: u64) -> Result<Vec<Transaction>, Error>;
}

/// Optional predicates for listing transactions.
///
/// All present filters are combined with logical AND; absent filters are
/// omitted from the query entirely rather than treated as wildcards.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct TransactionFilter {
    /// Only include transactions with exactly this category.
    pub category: Option<String>,
    /// Only include transactions of this type.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Inclusive lower bound on the date string.
    pub start_date: Option<String>,
    /// Inclusive upper bound on the date string.
    pub end_date: Option<String>,
}

/// The income and expense sums for a single month.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct MonthTotals {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expenses: f64,
}

/// The sum of expense amounts for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// Sum of expense amounts in the category.
    pub amount: f64,
}
