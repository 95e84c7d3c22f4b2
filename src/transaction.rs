//! Transaction management for the finance tracker.
//!
//! This module contains the [Transaction] model, the request body type for
//! creating and replacing transactions, and the route handlers for the
//! transaction endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    Error,
    app_state::TransactionState,
    database_id::DatabaseID,
    stores::{TransactionFilter, TransactionStore},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brings money in or sends it out.
///
/// Transaction amounts are stored as sign-free magnitudes; the direction of
/// the money flow is carried entirely by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. a supermarket shop.
    Expense,
}

impl TransactionType {
    /// The string stored in the database for this transaction type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("invalid transaction type {other:?}").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always non-negative.
    pub amount: f64,
    /// The category label for the transaction, free text.
    pub category: String,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    ///
    /// Kept as the raw date string the client sent ("YYYY-MM-DD" by
    /// convention): the analytics views match months by textual prefix, so
    /// the stored text must be preserved byte-for-byte.
    pub date: String,
    /// When the record was inserted, assigned by the store.
    pub created_at: String,
}

/// The request body for creating or replacing a transaction.
///
/// Replacing overwrites every field of the stored record, so the same body
/// type serves both POST and PUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, must be non-negative.
    pub amount: f64,
    /// The category label for the transaction.
    pub category: String,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened, as a "YYYY-MM-DD" date string.
    pub date: String,
}

impl NewTransaction {
    /// Check the fields that serde cannot enforce on its own.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if the amount is negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount < 0.0 {
            return Err(Error::NegativeAmount(self.amount));
        }

        Ok(())
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// A route handler for listing transactions with optional filters.
///
/// All supplied filters are combined with AND; absent filters do not
/// constrain the result at all. Transactions are returned newest date
/// first.
pub async fn get_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    state.transaction_store.get_filtered(&filter).map(Json)
}

/// A route handler for creating a new transaction.
///
/// Responds with status 201 and the created record, including its assigned
/// ID.
pub async fn create_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Send + Sync,
{
    new_transaction.validate()?;

    state
        .transaction_store
        .create(new_transaction)
        .map(|transaction| (StatusCode::CREATED, Json(transaction)))
}

/// A route handler for replacing every field of an existing transaction.
///
/// This function will return the status code 404 if `transaction_id` does
/// not refer to a stored transaction.
pub async fn update_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    Path(transaction_id): Path<DatabaseID>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Send + Sync,
{
    new_transaction.validate()?;

    state
        .transaction_store
        .replace(transaction_id, new_transaction)
        .map(Json)
}

/// A route handler for deleting a transaction by its database ID.
///
/// This function will return the status code 404 if `transaction_id` does
/// not refer to a stored transaction.
pub async fn delete_transaction_endpoint<T>(
    State(mut state): State<TransactionState<T>>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Json<serde_json::Value>, Error>
where
    T: TransactionStore + Send + Sync,
{
    state.transaction_store.delete(transaction_id)?;

    Ok(Json(json!({ "message": "transaction deleted" })))
}
