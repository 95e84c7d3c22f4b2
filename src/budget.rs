//! Budget management for the finance tracker.
//!
//! A budget is a monthly spending cap for a category label. The label is
//! not required to match any transaction category; budgets with no
//! matching expenses simply report zero spending in the budget status
//! view (see the `analytics` module).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Error, app_state::BudgetState, database_id::DatabaseID, stores::BudgetStore};

/// A spending cap for a category of expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: DatabaseID,
    /// The category label the cap applies to.
    pub category: String,
    /// The maximum amount to spend in the category per period.
    pub amount: f64,
    /// The budgeting period, stored as free text. Only monthly semantics
    /// are implemented; the analytics views always use the current
    /// calendar month regardless of this value.
    pub period: String,
    /// The date the budget takes effect, as a "YYYY-MM-DD" date string.
    pub start_date: String,
    /// When the record was inserted, assigned by the store.
    pub created_at: String,
}

/// The request body for creating or replacing a budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    /// The category label the cap applies to.
    pub category: String,
    /// The maximum amount to spend in the category per period.
    pub amount: f64,
    /// The budgeting period, e.g. "monthly".
    pub period: String,
    /// The date the budget takes effect.
    pub start_date: String,
}

/// A route handler for listing all budgets, newest first.
pub async fn get_budgets_endpoint<B>(
    State(state): State<BudgetState<B>>,
) -> Result<Json<Vec<Budget>>, Error>
where
    B: BudgetStore + Send + Sync,
{
    state.budget_store.get_all().map(Json)
}

/// A route handler for creating a new budget.
///
/// Responds with status 201 and the created record, including its assigned
/// ID.
pub async fn create_budget_endpoint<B>(
    State(mut state): State<BudgetState<B>>,
    Json(new_budget): Json<NewBudget>,
) -> Result<impl IntoResponse, Error>
where
    B: BudgetStore + Send + Sync,
{
    state
        .budget_store
        .create(new_budget)
        .map(|budget| (StatusCode::CREATED, Json(budget)))
}

/// A route handler for replacing every field of an existing budget.
///
/// This function will return the status code 404 if `budget_id` does not
/// refer to a stored budget.
pub async fn update_budget_endpoint<B>(
    State(mut state): State<BudgetState<B>>,
    Path(budget_id): Path<DatabaseID>,
    Json(new_budget): Json<NewBudget>,
) -> Result<Json<Budget>, Error>
where
    B: BudgetStore + Send + Sync,
{
    state.budget_store.replace(budget_id, new_budget).map(Json)
}

/// A route handler for deleting a budget by its database ID.
///
/// This function will return the status code 404 if `budget_id` does not
/// refer to a stored budget. Deleting a budget never affects transactions.
pub async fn delete_budget_endpoint<B>(
    State(mut state): State<BudgetState<B>>,
    Path(budget_id): Path<DatabaseID>,
) -> Result<Json<serde_json::Value>, Error>
where
    B: BudgetStore + Send + Sync,
{
    state.budget_store.delete(budget_id)?;

    Ok(Json(json!({ "message": "budget deleted" })))
}
