//! Savings goal management for the finance tracker.
//!
//! A savings goal tracks progress toward a target amount. No invariant is
//! enforced between the current and target amounts; the current amount may
//! exceed the target.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Error, app_state::SavingsGoalState, database_id::DatabaseID, stores::SavingsGoalStore};

/// A named savings target, e.g. "Emergency fund".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// The ID of the savings goal.
    pub id: DatabaseID,
    /// A name describing what is being saved for.
    pub name: String,
    /// The amount to save toward.
    pub target_amount: f64,
    /// The amount saved so far.
    pub current_amount: f64,
    /// The date to reach the target by, if any.
    pub target_date: Option<String>,
    /// When the record was inserted, assigned by the store.
    pub created_at: String,
}

/// The request body for creating or replacing a savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavingsGoal {
    /// A name describing what is being saved for.
    pub name: String,
    /// The amount to save toward.
    pub target_amount: f64,
    /// The amount saved so far. Defaults to zero when omitted.
    #[serde(default)]
    pub current_amount: f64,
    /// The date to reach the target by, if any.
    #[serde(default)]
    pub target_date: Option<String>,
}

/// A route handler for listing all savings goals, newest first.
pub async fn get_savings_goals_endpoint<G>(
    State(state): State<SavingsGoalState<G>>,
) -> Result<Json<Vec<SavingsGoal>>, Error>
where
    G: SavingsGoalStore + Send + Sync,
{
    state.savings_goal_store.get_all().map(Json)
}

/// A route handler for creating a new savings goal.
///
/// Responds with status 201 and the created record, including its assigned
/// ID.
pub async fn create_savings_goal_endpoint<G>(
    State(mut state): State<SavingsGoalState<G>>,
    Json(new_goal): Json<NewSavingsGoal>,
) -> Result<impl IntoResponse, Error>
where
    G: SavingsGoalStore + Send + Sync,
{
    state
        .savings_goal_store
        .create(new_goal)
        .map(|goal| (StatusCode::CREATED, Json(goal)))
}

/// A route handler for replacing every field of an existing savings goal.
///
/// This function will return the status code 404 if `goal_id` does not
/// refer to a stored savings goal.
pub async fn update_savings_goal_endpoint<G>(
    State(mut state): State<SavingsGoalState<G>>,
    Path(goal_id): Path<DatabaseID>,
    Json(new_goal): Json<NewSavingsGoal>,
) -> Result<Json<SavingsGoal>, Error>
where
    G: SavingsGoalStore + Send + Sync,
{
    state.savings_goal_store.replace(goal_id, new_goal).map(Json)
}

/// A route handler for deleting a savings goal by its database ID.
///
/// This function will return the status code 404 if `goal_id` does not
/// refer to a stored savings goal.
pub async fn delete_savings_goal_endpoint<G>(
    State(mut state): State<SavingsGoalState<G>>,
    Path(goal_id): Path<DatabaseID>,
) -> Result<Json<serde_json::Value>, Error>
where
    G: SavingsGoalStore + Send + Sync,
{
    state.savings_goal_store.delete(goal_id)?;

    Ok(Json(json!({ "message": "savings goal deleted" })))
}
