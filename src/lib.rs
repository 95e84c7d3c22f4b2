//! Fintrack is a personal finance tracker that serves a JSON API for
//! recording transactions, budgets, and savings goals.
//!
//! On top of the three record types, the API exposes three read-only
//! analytics views: a monthly overview, per-budget spending status, and a
//! six-month income/expense trend. Month membership throughout the
//! analytics layer is a textual prefix match on the stored date string,
//! see the `month` module for details.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod analytics;
mod app_state;
mod budget;
mod database_id;
mod db;
mod endpoints;
mod month;
mod routing;
mod savings_goal;
pub mod stores;
mod transaction;

pub use app_state::AppState;
pub use budget::{Budget, NewBudget};
pub use database_id::DatabaseID;
pub use db::initialize as initialize_db;
pub use routing::build_router;
pub use savings_goal::{NewSavingsGoal, SavingsGoal};
pub use transaction::{NewTransaction, Transaction, TransactionType};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was given a negative amount.
    ///
    /// Amounts are sign-free magnitudes; direction is carried by the
    /// transaction type.
    #[error("transaction amounts must be non-negative, got {0}")]
    NegativeAmount(f64),

    /// The requested resource was not found.
    ///
    /// The client should check that the parameters (e.g., ID) are correct
    /// and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a budget that does not exist
    #[error("tried to update a budget that is not in the database")]
    UpdateMissingBudget,

    /// Tried to delete a budget that does not exist
    #[error("tried to delete a budget that is not in the database")]
    DeleteMissingBudget,

    /// Tried to update a savings goal that does not exist
    #[error("tried to update a savings goal that is not in the database")]
    UpdateMissingSavingsGoal,

    /// Tried to delete a savings goal that does not exist
    #[error("tried to delete a savings goal that is not in the database")]
    DeleteMissingSavingsGoal,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NegativeAmount(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            Error::NotFound
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction
            | Error::UpdateMissingBudget
            | Error::DeleteMissingBudget
            | Error::UpdateMissingSavingsGoal
            | Error::DeleteMissingSavingsGoal => (StatusCode::NOT_FOUND, self.to_string()),
            // SQL errors are not intended to be shown to the client.
            Error::SqlError(error) => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
