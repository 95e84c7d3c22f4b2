//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::{
    AppState,
    analytics::{get_budget_status_endpoint, get_overview_endpoint, get_trends_endpoint},
    budget::{
        create_budget_endpoint, delete_budget_endpoint, get_budgets_endpoint,
        update_budget_endpoint,
    },
    endpoints,
    savings_goal::{
        create_savings_goal_endpoint, delete_savings_goal_endpoint, get_savings_goals_endpoint,
        update_savings_goal_endpoint,
    },
    stores::{BudgetStore, SavingsGoalStore, TransactionStore},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<B, G, T>(state: AppState<B, G, T>) -> Router
where
    B: BudgetStore + Clone + Send + Sync + 'static,
    G: SavingsGoalStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            delete(delete_transaction_endpoint::<T>),
        )
        .route(
            endpoints::BUDGETS,
            get(get_budgets_endpoint::<B>).post(create_budget_endpoint::<B>),
        )
        .route(endpoints::BUDGET, put(update_budget_endpoint::<B>))
        .route(endpoints::BUDGET, delete(delete_budget_endpoint::<B>))
        .route(
            endpoints::SAVINGS_GOALS,
            get(get_savings_goals_endpoint::<G>).post(create_savings_goal_endpoint::<G>),
        )
        .route(
            endpoints::SAVINGS_GOAL,
            put(update_savings_goal_endpoint::<G>),
        )
        .route(
            endpoints::SAVINGS_GOAL,
            delete(delete_savings_goal_endpoint::<G>),
        )
        .route(
            endpoints::ANALYTICS_OVERVIEW,
            get(get_overview_endpoint::<T>),
        )
        .route(
            endpoints::ANALYTICS_BUDGET_STATUS,
            get(get_budget_status_endpoint::<B, T>),
        )
        .route(endpoints::ANALYTICS_TRENDS, get(get_trends_endpoint::<T>))
        .with_state(state)
}
