//! Implements a struct that holds the state of the JSON API server.

use std::marker::{Send, Sync};

use axum::extract::FromRef;

use crate::stores::{BudgetStore, SavingsGoalStore, TransactionStore};

/// The state of the JSON API server.
///
/// Generic over the store implementations so that tests can substitute an
/// in-memory or mocked store for the SQLite-backed ones.
#[derive(Debug, Clone)]
pub struct AppState<B, G, T>
where
    B: BudgetStore + Send + Sync,
    G: SavingsGoalStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [budgets](crate::budget::Budget).
    pub budget_store: B,
    /// The store for managing [savings goals](crate::savings_goal::SavingsGoal).
    pub savings_goal_store: G,
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<B, G, T> AppState<B, G, T>
where
    B: BudgetStore + Send + Sync,
    G: SavingsGoalStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState] from the given stores.
    pub fn new(budget_store: B, savings_goal_store: G, transaction_store: T) -> Self {
        Self {
            budget_store,
            savings_goal_store,
            transaction_store,
        }
    }
}

/// The state needed for the transaction route handlers and the analytics
/// views that only read transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<B, G, T> FromRef<AppState<B, G, T>> for TransactionState<T>
where
    B: BudgetStore + Send + Sync,
    G: SavingsGoalStore + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, G, T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed for the budget route handlers.
#[derive(Debug, Clone)]
pub struct BudgetState<B>
where
    B: BudgetStore + Send + Sync,
{
    /// The store for managing [budgets](crate::budget::Budget).
    pub budget_store: B,
}

impl<B, G, T> FromRef<AppState<B, G, T>> for BudgetState<B>
where
    B: BudgetStore + Clone + Send + Sync,
    G: SavingsGoalStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<B, G, T>) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
        }
    }
}

/// The state needed for the savings goal route handlers.
#[derive(Debug, Clone)]
pub struct SavingsGoalState<G>
where
    G: SavingsGoalStore + Send + Sync,
{
    /// The store for managing [savings goals](crate::savings_goal::SavingsGoal).
    pub savings_goal_store: G,
}

impl<B, G, T> FromRef<AppState<B, G, T>> for SavingsGoalState<G>
where
    B: BudgetStore + Send + Sync,
    G: SavingsGoalStore + Clone + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<B, G, T>) -> Self {
        Self {
            savings_goal_store: state.savings_goal_store.clone(),
        }
    }
}

/// The state needed for the budget status view, which joins budgets with
/// transaction spending.
#[derive(Debug, Clone)]
pub struct BudgetStatusState<B, T>
where
    B: BudgetStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [budgets](crate::budget::Budget).
    pub budget_store: B,
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<B, G, T> FromRef<AppState<B, G, T>> for BudgetStatusState<B, T>
where
    B: BudgetStore + Clone + Send + Sync,
    G: SavingsGoalStore + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, G, T>) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
            transaction_store: state.transaction_store.clone(),
        }
    }
}
