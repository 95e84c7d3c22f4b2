//! Contains traits and implementations for objects that store the domain models.
//!
//! The traits are the seam between the route handlers and the persistence
//! layer: handlers are generic over them, so tests can substitute an
//! in-memory store for the SQLite-backed one.

mod budget;
mod savings_goal;
mod transaction;

pub mod sqlite;

pub use budget::BudgetStore;
pub use savings_goal::SavingsGoalStore;
pub use transaction::{CategoryTotal, MonthTotals, TransactionFilter, TransactionStore};
