//! Defines the budget store trait.

use crate::{
    Error,
    budget::{Budget, NewBudget},
    database_id::DatabaseID,
};

/// Handles the storage and retrieval of budgets.
pub trait BudgetStore {
    /// Retrieve all budgets, newest first.
    fn get_all(&self) -> Result<Vec<Budget>, Error>;

    /// Create a new budget in the store and return it with its assigned ID.
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Overwrite every field of the budget with `id`.
    ///
    /// Implementers should return [Error::UpdateMissingBudget] if `id` does
    /// not refer to a stored budget.
    fn replace(&mut self, id: DatabaseID, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Delete the budget with `id`.
    ///
    /// Implementers should return [Error::DeleteMissingBudget] if `id` does
    /// not refer to a stored budget.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
