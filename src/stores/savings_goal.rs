//! Defines the savings goal store trait.

use crate::{
    Error,
    database_id::DatabaseID,
    savings_goal::{NewSavingsGoal, SavingsGoal},
};

/// Handles the storage and retrieval of savings goals.
pub trait SavingsGoalStore {
    /// Retrieve all savings goals, newest first.
    fn get_all(&self) -> Result<Vec<SavingsGoal>, Error>;

    /// Create a new savings goal in the store and return it with its
    /// assigned ID.
    fn create(&mut self, new_goal: NewSavingsGoal) -> Result<SavingsGoal, Error>;

    /// Overwrite every field of the savings goal with `id`.
    ///
    /// Implementers should return [Error::UpdateMissingSavingsGoal] if `id`
    /// does not refer to a stored savings goal.
    fn replace(&mut self, id: DatabaseID, new_goal: NewSavingsGoal) -> Result<SavingsGoal, Error>;

    /// Delete the savings goal with `id`.
    ///
    /// Implementers should return [Error::DeleteMissingSavingsGoal] if `id`
    /// does not refer to a stored savings goal.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
