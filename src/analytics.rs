//! The analytics views: monthly overview, budget status, and trends.
//!
//! Month membership everywhere in this module is a textual prefix match on
//! the stored date string, and the trend series steps back in fixed 30-day
//! strides (see the `month` module). Downstream clients depend on both
//! behaviours, so neither may be replaced with calendar-aware arithmetic.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    app_state::{BudgetStatusState, TransactionState},
    budget::Budget,
    month::{month_label, trailing_month_labels},
    stores::{BudgetStore, CategoryTotal, TransactionStore},
    transaction::Transaction,
};

/// The number of transactions the overview reports as recent.
const RECENT_TRANSACTION_COUNT: u64 = 5;

/// The percentage of a budget spent at which its status becomes "warning".
const WARNING_THRESHOLD: f64 = 80.0;

/// The percentage of a budget spent at which its status becomes "over".
const OVER_THRESHOLD: f64 = 100.0;

// ============================================================================
// VIEW MODELS
// ============================================================================

/// The monthly overview response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyOverview {
    /// The income/expense totals for the current month.
    pub overview: OverviewTotals,
    /// The expense sums per category for the current month, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
    /// The most recent transactions across all time, not restricted to the
    /// current month.
    pub recent_transactions: Vec<Transaction>,
}

/// The totals section of the monthly overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewTotals {
    /// Sum of income amounts in the current month.
    pub total_income: f64,
    /// Sum of expense amounts in the current month.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub net_income: f64,
    /// The "YYYY-MM" label of the current month.
    pub current_month: String,
}

/// One budget's standing against the current month's spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// The budget's category label.
    pub category: String,
    /// The budget cap.
    pub budget_amount: f64,
    /// Expenses in the budget's category this month.
    pub spent_amount: f64,
    /// The cap minus spending. Negative when the budget is blown.
    pub remaining_amount: f64,
    /// Spending as a percentage of the cap, zero for a non-positive cap.
    pub percentage_used: f64,
    /// Which band the spending falls in.
    pub status: BudgetHealth,
}

/// The budget status band. Bands are inclusive at their lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    /// Less than 80% of the budget spent.
    Under,
    /// At least 80% but less than 100% spent.
    Warning,
    /// At least 100% spent.
    Over,
}

/// One entry in the six-month trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The "YYYY-MM" label of the entry's month.
    pub month: String,
    /// Sum of income amounts in the month.
    pub income: f64,
    /// Sum of expense amounts in the month.
    pub expenses: f64,
    /// Income minus expenses.
    pub net: f64,
}

// ============================================================================
// COMPUTATIONS
// ============================================================================

/// Compute the monthly overview for the month containing `today`.
pub fn monthly_overview<T>(store: &T, today: Date) -> Result<MonthlyOverview, Error>
where
    T: TransactionStore,
{
    let current_month = month_label(today);

    let totals = store.month_totals(&current_month)?;
    let category_breakdown = store.expense_totals_by_category(&current_month)?;
    let recent_transactions = store.most_recent(RECENT_TRANSACTION_COUNT)?;

    Ok(MonthlyOverview {
        overview: OverviewTotals {
            total_income: totals.income,
            total_expenses: totals.expenses,
            net_income: totals.income - totals.expenses,
            current_month,
        },
        category_breakdown,
        recent_transactions,
    })
}

/// Compute the status of every budget against spending in the month
/// containing `today`.
///
/// Budgets are reported in their own listing order, never sorted by status
/// or percentage. A budget's `period` and `start_date` are not consulted;
/// the window is always the current calendar month.
pub fn budget_statuses<B, T>(
    budget_store: &B,
    transaction_store: &T,
    today: Date,
) -> Result<Vec<BudgetStatus>, Error>
where
    B: BudgetStore,
    T: TransactionStore,
{
    let current_month = month_label(today);

    budget_store
        .get_all()?
        .into_iter()
        .map(|budget| {
            let spent_amount =
                transaction_store.category_expense_total(&budget.category, &current_month)?;

            Ok(status_for(budget, spent_amount))
        })
        .collect()
}

/// Derive a single [BudgetStatus] from a budget and the amount spent
/// against it this month.
fn status_for(budget: Budget, spent_amount: f64) -> BudgetStatus {
    // A non-positive cap would divide by zero; such budgets always read as
    // 0% used.
    let percentage_used = if budget.amount > 0.0 {
        spent_amount / budget.amount * 100.0
    } else {
        0.0
    };

    let status = if percentage_used >= OVER_THRESHOLD {
        BudgetHealth::Over
    } else if percentage_used >= WARNING_THRESHOLD {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Under
    };

    BudgetStatus {
        category: budget.category,
        budget_amount: budget.amount,
        spent_amount,
        remaining_amount: budget.amount - spent_amount,
        percentage_used,
        status,
    }
}

/// Compute the trend series ending at the month containing `today`.
///
/// Always returns exactly six entries, most recent first.
pub fn trends<T>(store: &T, today: Date) -> Result<Vec<TrendPoint>, Error>
where
    T: TransactionStore,
{
    trailing_month_labels(today)
        .into_iter()
        .map(|month| {
            let totals = store.month_totals(&month)?;

            Ok(TrendPoint {
                month,
                income: totals.income,
                expenses: totals.expenses,
                net: totals.income - totals.expenses,
            })
        })
        .collect()
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// A route handler for the monthly overview of the month containing today.
pub async fn get_overview_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<MonthlyOverview>, Error>
where
    T: TransactionStore + Send + Sync,
{
    monthly_overview(&state.transaction_store, OffsetDateTime::now_utc().date()).map(Json)
}

/// A route handler for the status of every budget against this month's
/// spending.
pub async fn get_budget_status_endpoint<B, T>(
    State(state): State<BudgetStatusState<B, T>>,
) -> Result<Json<Vec<BudgetStatus>>, Error>
where
    B: BudgetStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    budget_statuses(
        &state.budget_store,
        &state.transaction_store,
        OffsetDateTime::now_utc().date(),
    )
    .map(Json)
}

/// A route handler for the six-month income/expense trend series.
pub async fn get_trends_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<Vec<TrendPoint>>, Error>
where
    T: TransactionStore + Send + Sync,
{
    trends(&state.transaction_store, OffsetDateTime::now_utc().date()).map(Json)
}
