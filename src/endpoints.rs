//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to replace or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to replace or delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to list and create savings goals.
pub const SAVINGS_GOALS: &str = "/api/savings-goals";
/// The route to replace or delete a single savings goal.
pub const SAVINGS_GOAL: &str = "/api/savings-goals/{goal_id}";
/// The route for the monthly overview.
pub const ANALYTICS_OVERVIEW: &str = "/api/analytics/overview";
/// The route for the per-budget spending status.
pub const ANALYTICS_BUDGET_STATUS: &str = "/api/analytics/budget-status";
/// The route for the six-month income/expense trend.
pub const ANALYTICS_TRENDS: &str = "/api/analytics/trends";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/budgets/{budget_id}',
/// '{budget_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::BUDGETS);
        assert_endpoint_is_valid_uri(endpoints::BUDGET);
        assert_endpoint_is_valid_uri(endpoints::SAVINGS_GOALS);
        assert_endpoint_is_valid_uri(endpoints::SAVINGS_GOAL);
        assert_endpoint_is_valid_uri(endpoints::ANALYTICS_OVERVIEW);
        assert_endpoint_is_valid_uri(endpoints::ANALYTICS_BUDGET_STATUS);
        assert_endpoint_is_valid_uri(endpoints::ANALYTICS_TRENDS);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
