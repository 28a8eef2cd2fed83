//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}', use [format_endpoint].

/// The root route which redirects to the page for adding an expense.
pub const ROOT: &str = "/";
/// The page for adding a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page listing all expenses with filters and a summary.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for choosing and editing an expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/edit";
/// The page for deleting expenses.
pub const DELETE_EXPENSE_VIEW: &str = "/expenses/delete";
/// The page reserved for expense analysis.
pub const ANALYSIS_VIEW: &str = "/analysis";
/// The page with the category pie chart.
pub const VISUALIZE_VIEW: &str = "/visualize";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for creating expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route for downloading expenses as a CSV file.
pub const EXPORT_EXPENSES: &str = "/api/expenses.csv";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
