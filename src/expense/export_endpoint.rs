//! Defines the endpoint for downloading expenses as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::table::{ExpenseFilter, FilterQuery, get_expense_table},
};

/// The name the browser saves the export as.
pub const EXPORT_FILE_NAME: &str = "expenses.csv";

/// The state needed to export expenses.
#[derive(Debug, Clone)]
pub struct ExportExpensesState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the expenses matching the query string filters as a CSV
/// attachment.
pub async fn export_expenses_endpoint(
    State(state): State<ExportExpensesState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let filter = ExpenseFilter::try_from(query)?;

    let table = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_expense_table(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses for export: {error}"))?
    };

    let csv = table
        .filter(&filter)
        .to_csv()
        .inspect_err(|error| tracing::error!("Failed to export expenses: {error}"))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
