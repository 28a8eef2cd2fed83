//! Defines the endpoint for adding a new expense.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{core::create_expense, form::ExpenseForm},
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for adding a new expense, responds with an alert.
///
/// An amount of zero counts as a missing amount.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    if form.amount == 0.0 {
        return Error::MissingField("amount".to_owned()).into_alert_response();
    }

    let builder = match form.into_builder() {
        Ok(builder) => builder,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_expense(builder, &connection) {
        Ok(expense) => {
            tracing::debug!("Created expense {}", expense.id);
            Alert::SuccessSimple {
                message: "Expense added successfully!".to_owned(),
            }
            .into_response()
        }
        Err(error) => {
            tracing::error!("Could not create expense: {error}");
            error.into_alert_response()
        }
    }
}
