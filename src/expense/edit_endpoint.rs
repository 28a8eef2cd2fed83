//! Defines the endpoint for replacing the values of an existing expense.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, params};

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{
        core::{ExpenseBuilder, ExpenseId, RowsAffected, format_time_of_day},
        form::ExpenseForm,
    },
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for replacing every field of an expense, responds with an alert.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<ExpenseForm>,
) -> Response {
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

    match update_expense(expense_id, builder, &connection) {
        Ok(0) => {
            tracing::warn!("Could not update expense {expense_id}: no expense with that ID");
            Error::UpdateMissingExpense.into_alert_response()
        }
        Ok(_) => Alert::SuccessSimple {
            message: format!("Expense with ID {expense_id} updated successfully!"),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("Could not update expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Replace every column of the expense `id` with the values in `builder`.
///
/// Returns the number of rows changed, which is zero if no expense has the ID `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or not a finite number,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    builder: ExpenseBuilder,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    builder.validate()?;

    connection
        .execute(
            "UPDATE expenses
            SET \
                amount = ?1, \
                date = ?2, \
                time = ?3, \
                category = ?4, \
                note = ?5, \
                payment_method = ?6 \
            WHERE id = ?7;",
            params![
                builder.amount,
                builder.date,
                format_time_of_day(builder.time),
                builder.category,
                builder.note,
                builder.payment_method,
                id,
            ],
        )
        .map_err(Error::from)
}


#[cfg(test)]
mod endpoint_tests {
    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        expense::{
            Category, PaymentMethod,
            edit_endpoint::{EditExpenseState, edit_expense_endpoint},
            form::ExpenseForm,
            get_expense,
        },
        test_utils::{
            assert_alert_message, assert_status_ok, insert_example_expenses,
            must_create_test_connection, parse_html_fragment,
        },
    };

    fn form() -> ExpenseForm {
        ExpenseForm {
            amount: 75.25,
            date: date!(2024 - 03 - 03),
            time: "10:10".to_owned(),
            category: Category::Entertainment,
            note: "cinema".to_owned(),
            payment_method: PaymentMethod::DebitCard,
        }
    }

    #[tokio::test]
    async fn can_update_expense() {
        let db_connection = must_create_test_connection();
        let expenses = insert_example_expenses(&db_connection.lock().unwrap());
        let id = expenses[1].id;
        let state = EditExpenseState {
            db_connection: db_connection.clone(),
        };

        let response = edit_expense_endpoint(State(state), Path(id), Form(form())).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_alert_message(&html, &format!("Expense with ID {id} updated successfully!"));

        let updated = get_expense(id, &db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.amount, 75.25);
        assert_eq!(updated.category, Category::Entertainment);
        assert_eq!(updated.note, "cinema");
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let state = EditExpenseState {
            db_connection: must_create_test_connection(),
        };

        let response = edit_expense_endpoint(State(state), Path(42), Form(form())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_alert_message(&html, "Could not update expense");
    }
}
