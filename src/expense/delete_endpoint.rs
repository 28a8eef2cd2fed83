//! Defines the endpoint for deleting an expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::core::{ExpenseId, RowsAffected},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, responds with an alert.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(rows_affected) if rows_affected != 0 => Alert::SuccessSimple {
            message: "Expense deleted successfully!".to_owned(),
        }
        .into_response(),
        Ok(_) => Error::DeleteMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Delete the expense `id`.
///
/// Returns the number of rows deleted, which is zero if no expense has the ID `id`.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])
        .map_err(|err| err.into())
}

#[cfg(test)]
mod delete_expense_tests {
    use rusqlite::Connection;
    use time::macros::{date, time};

    use crate::{
        Error, initialize_db,
        expense::{
            Category, Expense, create_expense, delete_endpoint::delete_expense, get_all_expenses,
            get_expense,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_db(&conn).unwrap();
        conn
    }

    #[test]
    fn deletes_only_that_expense() {
        let conn = get_test_connection();
        let first = create_expense(
            Expense::build(10.0, date!(2024 - 01 - 01), time!(08:00), Category::Food),
            &conn,
        )
        .unwrap();
        let second = create_expense(
            Expense::build(20.0, date!(2024 - 01 - 02), time!(09:00), Category::Shopping),
            &conn,
        )
        .unwrap();

        let rows = delete_expense(first.id, &conn).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(get_expense(first.id, &conn), Err(Error::NotFound));
        assert_eq!(get_all_expenses(&conn).unwrap(), vec![second]);
    }

    #[test]
    fn missing_id_changes_nothing() {
        let conn = get_test_connection();
        let expense = create_expense(
            Expense::build(10.0, date!(2024 - 01 - 01), time!(08:00), Category::Food),
            &conn,
        )
        .unwrap();

        let rows = delete_expense(expense.id + 1, &conn).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(get_all_expenses(&conn).unwrap(), vec![expense]);
    }
}
