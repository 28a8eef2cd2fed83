//! Defines the route handler for the page for deleting expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{
        Expense,
        expenses_page::{COLUMN_HEADINGS, expense_cells},
        get_all_expenses,
    },
    html::{
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        edit_delete_action_links, format_currency, warning_banner,
    },
    navigation::NavBar,
};

/// The state needed for the delete expense page.
#[derive(Debug, Clone)]
pub struct DeleteExpensePageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn delete_expenses_view(expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DELETE_EXPENSE_VIEW).into_html();

    let table_row = |expense: &Expense| {
        let action_links = edit_delete_action_links(
            &format!("{}?id={}", endpoints::EDIT_EXPENSE_VIEW, expense.id),
            &format_endpoint(endpoints::EXPENSE, expense.id),
            &format!(
                "Are you sure you want to delete expense {} of {}? This cannot be undone.",
                expense.id,
                format_currency(expense.amount)
            ),
            "closest tr",
            "delete",
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                (expense_cells(expense))
                td class=(TABLE_CELL_STYLE) { (action_links) }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Delete Expense" }

                @if expenses.is_empty() {
                    (warning_banner("No expenses found."))
                } @else {
                    div class="w-full overflow-x-auto shadow-md rounded"
                    {
                        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    @for heading in COLUMN_HEADINGS {
                                        th scope="col" class=(TABLE_CELL_STYLE) { (heading) }
                                    }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                                }
                            }

                            tbody
                            {
                                @for expense in expenses {
                                    (table_row(expense))
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Delete Expense", &[], &content)
}

/// Renders every expense with a button for deleting it.
pub async fn get_delete_expense_page(
    State(state): State<DeleteExpensePageState>,
) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve expenses for delete page: {error}")
        })?
    };

    Ok(delete_expenses_view(&expenses).into_response())
}
