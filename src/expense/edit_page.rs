//! Defines the route handler for the page for choosing and editing an expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{
        Expense, ExpenseId,
        form::{ExpenseFormDefaults, expense_form_fields},
        get_all_expenses,
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        currency_input_styles, loading_spinner, warning_banner,
    },
    navigation::NavBar,
};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The expense to edit, the first expense if not given.
#[derive(Debug, Default, Deserialize)]
pub struct EditExpenseQuery {
    pub id: Option<ExpenseId>,
}

fn expense_picker(expenses: &[Expense], selected_id: ExpenseId) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::EDIT_EXPENSE_VIEW)
            class="w-full"
        {
            label for="id" class=(FORM_LABEL_STYLE) { "Select Expense ID" }

            select
                name="id"
                id="id"
                onchange="this.form.submit()"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for expense in expenses {
                    option value=(expense.id) selected[expense.id == selected_id] { (expense.id) }
                }
            }
        }
    )
}

fn edit_expense_view(expenses: &[Expense], expense: &Expense) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_EXPENSE_VIEW).into_html();
    let spinner = loading_spinner();
    let update_route = format_endpoint(endpoints::EXPENSE, expense.id);
    let fields = expense_form_fields(&ExpenseFormDefaults::from_expense(expense));

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Expense" }

                (expense_picker(expenses, expense.id))

                form
                    hx-put=(update_route)
                    hx-target-error="#alert-container"
                    hx-swap="none"
                    class="w-full space-y-4 md:space-y-6"
                {
                    (fields)

                    button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span
                            id="indicator"
                            class="inline htmx-indicator"
                        {
                            (spinner)
                        }
                        " Update Expense"
                    }
                }
            }
        }
    };

    base("Edit Expense", &[currency_input_styles()], &content)
}

fn empty_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_EXPENSE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (warning_banner("No expenses found."))
        }
    };

    base("Edit Expense", &[], &content)
}

/// Renders the form for editing the expense in the query string, or the first expense.
///
/// # Errors
/// Returns [Error::NotFound] if the requested expense does not exist.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Query(query): Query<EditExpenseQuery>,
) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve expenses for edit page: {error}")
        })?
    };

    let Some(first_expense) = expenses.first() else {
        return Ok(empty_view().into_response());
    };

    let expense = match query.id {
        Some(id) => expenses
            .iter()
            .find(|expense| expense.id == id)
            .ok_or(Error::NotFound)?,
        None => first_expense,
    };

    Ok(edit_expense_view(&expenses, expense).into_response())
}
