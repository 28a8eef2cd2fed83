//! Defines the route handler for the page for adding a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{
    AppState, Error, endpoints,
    expense::{
        PaymentMethod,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

fn create_expense_view(now: PrimitiveDateTime) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();
    let spinner = loading_spinner();
    let fields = expense_form_fields(&ExpenseFormDefaults {
        amount: None,
        date: now.date(),
        time: now.time().replace_nanosecond(0).unwrap_or(now.time()),
        category: None,
        note: None,
        payment_method: PaymentMethod::default(),
        autofocus_amount: true,
    });

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                hx-swap="none"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Expense" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Expense"
                }
            }
        }
    };

    base("Add Expense", &[currency_input_styles()], &content)
}

/// The state needed for the add expense page.
#[derive(Debug, Clone)]
pub struct CreateExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for adding an expense, with the date and time set to now.
pub async fn get_create_expense_page(
    State(state): State<CreateExpensePageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let now = OffsetDateTime::now_utc().to_offset(local_offset);

    Ok(create_expense_view(PrimitiveDateTime::new(now.date(), now.time())).into_response())
}

#[cfg(test)]
mod view_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        Error, endpoints,
        expense::create_page::{CreateExpensePageState, get_create_expense_page},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_select_options, assert_status_ok, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    #[tokio::test]
    async fn new_expense_returns_form() {
        let state = CreateExpensePageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_create_expense_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input(&form, "amount", "number", None);
        assert_form_input(&form, "date", "date", None);
        assert_form_input(&form, "time", "time", None);
        assert_select_options(
            &form,
            "category",
            &[
                "Food",
                "Travelling",
                "Shopping",
                "Entertainment",
                "Bills",
                "Rents",
                "Other",
            ],
        );
        assert_select_options(
            &form,
            "payment_method",
            &["Cash", "Credit Card", "Debit Card", "Online Payment"],
        );
        assert_form_submit_button_with_text(&form, "Add Expense");
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = CreateExpensePageState {
            local_timezone: "Not/AZone".to_owned(),
        };

        let result = get_create_expense_page(State(state)).await;

        let error = result.unwrap_err();
        assert_eq!(error, Error::InvalidTimezoneError("Not/AZone".to_owned()));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
