//! Defines the route handler for the page that lists expenses with filters and a summary.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{
        Expense, ExpenseTable,
        core::format_time_of_day,
        table::{ALL_OPTION, ExpenseFilter, FilterQuery, get_expense_table},
    },
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_count,
        format_currency, warning_banner,
    },
    navigation::NavBar,
    report::ExpenseSummary,
};

/// The headings for the columns of [ExpenseTable::COLUMNS], in the same order.
pub(super) const COLUMN_HEADINGS: [&str; 7] = [
    "ID",
    "Amount",
    "Date",
    "Time",
    "Category",
    "Note",
    "Payment Method",
];

/// The table cells for one expense, one per column.
pub(super) fn expense_cells(expense: &Expense) -> Markup {
    html!(
        td class=(TABLE_CELL_STYLE) { (expense.id) }
        td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
        td class=(TABLE_CELL_STYLE) { (expense.date) }
        td class=(TABLE_CELL_STYLE) { (format_time_of_day(expense.time)) }
        td class=(TABLE_CELL_STYLE) { (expense.category) }
        td class=(TABLE_CELL_STYLE) { (expense.note) }
        td class=(TABLE_CELL_STYLE) { (expense.payment_method) }
    )
}

fn expense_table_view(table: &ExpenseTable) -> Markup {
    html!(
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
                    }
                }

                tbody
                {
                    @for expense in &table.rows {
                        tr class=(TABLE_ROW_STYLE) { (expense_cells(expense)) }
                    }
                }
            }
        }
    )
}

fn filter_select<T: ToString>(name: &str, label: &str, options: &[T], selected: Option<&T>) -> Markup {
    let selected = selected.map(ToString::to_string);

    html!(
        div class="flex-1"
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select
                name=(name)
                id=(name)
                onchange="this.form.submit()"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(ALL_OPTION) selected[selected.is_none()] { (ALL_OPTION) }

                @for item in options {
                    @let value = item.to_string();
                    option
                        value=(value)
                        selected[selected.as_deref() == Some(value.as_str())]
                    {
                        (value)
                    }
                }
            }
        }
    )
}

/// Add the active filter value to `options` if no row has it, so the select
/// still shows what is being filtered on.
fn with_selected<T: PartialEq + Copy>(mut options: Vec<T>, selected: Option<T>) -> Vec<T> {
    if let Some(selected) = selected.filter(|selected| !options.contains(selected)) {
        options.push(selected);
    }

    options
}

fn filter_form(table: &ExpenseTable, filter: &ExpenseFilter) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            class="w-full flex flex-col sm:flex-row gap-4 items-end"
        {
            (filter_select(
                "category",
                "Filter by Category",
                &with_selected(table.categories(), filter.category),
                filter.category.as_ref(),
            ))
            (filter_select(
                "payment_method",
                "Filter by Payment Method",
                &with_selected(table.payment_methods(), filter.payment_method),
                filter.payment_method.as_ref(),
            ))

            button type="submit" class=(LINK_STYLE) { "Apply" }
        }
    )
}

fn summary_view(summary: &ExpenseSummary) -> Markup {
    html!(
        section id="summary" class="w-full"
        {
            h2 class="text-lg font-semibold mb-2" { "Summary" }

            dl class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                div
                {
                    dt class="text-sm" { "Total Expenses" }
                    dd class="text-xl font-bold" { (format_currency(summary.total)) }
                }
                div
                {
                    dt class="text-sm" { "Average Expense" }
                    dd class="text-xl font-bold" { (format_currency(summary.average)) }
                }
                div
                {
                    dt class="text-sm" { "Number of Expenses" }
                    dd class="text-xl font-bold" { (format_count(summary.count)) }
                }
            }
        }
    )
}

fn export_url(filter: &ExpenseFilter) -> String {
    let query = filter.to_query_string();

    if query.is_empty() {
        endpoints::EXPORT_EXPENSES.to_owned()
    } else {
        format!("{}?{query}", endpoints::EXPORT_EXPENSES)
    }
}

fn expenses_view(table: &ExpenseTable, filter: &ExpenseFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let filtered = table.filter(filter);
    let summary = ExpenseSummary::from_expenses(&filtered.rows);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Expenses" }

                @if table.is_empty() {
                    (warning_banner("No expenses found, start adding expenses!"))
                } @else {
                    (filter_form(table, filter))

                    @if filtered.is_empty() {
                        (warning_banner("No expenses match the selected filters."))
                    } @else {
                        (expense_table_view(&filtered))
                    }

                    @if let Some(summary) = summary {
                        (summary_view(&summary))
                    }

                    a
                        id="download-csv"
                        href=(export_url(filter))
                        download="expenses.csv"
                        class=(LINK_STYLE)
                    {
                        "Download Data as CSV"
                    }
                }
            }
        }
    );

    base("Expenses", &[], &content)
}

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the expenses that match the filters in the query string, along
/// with their summary.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
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
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?
    };

    Ok(expenses_view(&table, &filter).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::Selector;

    use crate::{
        endpoints,
        expense::{
            expenses_page::{ExpensesPageState, get_expenses_page},
            table::FilterQuery,
        },
        test_utils::{
            assert_alert_message, assert_status_ok, assert_valid_html, insert_example_expenses,
            must_create_test_connection, parse_html_document, select_text,
        },
    };

    fn query(category: Option<&str>, payment_method: Option<&str>) -> FilterQuery {
        FilterQuery {
            category: category.map(str::to_owned),
            payment_method: payment_method.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn shows_warning_without_expenses() {
        let state = ExpensesPageState {
            db_connection: must_create_test_connection(),
        };

        let response = get_expenses_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_alert_message(&document, "No expenses found, start adding expenses!");
        assert!(select_text(&document, "#summary").is_empty());
    }

    #[tokio::test]
    async fn shows_table_and_summary() {
        let db_connection = must_create_test_connection();
        insert_example_expenses(&db_connection.lock().unwrap());
        let state = ExpensesPageState { db_connection };

        let response = get_expenses_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(
            select_text(&document, "tbody tr td:first-child"),
            vec!["1", "2"]
        );
        assert_eq!(
            select_text(&document, "#summary dd"),
            vec!["₹150.00", "₹75.00", "2"]
        );
        assert_eq!(
            select_text(&document, "select#category option"),
            vec!["All", "Food", "Travelling"]
        );
        assert_eq!(
            select_text(&document, "select#payment_method option"),
            vec!["All", "Cash", "Credit Card"]
        );

        let link = document
            .select(&Selector::parse("#download-csv").unwrap())
            .next()
            .expect("missing download link");
        assert_eq!(link.value().attr("href"), Some(endpoints::EXPORT_EXPENSES));
    }

    #[tokio::test]
    async fn filters_rows_and_summary() {
        let db_connection = must_create_test_connection();
        insert_example_expenses(&db_connection.lock().unwrap());
        let state = ExpensesPageState { db_connection };

        let response = get_expenses_page(State(state), Query(query(Some("Travelling"), Some("All"))))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        assert_eq!(select_text(&document, "tbody tr td:first-child"), vec!["2"]);
        assert_eq!(
            select_text(&document, "#summary dd"),
            vec!["₹50.00", "₹50.00", "1"]
        );
        assert_eq!(
            select_text(&document, "select#category option[selected]"),
            vec!["Travelling"]
        );

        let link = document
            .select(&Selector::parse("#download-csv").unwrap())
            .next()
            .expect("missing download link");
        assert_eq!(
            link.value().attr("href"),
            Some("/api/expenses.csv?category=Travelling")
        );
    }

    #[tokio::test]
    async fn suppresses_summary_when_filter_matches_nothing() {
        let db_connection = must_create_test_connection();
        insert_example_expenses(&db_connection.lock().unwrap());
        let state = ExpensesPageState { db_connection };

        let response = get_expenses_page(
            State(state),
            Query(query(Some("Food"), Some("Credit Card"))),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        assert_alert_message(&document, "No expenses match the selected filters.");
        assert!(select_text(&document, "tbody tr").is_empty());
        assert!(select_text(&document, "#summary").is_empty());
    }

    #[tokio::test]
    async fn keeps_filter_without_matching_rows_selected() {
        let db_connection = must_create_test_connection();
        insert_example_expenses(&db_connection.lock().unwrap());
        let state = ExpensesPageState { db_connection };

        let response = get_expenses_page(State(state), Query(query(Some("Bills"), None)))
            .await
            .unwrap();

        let document = parse_html_document(response).await;
        assert_alert_message(&document, "No expenses match the selected filters.");
        assert_eq!(
            select_text(&document, "select#category option"),
            vec!["All", "Food", "Travelling", "Bills"]
        );
        assert_eq!(
            select_text(&document, "select#category option[selected]"),
            vec!["Bills"]
        );
        assert_eq!(
            select_text(&document, "select#payment_method option[selected]"),
            vec!["All"]
        );
    }

    #[tokio::test]
    async fn invalid_filter_is_bad_request() {
        let state = ExpensesPageState {
            db_connection: must_create_test_connection(),
        };

        let result = get_expenses_page(State(state), Query(query(Some("Groceries"), None))).await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
