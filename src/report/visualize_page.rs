//! Defines the route handler for the page with the category pie chart.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::get_all_expenses,
    html::{
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, warning_banner,
    },
    navigation::NavBar,
    report::{
        charts::{ReportChart, category_pie_chart, chart_script, chart_view, pie_chart_options},
        distribution::{CategoryShare, category_distribution},
    },
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for the visualize page.
#[derive(Debug, Clone)]
pub struct VisualizePageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for VisualizePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn share_table(shares: &[CategoryShare]) -> Markup {
    html!(
        div class="w-full max-w-3xl overflow-x-auto shadow-md rounded"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Share" }
                    }
                }

                tbody
                {
                    @for share in shares {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (share.category) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(share.amount)) }
                            td class=(TABLE_CELL_STYLE) { (share.label()) }
                        }
                    }
                }
            }
        }
    )
}

fn visualize_view(shares: &[CategoryShare]) -> Result<Markup, Error> {
    let nav_bar = NavBar::new(endpoints::VISUALIZE_VIEW).into_html();
    let options = pie_chart_options(&category_pie_chart(shares))
        .map_err(|error| Error::ChartError(error.to_string()))?;
    let chart = ReportChart {
        id: "category-pie-chart",
        options,
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Expenses by Category" }

            (chart_view(&chart))
            (share_table(shares))
        }
    );

    Ok(base(
        "Visualize Data",
        &[
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            chart_script(&chart),
        ],
        &content,
    ))
}

fn empty_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::VISUALIZE_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            (warning_banner("No expenses found."))
        }
    );

    base("Visualize Data", &[], &content)
}

/// Renders the category pie chart, or a warning if there are no expenses.
pub async fn get_visualize_page(State(state): State<VisualizePageState>) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses for chart: {error}"))?
    };

    if expenses.is_empty() {
        return Ok(empty_view().into_response());
    }

    let shares = category_distribution(&expenses);

    let view = visualize_view(&shares)
        .inspect_err(|error| tracing::error!("Failed to render category chart: {error}"))?;

    Ok(view.into_response())
}

#[cfg(test)]
mod tests {
    use axum::extract::State;

    use crate::{
        report::visualize_page::{VisualizePageState, get_visualize_page},
        test_utils::{
            assert_alert_message, assert_status_ok, assert_valid_html, insert_example_expenses,
            must_create_test_connection, parse_html_document, select_text,
        },
    };

    #[tokio::test]
    async fn shows_warning_without_expenses() {
        let state = VisualizePageState {
            db_connection: must_create_test_connection(),
        };

        let response = get_visualize_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_alert_message(&document, "No expenses found.");
        assert!(select_text(&document, "#category-pie-chart").is_empty());
    }

    #[tokio::test]
    async fn shows_chart_and_shares() {
        let db_connection = must_create_test_connection();
        insert_example_expenses(&db_connection.lock().unwrap());
        let state = VisualizePageState { db_connection };

        let response = get_visualize_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(select_text(&document, "#category-pie-chart").len(), 1);
        assert_eq!(
            select_text(&document, "tbody tr td"),
            vec![
                "Food", "₹100.00", "66.7%", "Travelling", "₹50.00", "33.3%"
            ]
        );
        assert!(
            select_text(&document, "script")
                .iter()
                .any(|script| script.contains("\"percentPrecision\":1")),
            "chart script should round percentages to one decimal place"
        );
    }
}
