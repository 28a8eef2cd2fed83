#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::macros::{date, time};

use crate::{
    db::initialize,
    expense::{Category, Expense, PaymentMethod, create_expense},
};

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
    assert_select_options, must_get_form,
};
pub(crate) use html::{
    assert_alert_message, assert_valid_html, parse_html_document, parse_html_fragment,
    select_text,
};
pub(crate) use http::{assert_content_type, assert_redirect, assert_status_ok, get_header};

pub(crate) fn must_create_test_connection() -> Arc<Mutex<Connection>> {
    let connection =
        Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
    initialize(&connection).expect("Could not initialise database");

    Arc::new(Mutex::new(connection))
}

/// Add the two expenses used across the page tests:
/// 100 on food paid in cash and 50 on travel paid by credit card.
#[track_caller]
pub(crate) fn insert_example_expenses(connection: &Connection) -> Vec<Expense> {
    vec![
        create_expense(
            Expense::build(100.0, date!(2024 - 01 - 01), time!(12:30), Category::Food)
                .note("lunch"),
            connection,
        )
        .expect("Could not create food expense"),
        create_expense(
            Expense::build(50.0, date!(2024 - 01 - 02), time!(08:05:10), Category::Travelling)
                .payment_method(PaymentMethod::CreditCard),
            connection,
        )
        .expect("Could not create travel expense"),
    ]
}
