//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as an out-of-band swap for the `#alert-container`
//! element in the base template, so an endpoint can show an alert no matter
//! which element the htmx request targeted.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A success or error message for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    SuccessSimple { message: String },
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_markup(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::SuccessSimple { message } => (true, message, None),
            Alert::Error { message, details } => (false, message, Some(details)),
        };

        let style = if is_success {
            "flex items-start p-4 mb-4 text-sm rounded-lg shadow text-green-800 \
            bg-green-50 dark:bg-gray-800 dark:text-green-400"
        } else {
            "flex items-start p-4 mb-4 text-sm rounded-lg shadow text-red-800 \
            bg-red-50 dark:bg-gray-800 dark:text-red-400"
        };

        html!(
            div id="alert-container" hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class=(style)
                    data-alert-kind=(if is_success { "success" } else { "error" })
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="ms-4 font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        )
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
