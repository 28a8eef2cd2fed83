//! The form for adding and editing expenses, shared by the add and edit pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Time};

use crate::{
    Error,
    expense::core::{
        Category, EMPTY_NOTE, Expense, ExpenseBuilder, PaymentMethod, format_time_of_day,
        parse_time_of_day,
    },
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The form data for creating or editing an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The amount in rupees.
    pub amount: f64,
    pub date: Date,
    /// The time of day as `HH:MM` or `HH:MM:SS`.
    pub time: String,
    pub category: Category,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl ExpenseForm {
    /// Convert the form into an [ExpenseBuilder].
    ///
    /// # Errors
    /// Returns [Error::InvalidTime] if the time cannot be parsed.
    pub fn into_builder(self) -> Result<ExpenseBuilder, Error> {
        let time = parse_time_of_day(&self.time)?;

        Ok(Expense::build(self.amount, self.date, time, self.category)
            .note(&self.note)
            .payment_method(self.payment_method))
    }
}

/// The values the expense form fields start with.
///
/// The add page starts from the current date and time, the edit page from an
/// existing expense.
pub struct ExpenseFormDefaults<'a> {
    pub amount: Option<f64>,
    pub date: Date,
    pub time: Time,
    pub category: Option<Category>,
    pub note: Option<&'a str>,
    pub payment_method: PaymentMethod,
    pub autofocus_amount: bool,
}

impl<'a> ExpenseFormDefaults<'a> {
    /// Prefill the form with the values of an existing expense.
    pub fn from_expense(expense: &'a Expense) -> Self {
        Self {
            amount: Some(expense.amount),
            date: expense.date,
            time: expense.time,
            category: Some(expense.category),
            note: (expense.note != EMPTY_NOTE).then_some(expense.note.as_str()),
            payment_method: expense.payment_method,
            autofocus_amount: false,
        }
    }
}

/// The labelled inputs for every expense field, without the surrounding form or submit button.
pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    min="0"
                    required
                    value=[amount_str.as_deref()]
                    autofocus[defaults.autofocus_amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="time"
                class=(FORM_LABEL_STYLE)
            {
                "Time"
            }

            input
                name="time"
                id="time"
                type="time"
                step="1"
                value=(format_time_of_day(defaults.time))
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    option
                        value=(category)
                        selected[Some(category) == defaults.category]
                    {
                        (category)
                    }
                }
            }
        }

        div
        {
            label
                for="note"
                class=(FORM_LABEL_STYLE)
            {
                "Note"
            }

            textarea
                name="note"
                id="note"
                rows="3"
                placeholder="Anything worth remembering about this expense"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (defaults.note.unwrap_or_default())
            }
        }

        div
        {
            label
                for="payment_method"
                class=(FORM_LABEL_STYLE)
            {
                "Payment Method"
            }

            select
                name="payment_method"
                id="payment_method"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for payment_method in PaymentMethod::ALL {
                    option
                        value=(payment_method)
                        selected[payment_method == defaults.payment_method]
                    {
                        (payment_method)
                    }
                }
            }
        }
    }
}
