//! Defines the core data models and database queries for expenses.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The ID the database assigns to an expense.
pub type ExpenseId = i64;

/// The number of rows changed by an update or delete, zero means no expense had the given ID.
pub type RowsAffected = usize;

/// The note stored for an expense when the user leaves the note empty.
pub const EMPTY_NOTE: &str = "None";

// ============================================================================
// MODELS
// ============================================================================

/// What an expense was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, meals and snacks.
    Food,
    /// Fares, fuel and trips.
    Travelling,
    /// Clothes and other purchases.
    Shopping,
    /// Movies, events and hobbies.
    Entertainment,
    /// Utilities, phone and subscriptions.
    Bills,
    /// Rent for a home or office.
    Rents,
    /// Anything else.
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Travelling,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Rents,
        Category::Other,
    ];

    /// The text shown to users and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travelling => "Travelling",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Rents => "Rents",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// How an expense was paid for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Notes and coins, the default.
    #[default]
    Cash,
    /// A credit card.
    #[serde(rename = "Credit Card")]
    CreditCard,
    /// A debit card.
    #[serde(rename = "Debit Card")]
    DebitCard,
    /// A bank transfer or payment app.
    #[serde(rename = "Online Payment")]
    OnlinePayment,
}

impl PaymentMethod {
    /// Every payment method in display order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::OnlinePayment,
    ];

    /// The text shown to users and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::OnlinePayment => "Online Payment",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| Error::InvalidPaymentMethod(s.to_owned()))
    }
}

impl ToSql for PaymentMethod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PaymentMethod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Money spent on one occasion.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// How much was spent, never negative.
    pub amount: f64,
    /// The day the money was spent.
    pub date: Date,
    /// The time of day the money was spent.
    pub time: Time,
    /// What the money was spent on.
    pub category: Category,
    /// Free text about the expense, [EMPTY_NOTE] when the user gave none.
    pub note: String,
    /// How the expense was paid for.
    pub payment_method: PaymentMethod,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, time: Time, category: Category) -> ExpenseBuilder {
        ExpenseBuilder {
            amount,
            date,
            time,
            category,
            note: EMPTY_NOTE.to_owned(),
            payment_method: PaymentMethod::default(),
        }
    }
}

/// A builder for the values of an [Expense] that has not been saved yet.
///
/// The same builder is used to replace every field of an existing expense.
#[derive(Debug, PartialEq, Clone)]
pub struct ExpenseBuilder {
    /// How much was spent.
    pub amount: f64,
    /// The day the money was spent.
    pub date: Date,
    /// The time of day the money was spent.
    pub time: Time,
    /// What the money was spent on.
    pub category: Category,
    /// Free text about the expense.
    pub note: String,
    /// How the expense was paid for.
    pub payment_method: PaymentMethod,
}

impl ExpenseBuilder {
    /// Set the note for the expense, blank notes are stored as [EMPTY_NOTE].
    pub fn note(mut self, note: &str) -> Self {
        let note = note.trim();

        self.note = if note.is_empty() {
            EMPTY_NOTE.to_owned()
        } else {
            note.to_owned()
        };

        self
    }

    /// Set how the expense was paid for.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Check the values can be saved.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is negative, infinite or NaN.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(())
    }
}

// ============================================================================
// TIME OF DAY
// ============================================================================

const TIME_OF_DAY_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second]");

/// Format a time of day as `HH:MM:SS`, the format used in the database.
pub fn format_time_of_day(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Parse a time of day written as `HH:MM:SS` or `HH:MM`.
///
/// # Errors
/// Returns [Error::InvalidTime] if `text` is in neither format.
pub fn parse_time_of_day(text: &str) -> Result<Time, Error> {
    let text = text.trim();

    let parsed = if text.matches(':').count() == 1 {
        Time::parse(&format!("{text}:00"), TIME_OF_DAY_FORMAT)
    } else {
        Time::parse(text, TIME_OF_DAY_FORMAT)
    };

    parsed.map_err(|_| Error::InvalidTime(text.to_owned()))
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the expenses table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                category TEXT NOT NULL,
                note TEXT DEFAULT 'None',
                payment_method TEXT DEFAULT 'Cash'
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
///
/// Rows written by other programs may hold NULL notes or payment methods,
/// these are read as [EMPTY_NOTE] and [PaymentMethod::Cash].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let time_text: String = row.get(3)?;
    let time = parse_time_of_day(&time_text)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?;
    let category = row.get(4)?;
    let note: Option<String> = row.get(5)?;
    let payment_method: Option<PaymentMethod> = row.get(6)?;

    Ok(Expense {
        id,
        amount,
        date,
        time,
        category,
        note: note.unwrap_or_else(|| EMPTY_NOTE.to_owned()),
        payment_method: payment_method.unwrap_or_default(),
    })
}

/// Create a new expense in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or not a finite number,
/// - or [Error::MissingField] if the database rejected an empty required column,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(builder: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    builder.validate()?;

    let expense = connection
        .prepare(
            "INSERT INTO expenses (amount, date, time, category, note, payment_method)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, date, time, category, note, payment_method",
        )?
        .query_row(
            (
                builder.amount,
                builder.date,
                format_time_of_day(builder.time),
                builder.category,
                builder.note,
                builder.payment_method,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, amount, date, time, category, note, payment_method
             FROM expenses WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve every expense, oldest ID first.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, time, category, note, payment_method
             FROM expenses ORDER BY id ASC",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

// ============================================================================
// TESTS
// ============================================================================
