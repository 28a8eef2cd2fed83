//! The labeled table view of the expenses and the filters that narrow it down.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::core::{Category, Expense, PaymentMethod, format_time_of_day, get_all_expenses},
};

/// The value of a filter select that matches every expense.
pub const ALL_OPTION: &str = "All";

/// Every expense as rows under the column names of the expenses table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseTable {
    /// The expenses, one per row.
    pub rows: Vec<Expense>,
}

impl ExpenseTable {
    /// The column names in the order they are displayed and exported.
    pub const COLUMNS: [&str; 7] = [
        "id",
        "amount",
        "date",
        "time",
        "category",
        "note",
        "payment_method",
    ];

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows that match every part of `filter`, in their original order.
    pub fn filter(&self, filter: &ExpenseFilter) -> ExpenseTable {
        let rows = self
            .rows
            .iter()
            .filter(|expense| filter.matches(expense))
            .cloned()
            .collect();

        ExpenseTable { rows }
    }

    /// The categories present in the table, in the order they first appear.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();

        for expense in &self.rows {
            if !categories.contains(&expense.category) {
                categories.push(expense.category);
            }
        }

        categories
    }

    /// The payment methods present in the table, in the order they first appear.
    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        let mut payment_methods = Vec::new();

        for expense in &self.rows {
            if !payment_methods.contains(&expense.payment_method) {
                payment_methods.push(expense.payment_method);
            }
        }

        payment_methods
    }

    /// Write the table as CSV text with a header row and no index column.
    ///
    /// # Errors
    /// Returns [Error::CsvError] if a row cannot be written.
    pub fn to_csv(&self) -> Result<String, Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(Self::COLUMNS)
            .map_err(|error| Error::CsvError(error.to_string()))?;

        for expense in &self.rows {
            writer
                .write_record([
                    expense.id.to_string(),
                    format!("{:.2}", expense.amount),
                    expense.date.to_string(),
                    format_time_of_day(expense.time),
                    expense.category.to_string(),
                    expense.note.clone(),
                    expense.payment_method.to_string(),
                ])
                .map_err(|error| Error::CsvError(error.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|error| Error::CsvError(error.to_string()))?;

        String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
    }
}

/// Get every expense as an [ExpenseTable], ordered by ID.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_expense_table(connection: &Connection) -> Result<ExpenseTable, Error> {
    Ok(ExpenseTable {
        rows: get_all_expenses(connection)?,
    })
}

/// Narrows the expense table down to one category and/or payment method.
///
/// `None` matches every expense.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpenseFilter {
    /// Keep only expenses in this category.
    pub category: Option<Category>,
    /// Keep only expenses paid for this way.
    pub payment_method: Option<PaymentMethod>,
}

impl ExpenseFilter {
    /// Whether `expense` passes the filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category
            .is_none_or(|category| category == expense.category)
            && self
                .payment_method
                .is_none_or(|payment_method| payment_method == expense.payment_method)
    }

    /// The query string that reproduces this filter, empty when nothing is filtered.
    pub fn to_query_string(&self) -> String {
        let query = FilterQuery {
            category: self.category.map(|category| category.to_string()),
            payment_method: self
                .payment_method
                .map(|payment_method| payment_method.to_string()),
        };

        serde_urlencoded::to_string(&query).unwrap_or_else(|error| {
            tracing::error!("Could not encode filter {self:?}: {error}");
            String::new()
        })
    }
}

/// The filter as it arrives in a query string.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl TryFrom<FilterQuery> for ExpenseFilter {
    type Error = Error;

    /// Parse the filter, where an empty value or "All" means no filter.
    fn try_from(query: FilterQuery) -> Result<Self, Self::Error> {
        fn selected(value: Option<String>) -> Option<String> {
            value.filter(|value| !value.is_empty() && value != ALL_OPTION)
        }

        Ok(ExpenseFilter {
            category: selected(query.category)
                .map(|category| category.parse())
                .transpose()?,
            payment_method: selected(query.payment_method)
                .map(|payment_method| payment_method.parse())
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use crate::{
        Error,
        expense::{Category, Expense, ExpenseTable, PaymentMethod},
    };

    use super::{ExpenseFilter, FilterQuery};

    fn expense(id: i64, amount: f64, category: Category, payment_method: PaymentMethod) -> Expense {
        Expense {
            id,
            amount,
            date: date!(2024 - 01 - 01),
            time: time!(12:00),
            category,
            note: "None".to_owned(),
            payment_method,
        }
    }

    fn test_table() -> ExpenseTable {
        ExpenseTable {
            rows: vec![
                expense(1, 100.0, Category::Food, PaymentMethod::Cash),
                expense(2, 50.0, Category::Travelling, PaymentMethod::CreditCard),
                expense(3, 25.0, Category::Food, PaymentMethod::CreditCard),
            ],
        }
    }

    #[test]
    fn empty_filter_keeps_every_row() {
        let table = test_table();

        assert_eq!(table.filter(&ExpenseFilter::default()), table);
    }

    #[test]
    fn filters_by_category_and_payment_method() {
        let table = test_table();

        let by_category = table.filter(&ExpenseFilter {
            category: Some(Category::Food),
            payment_method: None,
        });
        let by_both = table.filter(&ExpenseFilter {
            category: Some(Category::Food),
            payment_method: Some(PaymentMethod::CreditCard),
        });

        assert_eq!(
            by_category.rows.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(by_both.rows.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn filter_with_no_matches_is_empty() {
        let table = test_table();

        let filtered = table.filter(&ExpenseFilter {
            category: Some(Category::Bills),
            payment_method: None,
        });

        assert!(filtered.is_empty());
    }

    #[test]
    fn options_are_distinct_in_first_seen_order() {
        let table = test_table();

        assert_eq!(
            table.categories(),
            vec![Category::Food, Category::Travelling]
        );
        assert_eq!(
            table.payment_methods(),
            vec![PaymentMethod::Cash, PaymentMethod::CreditCard]
        );
    }

    #[test]
    fn all_and_empty_mean_no_filter() {
        let filter = ExpenseFilter::try_from(FilterQuery {
            category: Some("All".to_owned()),
            payment_method: Some("".to_owned()),
        });

        assert_eq!(filter, Ok(ExpenseFilter::default()));
    }

    #[test]
    fn parses_filter_values() {
        let filter = ExpenseFilter::try_from(FilterQuery {
            category: Some("Food".to_owned()),
            payment_method: Some("Credit Card".to_owned()),
        });

        assert_eq!(
            filter,
            Ok(ExpenseFilter {
                category: Some(Category::Food),
                payment_method: Some(PaymentMethod::CreditCard),
            })
        );
    }

    #[test]
    fn rejects_unknown_filter_values() {
        let filter = ExpenseFilter::try_from(FilterQuery {
            category: Some("Groceries".to_owned()),
            payment_method: None,
        });

        assert_eq!(filter, Err(Error::InvalidCategory("Groceries".to_owned())));
    }

    #[test]
    fn query_string_round_trips_through_filter() {
        let filter = ExpenseFilter {
            category: Some(Category::Food),
            payment_method: Some(PaymentMethod::OnlinePayment),
        };

        let query: FilterQuery = serde_html_form::from_str(&filter.to_query_string()).unwrap();

        assert_eq!(ExpenseFilter::try_from(query), Ok(filter));
        assert_eq!(ExpenseFilter::default().to_query_string(), "");
    }

    #[test]
    fn csv_has_header_and_one_line_per_row() {
        let table = ExpenseTable {
            rows: vec![
                Expense {
                    note: "lunch, with friends".to_owned(),
                    ..expense(1, 100.0, Category::Food, PaymentMethod::Cash)
                },
                expense(2, 50.5, Category::Travelling, PaymentMethod::CreditCard),
            ],
        };

        let csv = table.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "id,amount,date,time,category,note,payment_method",
                "1,100.00,2024-01-01,12:00:00,Food,\"lunch, with friends\",Cash",
                "2,50.50,2024-01-01,12:00:00,Travelling,None,Credit Card",
            ]
        );
    }

    #[test]
    fn csv_of_empty_table_is_only_header() {
        let csv = ExpenseTable::default().to_csv().unwrap();

        assert_eq!(csv, "id,amount,date,time,category,note,payment_method\n");
    }
}
