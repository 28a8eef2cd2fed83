//! Total, average and count of a set of expenses.

use crate::expense::Expense;

/// Aggregate statistics over a non-empty set of expenses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseSummary {
    /// The sum of the amounts.
    pub total: f64,
    /// The total divided by the count.
    pub average: f64,
    /// How many expenses were summarised.
    pub count: usize,
}

impl ExpenseSummary {
    /// Summarise `expenses`, or `None` if there are no expenses to summarise.
    pub fn from_expenses(expenses: &[Expense]) -> Option<Self> {
        if expenses.is_empty() {
            return None;
        }

        let count = expenses.len();
        let total: f64 = expenses.iter().map(|expense| expense.amount).sum();

        Some(Self {
            total,
            average: total / count as f64,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use crate::expense::{Category, Expense, PaymentMethod};

    use super::ExpenseSummary;

    fn expense(amount: f64, category: Category) -> Expense {
        Expense {
            id: 1,
            amount,
            date: date!(2024 - 01 - 01),
            time: time!(12:00),
            category,
            note: "None".to_owned(),
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn summarises_expenses() {
        let expenses = [
            expense(100.0, Category::Food),
            expense(50.0, Category::Travelling),
        ];

        let summary = ExpenseSummary::from_expenses(&expenses);

        assert_eq!(
            summary,
            Some(ExpenseSummary {
                total: 150.0,
                average: 75.0,
                count: 2,
            })
        );
    }

    #[test]
    fn single_expense_is_its_own_average() {
        let summary = ExpenseSummary::from_expenses(&[expense(12.5, Category::Bills)]).unwrap();

        assert_eq!(summary.total, 12.5);
        assert_eq!(summary.average, 12.5);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn no_expenses_gives_no_summary() {
        assert_eq!(ExpenseSummary::from_expenses(&[]), None);
    }
}
