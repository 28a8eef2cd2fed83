//! How spending is split across categories.

use crate::expense::{Category, Expense};

/// One category's slice of the total spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// The category the amounts were spent on.
    pub category: Category,
    /// The sum of the amounts in this category.
    pub amount: f64,
    /// `amount` as a percentage of the total across all categories.
    pub percentage: f64,
}

impl CategoryShare {
    /// The percentage with one decimal place, e.g. "66.7%".
    pub fn label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Group `expenses` by category and work out each category's share of the total.
///
/// Only categories with at least one expense are included, in the order the
/// categories are declared. If every amount is zero, each category gets an
/// equal share.
pub fn category_distribution(expenses: &[Expense]) -> Vec<CategoryShare> {
    let mut totals: Vec<(Category, f64)> = Vec::new();

    for category in Category::ALL {
        let mut present = false;
        let mut amount = 0.0;

        for expense in expenses.iter().filter(|expense| expense.category == category) {
            present = true;
            amount += expense.amount;
        }

        if present {
            totals.push((category, amount));
        }
    }

    let grand_total: f64 = totals.iter().map(|(_, amount)| amount).sum();
    let equal_share = 100.0 / totals.len() as f64;

    totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percentage: if grand_total > 0.0 {
                amount / grand_total * 100.0
            } else {
                equal_share
            },
        })
        .collect()
}
