//! Expenses: the data model, the database queries and the pages and endpoints
//! for adding, viewing, editing, deleting and exporting them.

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod delete_page;
mod edit_endpoint;
mod edit_page;
mod expenses_page;
mod export_endpoint;
mod form;
mod table;

pub use core::{
    Category, Expense, ExpenseBuilder, ExpenseId, PaymentMethod, RowsAffected, create_expense,
    create_expense_table, get_all_expenses, get_expense,
};
#[cfg(test)]
pub use core::count_expenses;
pub use create_endpoint::create_expense_endpoint;
pub use create_page::get_create_expense_page;
pub use delete_endpoint::{delete_expense, delete_expense_endpoint};
pub use delete_page::get_delete_expense_page;
pub use edit_endpoint::{edit_expense_endpoint, update_expense};
pub use edit_page::get_edit_expense_page;
pub use expenses_page::get_expenses_page;
pub use export_endpoint::export_expenses_endpoint;
pub use table::{ExpenseFilter, ExpenseTable, get_expense_table};
