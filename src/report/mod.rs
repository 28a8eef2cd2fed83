//! Reporting over the stored expenses: summary statistics, the category
//! distribution and the pages that display them.

mod analysis_page;
mod charts;
mod distribution;
mod summary;
mod visualize_page;

pub use analysis_page::get_analysis_page;
pub use charts::category_pie_chart;
pub use distribution::{CategoryShare, category_distribution};
pub use summary::ExpenseSummary;
pub use visualize_page::get_visualize_page;
