//! Defines the route handler for the analysis page, which has no content beyond its heading yet.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

fn analysis_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYSIS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "Expense Analysis" }
        }
    );

    base("Analysis", &[], &content)
}

/// Renders the analysis page.
pub async fn get_analysis_page() -> Markup {
    analysis_view()
}
