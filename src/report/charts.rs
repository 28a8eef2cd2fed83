//! The category pie chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};
use serde_json::Value;

use crate::{html::HeadElement, report::distribution::CategoryShare};

/// The slice colours, used in order.
pub const PIE_PALETTE: [&str; 7] = [
    "#FFC0CB", "#FF69B4", "#FF0000", "#FFA500", "#FFFF00", "#008000", "#0000FF",
];

/// The number of decimal places ECharts shows for pie slice percentages.
const PERCENT_PRECISION: u8 = 1;

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a chart.
pub(super) fn chart_view(chart: &ReportChart) -> Markup {
    html!(
        section
            id="charts"
            class="w-full max-w-3xl mx-auto mb-4"
        {
            div
                id=(chart.id)
                class="min-h-[420px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Generates JavaScript initialization code for a chart.
///
/// Creates a script that initializes an ECharts instance with dark mode support
/// and responsive resizing.
pub(super) fn chart_script(chart: &ReportChart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart.id, chart.options
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// The ECharts options for a pie chart as JSON, with slice percentages shown
/// to [PERCENT_PRECISION] decimal places, e.g. "Food: 66.7%".
///
/// charming has no setting for the pie percentage precision, so it is added
/// to each series after serializing the chart.
///
/// # Errors
/// Returns an error if the chart cannot be serialized.
pub(super) fn pie_chart_options(chart: &Chart) -> Result<String, serde_json::Error> {
    let mut options = serde_json::to_value(chart)?;

    if let Some(series) = options.get_mut("series").and_then(Value::as_array_mut) {
        for pie in series.iter_mut().filter_map(Value::as_object_mut) {
            pie.insert("percentPrecision".to_owned(), Value::from(PERCENT_PRECISION));
        }
    }

    serde_json::to_string(&options)
}

/// A pie chart with one slice per category, labelled with its percentage.
pub fn category_pie_chart(shares: &[CategoryShare]) -> Chart {
    let data: Vec<(f64, &str)> = shares
        .iter()
        .map(|share| (share.amount, share.category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .left("center"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter("{b}: ₹{c} ({d}%)"),
        )
        .legend(Legend::new().bottom("1%"))
        .color(PIE_PALETTE.into_iter().map(Color::from).collect())
        .series(
            Pie::new()
                .name("Expenses")
                .radius("60%")
                .label(Label::new().show(true).formatter("{b}: {d}%"))
                .data(data),
        )
}
