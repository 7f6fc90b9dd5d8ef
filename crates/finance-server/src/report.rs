//! Terminal rendering of the dashboard (markdown table, summary, bar chart, CSV)

use anyhow::{Context, Result};
use csv::Writer;
use finance_core::format::currency_cell;
use finance_core::present::empty_table_message;
use finance_core::{Chart, Dashboard, Dataset, ExpensePolicy, Presenter, Schema, SummaryBox, canonical_key};
use shared::CONFIG;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::upstream::Upstream;

/// Width of the longest bar in characters
const BAR_WIDTH: usize = 32;

/// Keeps the latest frame of each kind and renders them as text
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    boxes: Vec<SummaryBox>,
    chart: Option<Chart>,
    error: Option<String>,
}

impl Presenter for TerminalPresenter {
    fn render_table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        self.headers = headers.to_vec();
        self.rows = rows.to_vec();
        self.error = None;
    }

    fn render_summary_boxes(&mut self, boxes: &[SummaryBox]) {
        self.boxes = boxes.to_vec();
    }

    fn render_chart(&mut self, chart: &Chart) {
        self.chart = Some(chart.clone());
    }

    fn render_error(&mut self, message: &str) {
        self.headers.clear();
        self.rows.clear();
        self.error = Some(message.to_string());
    }
}

impl TerminalPresenter {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn table(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        let mut table = builder.build();
        table.with(Style::markdown());
        table.to_string()
    }

    pub fn summary(&self) -> String {
        self.boxes
            .iter()
            .map(|b| format!("{}: {}", b.label, b.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One horizontal bar per year and series, scaled to the largest magnitude
    pub fn chart(&self) -> String {
        let Some(chart) = &self.chart else {
            return String::new();
        };
        let max = chart
            .series
            .iter()
            .flat_map(|s| s.data.iter())
            .fold(0.0f64, |acc, v| acc.max(v.abs()));

        let label_width = chart
            .series
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (i, year) in chart.labels.iter().enumerate() {
            for series in &chart.series {
                let value = series.data.get(i).copied().unwrap_or(0.0);
                let length = if max > 0.0 {
                    (value.abs() / max * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                let glyph = if value < 0.0 { "░" } else { "█" };
                lines.push(format!(
                    "{year} {:<label_width$} {:<BAR_WIDTH$} {}",
                    series.label,
                    glyph.repeat(length),
                    currency_cell(value, chart.values_visible),
                ));
            }
        }
        lines.join("\n")
    }

    /// Full report: title, summary, table and chart
    pub fn render(&self) -> String {
        let mut out = format!("{}\n\n", CONFIG.name);
        if self.error.is_none() {
            let summary = self.summary();
            if !summary.is_empty() {
                out.push_str(&summary);
                out.push_str("\n\n");
            }
        }
        out.push_str(&self.table());
        out.push('\n');
        if self.error.is_none() {
            let chart = self.chart();
            if !chart.is_empty() {
                out.push('\n');
                out.push_str(&chart);
                out.push('\n');
            }
        }
        out
    }

    /// Current table as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// What the report command should show
#[derive(Debug, Default, Clone)]
pub struct ReportOptions {
    /// Years to keep visible; all years when empty
    pub years: Vec<i32>,
    pub category: Option<String>,
    pub hide_values: bool,
    /// Also write the table to this CSV file
    pub csv: Option<PathBuf>,
}

/// Apply the options through the dashboard's own operations
pub fn build_dashboard(dataset: Dataset, policy: ExpensePolicy, opts: &ReportOptions) -> Dashboard<TerminalPresenter> {
    let mut dashboard = Dashboard::new(dataset, policy, TerminalPresenter::default());

    if !opts.years.is_empty() {
        for year in dashboard.dataset().years().to_vec() {
            if !opts.years.contains(&year) {
                dashboard.toggle_year(year);
            }
        }
    }
    if let Some(category) = &opts.category {
        dashboard.select_category(Some(category));
    }
    if opts.hide_values {
        dashboard.set_show_values(false);
    }
    dashboard
}

/// Fetch, aggregate and write the report to `out`
pub async fn run<W: Write>(
    upstream: &Upstream,
    schema: Schema,
    policy: ExpensePolicy,
    opts: &ReportOptions,
    out: &mut W,
) -> Result<()> {
    let dataset = match upstream.fetch_dataset(schema).await {
        Ok(dataset) => dataset,
        Err(e) => {
            let mut presenter = TerminalPresenter::default();
            presenter.render_error(CONFIG.labels.load_error);
            write!(out, "{}", presenter.render())?;
            return Err(e.context(CONFIG.labels.load_error));
        }
    };

    let missing = opts
        .category
        .as_deref()
        .map(canonical_key)
        .filter(|key| !dataset.has_category(key));
    if let Some(category) = missing {
        tracing::warn!(category = %category, "Category not present in the data, values will be zero");
    }

    if dataset.is_empty() {
        tracing::warn!("Upstream returned no rows with a usable year");
    }

    let dashboard = build_dashboard(dataset, policy, opts);
    tracing::debug!(
        policy = ?dashboard.policy(),
        years = ?dashboard.state().visible_years(),
        "Rendering report"
    );
    write!(out, "{}", dashboard.presenter().render())?;
    if dashboard.presenter().rows().is_empty() {
        writeln!(out, "{}", empty_table_message(dashboard.dataset()))?;
    }

    if let Some(path) = &opts.csv {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        dashboard.presenter().export_csv(file)?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}
