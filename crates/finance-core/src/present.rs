//! Presentation boundary: fully computed table, summary boxes and chart
//!
//! The core never touches the DOM or the terminal. It builds a
//! [`DashboardView`] from the current aggregate and hands its parts to a
//! [`Presenter`], which only has to draw them.

use serde::Serialize;

use crate::aggregate::{CategoryRow, CategorySummary, ExpensePolicy, OverviewSummary, YearlyTotal};
use crate::dashboard::{Aggregate, ViewState};
use crate::format::{UNDEFINED, currency_cell, percent_cell};
use crate::record::Dataset;

pub const INCOME_COLOR: &str = "#2e7d32";
pub const EXPENSE_COLOR: &str = "#c62828";
pub const BALANCE_COLOR: &str = "#1565c0";
pub const RATIO_COLOR: &str = "#ef6c00";

/// Table message when the sheet delivered no usable rows
pub const NO_DATA: &str = "Nenhum dado disponível";

/// Table message when every year is toggled off
pub const NO_YEARS: &str = "Nenhum ano selecionado";

/// Colors cycled over expense categories
const CATEGORY_PALETTE: &[&str] = &[
    "#6a1b9a", "#00838f", "#ad1457", "#4e342e", "#283593", "#9e9d24", "#00695c", "#d84315",
];

/// Something that can draw the dashboard
pub trait Presenter {
    fn render_table(&mut self, headers: &[String], rows: &[Vec<String>]);
    fn render_summary_boxes(&mut self, boxes: &[SummaryBox]);
    fn render_chart(&mut self, chart: &Chart);
    /// Replaces the table content with a static error message
    fn render_error(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBox {
    pub label: String,
    pub value: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    /// X axis labels (years)
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Whether value axis labels may be shown; data is never masked
    pub values_visible: bool,
}

/// Everything a presenter needs for one render cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub boxes: Vec<SummaryBox>,
    pub chart: Chart,
}

impl DashboardView {
    /// Hand every part to the presenter
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        presenter.render_table(&self.headers, &self.rows);
        presenter.render_summary_boxes(&self.boxes);
        presenter.render_chart(&self.chart);
    }
}

/// Color of a category tab, box and series
pub fn category_color(dataset: &Dataset, category: &str) -> &'static str {
    if dataset.is_income(category) {
        return INCOME_COLOR;
    }
    let index = dataset
        .expense_categories()
        .position(|key| key == category)
        .unwrap_or(0);
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// Recompute the aggregate for `state` and lay it out for presentation
pub fn build_view(dataset: &Dataset, state: &ViewState, policy: ExpensePolicy) -> DashboardView {
    match Aggregate::compute(dataset, state, policy) {
        Aggregate::Overview(totals) => overview_view(&totals, state.show_values()),
        Aggregate::Category {
            category,
            is_income,
            rows,
        } => category_view(
            &category,
            is_income,
            category_color(dataset, &category),
            &rows,
            state.show_values(),
        ),
    }
}

fn summary_box(label: &str, value: String, color: &str) -> SummaryBox {
    SummaryBox {
        label: label.to_string(),
        value,
        color: color.to_string(),
    }
}

fn headers(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

fn overview_view(totals: &[YearlyTotal], show: bool) -> DashboardView {
    let rows = totals
        .iter()
        .map(|t| {
            vec![
                t.year.to_string(),
                currency_cell(t.income, show),
                currency_cell(t.expense, show),
                percent_cell(t.ratio, show),
            ]
        })
        .collect();

    let summary = OverviewSummary::from_totals(totals);
    let boxes = vec![
        summary_box("Ganho bruto total", currency_cell(summary.income, show), INCOME_COLOR),
        summary_box("Despesas totais", currency_cell(summary.expense, show), EXPENSE_COLOR),
        summary_box("Saldo", currency_cell(summary.balance, show), BALANCE_COLOR),
        summary_box("Comprometimento médio", percent_cell(summary.ratio, show), RATIO_COLOR),
    ];

    let chart = Chart {
        kind: ChartKind::Line,
        labels: totals.iter().map(|t| t.year.to_string()).collect(),
        series: vec![
            ChartSeries {
                label: "Ganho bruto".to_string(),
                data: totals.iter().map(|t| t.income).collect(),
                color: INCOME_COLOR.to_string(),
            },
            ChartSeries {
                label: "Despesas".to_string(),
                data: totals.iter().map(|t| t.expense).collect(),
                color: EXPENSE_COLOR.to_string(),
            },
        ],
        values_visible: show,
    };

    DashboardView {
        headers: headers(&["Ano", "Ganho bruto", "Despesas", "Comprometimento"]),
        rows,
        boxes,
        chart,
    }
}

fn category_view(category: &str, is_income: bool, color: &str, rows: &[CategoryRow], show: bool) -> DashboardView {
    let table_rows = rows
        .iter()
        .map(|r| {
            let mut cells = vec![
                r.year.to_string(),
                currency_cell(r.annual_value, show),
                currency_cell(r.monthly_average, show),
            ];
            // Income has no share of expense, the column is omitted
            if !is_income {
                cells.push(percent_cell(r.share_of_total_expense, show));
            }
            cells
        })
        .collect();

    let summary = CategorySummary::from_rows(rows);
    let mut boxes = vec![
        summary_box("Total no período", currency_cell(summary.total, show), color),
        summary_box("Média mensal", currency_cell(summary.monthly_average, show), color),
    ];
    if !is_income {
        boxes.push(summary_box("Participação média", percent_cell(summary.share, show), RATIO_COLOR));
    }

    let chart = Chart {
        kind: ChartKind::Bar,
        labels: rows.iter().map(|r| r.year.to_string()).collect(),
        series: vec![ChartSeries {
            label: category.to_string(),
            data: rows.iter().map(|r| r.annual_value).collect(),
            color: color.to_string(),
        }],
        values_visible: show,
    };

    let mut header_labels = vec!["Ano", "Valor anual", "Média mensal"];
    if !is_income {
        header_labels.push("% das despesas");
    }

    DashboardView {
        headers: headers(&header_labels),
        rows: table_rows,
        boxes,
        chart,
    }
}

/// What an empty table should say for this dataset
pub fn empty_table_message(dataset: &Dataset) -> &'static str {
    if dataset.is_empty() { NO_DATA } else { NO_YEARS }
}

/// True when a cell carries no defined value
pub fn is_placeholder(cell: &str) -> bool {
    cell == UNDEFINED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{MASKED_CURRENCY, MASKED_PERCENT};
    use crate::record::Schema;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::from_value(
            json!([
                {"YEAR": 2022, "GANHO BRUTO": "R$ 1.000,00", "RENT": "R$ 500,00"},
                {"YEAR": 2023, "GANHO BRUTO": "R$ 0,00", "RENT": "R$ 200,00"},
            ]),
            Schema::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_overview_table_and_boxes() {
        let data = sample();
        let state = ViewState::for_dataset(&data);

        let view = build_view(&data, &state, ExpensePolicy::default());
        assert_eq!(view.headers, vec!["Ano", "Ganho bruto", "Despesas", "Comprometimento"]);
        assert_eq!(view.rows[0], vec!["2022", "R$ 1.000,00", "R$ 500,00", "50,00%"]);
        assert_eq!(view.rows[1], vec!["2023", "R$ 0,00", "R$ 200,00", "-"]);
        assert!(is_placeholder(&view.rows[1][3]));

        let values: Vec<&str> = view.boxes.iter().map(|b| b.value.as_str()).collect();
        assert_eq!(values, vec!["R$ 1.000,00", "R$ 700,00", "R$ 300,00", "70,00%"]);

        assert_eq!(view.chart.kind, ChartKind::Line);
        assert_eq!(view.chart.labels, vec!["2022", "2023"]);
        assert_eq!(view.chart.series[0].data, vec![1000.0, 0.0]);
        assert_eq!(view.chart.series[1].data, vec![500.0, 200.0]);
    }

    #[test]
    fn test_hidden_values_mask_cells_but_not_chart() {
        let data = sample();
        let mut state = ViewState::for_dataset(&data);
        state.set_show_values(false);

        let view = build_view(&data, &state, ExpensePolicy::default());
        assert_eq!(view.rows[0], vec!["2022", MASKED_CURRENCY, MASKED_CURRENCY, MASKED_PERCENT]);
        // Undefined stays a placeholder even when masked
        assert_eq!(view.rows[1][3], "-");
        assert!(!view.chart.values_visible);
        assert_eq!(view.chart.series[1].data, vec![500.0, 200.0]);
    }

    #[test]
    fn test_category_view_columns() {
        let data = sample();
        let mut state = ViewState::for_dataset(&data);

        state.select_category(Some("RENT".to_string()));
        let rent = build_view(&data, &state, ExpensePolicy::default());
        assert_eq!(rent.headers.len(), 4);
        assert_eq!(rent.rows[0], vec!["2022", "R$ 500,00", "R$ 41,67", "100,00%"]);
        assert_eq!(rent.boxes.len(), 3);
        assert_eq!(rent.chart.kind, ChartKind::Bar);
        assert_eq!(rent.chart.series[0].label, "RENT");

        state.select_category(Some("GANHO BRUTO".to_string()));
        let income = build_view(&data, &state, ExpensePolicy::default());
        assert_eq!(income.headers, vec!["Ano", "Valor anual", "Média mensal"]);
        assert!(income.rows.iter().all(|row| row.len() == 3));
        assert_eq!(income.boxes.len(), 2);
        assert_eq!(income.chart.series[0].color, INCOME_COLOR);
    }

    #[test]
    fn test_no_visible_years_renders_empty() {
        let data = sample();
        let mut state = ViewState::for_dataset(&data);
        state.toggle_year(2022);
        state.toggle_year(2023);

        let view = build_view(&data, &state, ExpensePolicy::default());
        assert!(view.rows.is_empty());
        assert!(view.chart.labels.is_empty());
        assert_eq!(view.boxes[3].value, "-");
    }

    #[test]
    fn test_category_colors_cycle() {
        let data = sample();
        assert_eq!(category_color(&data, "GANHO BRUTO"), INCOME_COLOR);
        assert_eq!(category_color(&data, "RENT"), CATEGORY_PALETTE[0]);
        assert_eq!(category_color(&data, "UNKNOWN"), CATEGORY_PALETTE[0]);
    }

    #[test]
    fn test_empty_table_message_tells_causes_apart() {
        let data = sample();
        assert_eq!(empty_table_message(&data), NO_YEARS);

        let no_rows = Dataset::from_value(json!([{"YEAR": "", "RENT": 10}]), Schema::default()).unwrap();
        assert!(no_rows.is_empty());
        assert_eq!(empty_table_message(&no_rows), NO_DATA);

        let view = build_view(&no_rows, &ViewState::for_dataset(&no_rows), ExpensePolicy::default());
        assert!(view.rows.is_empty());
    }
}
