//! Presenter that publishes each render cycle into Leptos signals

use finance_core::{Chart, Presenter, SummaryBox};
use leptos::prelude::*;

/// Table content of the last render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFrame {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Replaces the rows when set
    pub error: Option<String>,
}

/// Signals read by the table, summary box and chart components
#[derive(Clone, Copy)]
pub struct SignalPresenter {
    pub table: RwSignal<TableFrame>,
    pub boxes: RwSignal<Vec<SummaryBox>>,
    pub chart: RwSignal<Option<Chart>>,
}

impl SignalPresenter {
    pub fn new() -> Self {
        Self {
            table: RwSignal::new(TableFrame::default()),
            boxes: RwSignal::new(Vec::new()),
            chart: RwSignal::new(None),
        }
    }
}

impl Default for SignalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for SignalPresenter {
    fn render_table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        self.table.set(TableFrame {
            headers: headers.to_vec(),
            rows: rows.to_vec(),
            error: None,
        });
    }

    fn render_summary_boxes(&mut self, boxes: &[SummaryBox]) {
        self.boxes.set(boxes.to_vec());
    }

    fn render_chart(&mut self, chart: &Chart) {
        self.chart.set(Some(chart.clone()));
    }

    fn render_error(&mut self, message: &str) {
        self.table.set(TableFrame {
            error: Some(message.to_string()),
            ..TableFrame::default()
        });
        self.boxes.set(Vec::new());
        self.chart.set(None);
    }
}
