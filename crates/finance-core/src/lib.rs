//! Finance dashboard core
//!
//! Turns the yearly spreadsheet rows into canonical records, aggregates them
//! per year or per category and keeps the dashboard view state in sync with
//! whatever presents it (browser components or a terminal report).

pub mod aggregate;
pub mod dashboard;
mod error;
pub mod format;
pub mod present;
pub mod record;
pub mod settings;

pub use aggregate::{
    CategoryRow, CategorySummary, ExpensePolicy, OverviewSummary, YearlyTotal, compute_category, compute_overview,
};
pub use dashboard::{Aggregate, Dashboard, ViewState};
pub use error::{DataError, Result};
pub use present::{Chart, ChartKind, ChartSeries, DashboardView, Presenter, SummaryBox, build_view};
pub use record::{CanonicalRecord, Dataset, NormalizeReport, RawRecord, Schema, canonical_key, normalize};
pub use settings::SchemaSettings;
