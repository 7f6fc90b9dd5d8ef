mod chart_view;
mod controls;
mod data_table;
mod section;
mod summary_boxes;

pub use chart_view::ChartView;
pub use controls::{CategoryTabs, ValuesToggle, YearToggles};
pub use data_table::DataTable;
pub use section::Section;
pub use summary_boxes::SummaryBoxes;
