//! View state and the controller that owns it
//!
//! [`Dashboard`] is the single owner of the dataset, the view state and the
//! presenter. Its mutation methods are the only write path, and each one
//! recomputes the aggregate and renders it before returning, so every
//! interaction is immediately observable.

use std::collections::BTreeSet;

use crate::aggregate::{CategoryRow, ExpensePolicy, YearlyTotal, compute_category, compute_overview};
use crate::present::{DashboardView, Presenter, build_view};
use crate::record::{Dataset, canonical_key};

/// What the user currently looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    visible_years: BTreeSet<i32>,
    /// `None` is the overview across all expense categories
    selected_category: Option<String>,
    /// Purely presentational, never affects the aggregate
    show_values: bool,
}

impl ViewState {
    /// Every year visible, overview mode, values shown
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            visible_years: dataset.years().iter().copied().collect(),
            selected_category: None,
            show_values: true,
        }
    }

    pub fn visible_years(&self) -> &BTreeSet<i32> {
        &self.visible_years
    }

    pub fn is_year_visible(&self, year: i32) -> bool {
        self.visible_years.contains(&year)
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn show_values(&self) -> bool {
        self.show_values
    }

    /// Flip membership of `year`; returns whether it is now visible
    pub fn toggle_year(&mut self, year: i32) -> bool {
        if self.visible_years.remove(&year) {
            false
        } else {
            self.visible_years.insert(year);
            true
        }
    }

    pub fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    pub fn set_show_values(&mut self, show: bool) {
        self.show_values = show;
    }
}

/// Aggregate for the current mode
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    Overview(Vec<YearlyTotal>),
    Category {
        category: String,
        is_income: bool,
        rows: Vec<CategoryRow>,
    },
}

impl Aggregate {
    pub fn compute(dataset: &Dataset, state: &ViewState, policy: ExpensePolicy) -> Self {
        match state.selected_category() {
            None => Aggregate::Overview(compute_overview(dataset, state.visible_years(), policy)),
            Some(category) => Aggregate::Category {
                category: category.to_string(),
                is_income: dataset.is_income(category),
                rows: compute_category(dataset, state.visible_years(), category, policy),
            },
        }
    }
}

/// Dataset, view state and presenter kept consistent with each other
pub struct Dashboard<P> {
    dataset: Dataset,
    state: ViewState,
    policy: ExpensePolicy,
    presenter: P,
}

impl<P: Presenter> Dashboard<P> {
    /// Takes ownership of the dataset and renders the initial view
    pub fn new(dataset: Dataset, policy: ExpensePolicy, presenter: P) -> Self {
        let state = ViewState::for_dataset(&dataset);
        let mut dashboard = Self {
            dataset,
            state,
            policy,
            presenter,
        };
        dashboard.refresh();
        dashboard
    }

    /// Years absent from the dataset are ignored, the view still refreshes
    pub fn toggle_year(&mut self, year: i32) {
        if self.dataset.years().contains(&year) {
            self.state.toggle_year(year);
        }
        self.refresh();
    }

    /// `None` switches back to the overview
    pub fn select_category(&mut self, category: Option<&str>) {
        self.state.select_category(category.map(canonical_key));
        self.refresh();
    }

    pub fn set_show_values(&mut self, show: bool) {
        self.state.set_show_values(show);
        self.refresh();
    }

    /// Recompute everything and render it
    pub fn refresh(&mut self) {
        build_view(&self.dataset, &self.state, self.policy).present(&mut self.presenter);
    }
}

impl<P> Dashboard<P> {
    pub fn aggregate(&self) -> Aggregate {
        Aggregate::compute(&self.dataset, &self.state, self.policy)
    }

    pub fn view(&self) -> DashboardView {
        build_view(&self.dataset, &self.state, self.policy)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn policy(&self) -> ExpensePolicy {
        self.policy
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
