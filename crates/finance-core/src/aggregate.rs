//! Per-year totals and per-category series over the visible years

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::record::{CanonicalRecord, Dataset};

/// How negative category values count towards total expense
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpensePolicy {
    /// Only positive contributions count as expense
    #[default]
    PositiveOnly,
    /// Raw values are summed, refunds reduce the total
    Signed,
}

impl ExpensePolicy {
    fn contribution(self, value: f64) -> f64 {
        match self {
            ExpensePolicy::PositiveOnly => value.max(0.0),
            ExpensePolicy::Signed => value,
        }
    }
}

/// Overview row: all expense categories against income
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub expense: f64,
    pub income: f64,
    /// Expense as a percentage of income, `None` when there is no income
    pub ratio: Option<f64>,
}

/// Category row for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub year: i32,
    pub annual_value: f64,
    pub monthly_average: f64,
    /// `None` when the year has no expense, and always for the income category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_of_total_expense: Option<f64>,
}

/// Overflowed sums count as zero
fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// `part` as a percentage of `whole`; undefined without a positive whole or on overflow
fn percentage(part: f64, whole: f64) -> Option<f64> {
    (whole > 0.0)
        .then(|| part / whole * 100.0)
        .filter(|ratio| ratio.is_finite())
}

/// Sum of the expense categories of one record
fn total_expense(dataset: &Dataset, record: &CanonicalRecord, policy: ExpensePolicy) -> f64 {
    finite(
        dataset
            .expense_categories()
            .map(|category| policy.contribution(record.value(category)))
            .sum(),
    )
}

fn visible<'a>(
    dataset: &'a Dataset,
    visible_years: &'a BTreeSet<i32>,
) -> impl Iterator<Item = &'a CanonicalRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |record| visible_years.contains(&record.year))
}

/// One total per visible record, in dataset order
pub fn compute_overview(dataset: &Dataset, visible_years: &BTreeSet<i32>, policy: ExpensePolicy) -> Vec<YearlyTotal> {
    visible(dataset, visible_years)
        .map(|record| {
            let expense = total_expense(dataset, record, policy);
            let income = finite(record.value(dataset.income_key())).max(0.0);
            let ratio = percentage(expense, income);

            YearlyTotal {
                year: record.year,
                expense,
                income,
                ratio,
            }
        })
        .collect()
}

/// One row per visible record for `category`. Unknown categories yield zeros.
pub fn compute_category(
    dataset: &Dataset,
    visible_years: &BTreeSet<i32>,
    category: &str,
    policy: ExpensePolicy,
) -> Vec<CategoryRow> {
    let is_income = dataset.is_income(category);

    visible(dataset, visible_years)
        .map(|record| {
            let annual_value = finite(record.value(category));
            let monthly_average = if annual_value > 0.0 { annual_value / 12.0 } else { 0.0 };

            let share_of_total_expense = if is_income {
                None
            } else {
                let total = total_expense(dataset, record, policy);
                percentage(annual_value, total)
            };

            CategoryRow {
                year: record.year,
                annual_value,
                monthly_average,
                share_of_total_expense,
            }
        })
        .collect()
}

/// Totals over all visible years of the overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverviewSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub ratio: Option<f64>,
}

impl OverviewSummary {
    pub fn from_totals(totals: &[YearlyTotal]) -> Self {
        let income = finite(totals.iter().map(|t| t.income).sum());
        let expense = finite(totals.iter().map(|t| t.expense).sum());

        Self {
            income,
            expense,
            balance: finite(income - expense),
            ratio: percentage(expense, income),
        }
    }
}

/// Totals over all visible years of one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategorySummary {
    pub total: f64,
    /// Total spread over every visible month
    pub monthly_average: f64,
    /// Mean of the yearly shares that are defined
    pub share: Option<f64>,
}

impl CategorySummary {
    pub fn from_rows(rows: &[CategoryRow]) -> Self {
        let total = finite(rows.iter().map(|r| r.annual_value).sum());
        let months = rows.len() as f64 * 12.0;
        let monthly_average = if total > 0.0 && months > 0.0 { total / months } else { 0.0 };

        let shares: Vec<f64> = rows.iter().filter_map(|r| r.share_of_total_expense).collect();
        let share = (!shares.is_empty()).then(|| shares.iter().sum::<f64>() / shares.len() as f64);

        Self {
            total,
            monthly_average,
            share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RawRecord, Schema};
    use serde_json::{Value, json};

    fn dataset(value: Value) -> Dataset {
        Dataset::from_value(value, Schema::default()).unwrap()
    }

    fn sample() -> Dataset {
        dataset(json!([
            {"YEAR": 2022, "GANHO BRUTO": "R$ 1.000,00", "RENT": "R$ 500,00"},
            {"YEAR": 2023, "GANHO BRUTO": "R$ 0,00", "RENT": "R$ 200,00"},
        ]))
    }

    fn years(list: &[i32]) -> BTreeSet<i32> {
        list.iter().copied().collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 0.005, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_overview_scenario() {
        let totals = compute_overview(&sample(), &years(&[2022, 2023]), ExpensePolicy::default());

        assert_eq!(
            totals,
            vec![
                YearlyTotal {
                    year: 2022,
                    expense: 500.0,
                    income: 1000.0,
                    ratio: Some(50.0)
                },
                YearlyTotal {
                    year: 2023,
                    expense: 200.0,
                    income: 0.0,
                    ratio: None
                },
            ]
        );
    }

    #[test]
    fn test_overview_respects_visible_years() {
        let totals = compute_overview(&sample(), &years(&[2023]), ExpensePolicy::default());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].year, 2023);
    }

    #[test]
    fn test_empty_visible_years_yield_no_rows() {
        let data = sample();
        let none = BTreeSet::new();
        assert!(compute_overview(&data, &none, ExpensePolicy::default()).is_empty());
        assert!(compute_category(&data, &none, "RENT", ExpensePolicy::default()).is_empty());
    }

    #[test]
    fn test_category_scenario() {
        let rows = compute_category(&sample(), &years(&[2022, 2023]), "RENT", ExpensePolicy::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2022);
        assert_eq!(rows[0].annual_value, 500.0);
        assert_close(rows[0].monthly_average, 41.67);
        assert_eq!(rows[0].share_of_total_expense, Some(100.0));
        assert_eq!(rows[1].year, 2023);
        assert_eq!(rows[1].annual_value, 200.0);
        assert_close(rows[1].monthly_average, 16.67);
        assert_eq!(rows[1].share_of_total_expense, Some(100.0));
    }

    #[test]
    fn test_income_category_has_no_share() {
        let rows = compute_category(&sample(), &years(&[2022, 2023]), "GANHO BRUTO", ExpensePolicy::default());

        assert_eq!(rows[0].annual_value, 1000.0);
        assert!(rows.iter().all(|r| r.share_of_total_expense.is_none()));
        assert_eq!(rows[1].monthly_average, 0.0);

        let encoded = serde_json::to_value(&rows[0]).unwrap();
        assert!(encoded.get("share_of_total_expense").is_none());
    }

    #[test]
    fn test_unknown_category_defaults_to_zero() {
        let rows = compute_category(&sample(), &years(&[2022]), "BOAT", ExpensePolicy::default());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].annual_value, 0.0);
        assert_eq!(rows[0].monthly_average, 0.0);
        assert_eq!(rows[0].share_of_total_expense, Some(0.0));
    }

    #[test]
    fn test_negative_values_follow_policy() {
        let data = dataset(json!([
            {"YEAR": 2022, "GANHO BRUTO": 1000, "RENT": 300, "REFUND": -100},
        ]));
        let visible = years(&[2022]);

        let positive = compute_overview(&data, &visible, ExpensePolicy::PositiveOnly);
        assert_eq!(positive[0].expense, 300.0);
        assert_close(positive[0].ratio.unwrap(), 30.0);

        let signed = compute_overview(&data, &visible, ExpensePolicy::Signed);
        assert_eq!(signed[0].expense, 200.0);
        assert_close(signed[0].ratio.unwrap(), 20.0);

        let refund = compute_category(&data, &visible, "REFUND", ExpensePolicy::PositiveOnly);
        assert_eq!(refund[0].monthly_average, 0.0);
    }

    #[test]
    fn test_negative_income_counts_as_zero() {
        let data = dataset(json!([{"YEAR": 2022, "GANHO BRUTO": "-R$ 10,00", "RENT": 5}]));

        let totals = compute_overview(&data, &years(&[2022]), ExpensePolicy::default());
        assert_eq!(totals[0].income, 0.0);
        assert_eq!(totals[0].ratio, None);
    }

    #[test]
    fn test_share_undefined_without_expense() {
        let data = dataset(json!([{"YEAR": 2022, "GANHO BRUTO": 10, "RENT": 0, "CAR": 0}]));

        let rows = compute_category(&data, &years(&[2022]), "RENT", ExpensePolicy::default());
        assert_eq!(rows[0].share_of_total_expense, None);
    }

    #[test]
    fn test_uneven_rows_use_category_union() {
        let raw: Vec<RawRecord> = vec![
            json!({"YEAR": 2021, "GANHO BRUTO": 100, "RENT": 10}),
            json!({"YEAR": 2022, "GANHO BRUTO": 100, "RENT": 10, "CAR": 30}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        let data = Dataset::from_records(&raw, Schema::default());
        let visible = years(&[2021, 2022]);

        let totals = compute_overview(&data, &visible, ExpensePolicy::default());
        assert_eq!(totals[0].expense, 10.0);
        assert_eq!(totals[1].expense, 40.0);

        let car = compute_category(&data, &visible, "CAR", ExpensePolicy::default());
        assert_eq!(car[0].annual_value, 0.0);
        assert_eq!(car[0].share_of_total_expense, Some(0.0));
        assert_eq!(car[1].share_of_total_expense, Some(75.0));
    }

    #[test]
    fn test_recomputation_is_stable() {
        let data = sample();
        let visible = years(&[2022, 2023]);

        assert_eq!(
            compute_overview(&data, &visible, ExpensePolicy::default()),
            compute_overview(&data, &visible, ExpensePolicy::default())
        );
    }

    #[test]
    fn test_summaries() {
        let data = sample();
        let visible = years(&[2022, 2023]);

        let overview = OverviewSummary::from_totals(&compute_overview(&data, &visible, ExpensePolicy::default()));
        assert_eq!(overview.income, 1000.0);
        assert_eq!(overview.expense, 700.0);
        assert_eq!(overview.balance, 300.0);
        assert_close(overview.ratio.unwrap(), 70.0);

        let rent = CategorySummary::from_rows(&compute_category(&data, &visible, "RENT", ExpensePolicy::default()));
        assert_eq!(rent.total, 700.0);
        assert_close(rent.monthly_average, 29.17);
        assert_eq!(rent.share, Some(100.0));

        assert_eq!(OverviewSummary::from_totals(&[]).ratio, None);
        assert_eq!(CategorySummary::from_rows(&[]), CategorySummary::default());
    }

    #[test]
    fn test_tiny_income_leaves_ratio_undefined() {
        let data = dataset(json!([{"YEAR": 2022, "GANHO BRUTO": 5e-324, "RENT": 1e10}]));

        let totals = compute_overview(&data, &years(&[2022]), ExpensePolicy::default());
        assert!(totals[0].income > 0.0);
        assert_eq!(totals[0].ratio, None);
        assert_eq!(OverviewSummary::from_totals(&totals).ratio, None);
    }

    #[test]
    fn test_overflowing_sums_fall_back_to_zero() {
        let data = dataset(json!([
            {"YEAR": 2022, "GANHO BRUTO": 100, "RENT": "1e308", "CAR": "1e308"},
            {"YEAR": 2023, "GANHO BRUTO": 100, "RENT": "1e308", "CAR": 0},
        ]));
        let visible = years(&[2022, 2023]);

        let totals = compute_overview(&data, &visible, ExpensePolicy::default());
        assert_eq!(totals[0].expense, 0.0);
        assert_eq!(totals[0].ratio, Some(0.0));
        assert!(totals.iter().all(|t| t.ratio.is_none_or(f64::is_finite)));

        let rent = compute_category(&data, &visible, "RENT", ExpensePolicy::default());
        assert_eq!(rent[0].share_of_total_expense, None);
        assert_eq!(rent[1].share_of_total_expense, Some(100.0));

        let summary = CategorySummary::from_rows(&rent);
        assert_eq!(summary.total, 0.0);
        assert!(summary.monthly_average.is_finite());
    }
}
