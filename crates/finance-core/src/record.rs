//! Normalization of raw spreadsheet rows into canonical yearly records
//!
//! The spreadsheet endpoint delivers one JSON object per year, but its column
//! labels drift in casing and spacing ("Ganho Bruto" vs "GANHO BRUTO ") and
//! amounts often arrive as Brazilian currency strings ("R$ 1.234,56"). After
//! this pass every record has an integer year and plain `f64` amounts keyed
//! by trimmed, uppercased labels, so nothing downstream compares labels
//! loosely.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{DataError, Result};

/// One row as delivered by the spreadsheet endpoint
pub type RawRecord = Map<String, Value>;

/// Canonical names of the year and income columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    year_key: String,
    income_key: String,
}

impl Schema {
    /// Labels are canonicalized, so any casing/spacing is accepted
    pub fn new(year_key: &str, income_key: &str) -> Self {
        Self {
            year_key: canonical_key(year_key),
            income_key: canonical_key(income_key),
        }
    }

    pub fn year_key(&self) -> &str {
        &self.year_key
    }

    pub fn income_key(&self) -> &str {
        &self.income_key
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new("YEAR", "GANHO BRUTO")
    }
}

/// A yearly record with a usable year and numeric category values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub year: i32,
    pub values: BTreeMap<String, f64>,
}

impl CanonicalRecord {
    /// Value of a category, 0 when this record lacks it
    pub fn value(&self, category: &str) -> f64 {
        self.values.get(category).copied().unwrap_or(0.0)
    }
}

/// Trim and uppercase a column label
pub fn canonical_key(label: &str) -> String {
    label.trim().to_uppercase()
}

/// Interpret a year cell. Integral numbers and integer strings are usable.
pub fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            let f = n.as_f64()?;
            let in_range = f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX);
            (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i32)
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Interpret an amount cell, falling back to 0 for anything unparseable
pub fn parse_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_currency(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse "R$ 1.234,56", "-R$ 50,00", "R$ -50,00" or a bare "1234,5"
fn parse_currency(text: &str) -> Option<f64> {
    let mut rest = text.trim();
    let mut negative = false;

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }
    rest = rest.strip_prefix("R$").unwrap_or(rest).trim_start();
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = !negative;
        rest = stripped;
    }

    let cleaned: String = rest
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let amount: f64 = cleaned.parse().ok()?;
    Some(if negative { -amount } else { amount })
}

/// Normalize raw rows, silently dropping those without a usable year.
/// Input order is kept and duplicate years stay distinct.
pub fn normalize(raw: &[RawRecord], schema: &Schema) -> Vec<CanonicalRecord> {
    raw.iter().filter_map(|record| normalize_record(record, schema)).collect()
}

fn normalize_record(raw: &RawRecord, schema: &Schema) -> Option<CanonicalRecord> {
    let mut year = None;
    let mut values = BTreeMap::new();

    // Later labels win when two collapse onto the same canonical key
    for (label, value) in raw {
        let key = canonical_key(label);
        if key == schema.year_key {
            year = parse_year(value);
        } else {
            values.insert(key, parse_amount(value));
        }
    }

    Some(CanonicalRecord { year: year?, values })
}

/// Outcome of a normalization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub total: usize,
    pub kept: usize,
    pub dropped: usize,
}

/// Canonical records plus the schema derived from all of them
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    records: Vec<CanonicalRecord>,
    /// Union of category keys across records, in first-appearance order
    categories: Vec<String>,
    /// Distinct years in first-appearance order
    years: Vec<i32>,
    report: NormalizeReport,
}

impl Dataset {
    /// Normalize raw rows and derive the category union
    pub fn from_records(raw: &[RawRecord], schema: Schema) -> Self {
        let mut records = Vec::with_capacity(raw.len());
        let mut categories: Vec<String> = Vec::new();
        let mut years: Vec<i32> = Vec::new();

        for row in raw {
            let Some(record) = normalize_record(row, &schema) else {
                continue;
            };

            for label in row.keys() {
                let key = canonical_key(label);
                if key != schema.year_key && !categories.contains(&key) {
                    categories.push(key);
                }
            }
            if !years.contains(&record.year) {
                years.push(record.year);
            }
            records.push(record);
        }

        let report = NormalizeReport {
            total: raw.len(),
            kept: records.len(),
            dropped: raw.len() - records.len(),
        };

        Self {
            schema,
            records,
            categories,
            years,
            report,
        }
    }

    /// Parse a response body that must be a JSON array of row objects
    pub fn from_json(body: &str, schema: Schema) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value, schema)
    }

    /// Array elements that are not objects count as dropped rows
    pub fn from_value(value: Value, schema: Schema) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(DataError::NotAnArray(json_kind(&other))),
        };

        let total = items.len();
        let rows: Vec<RawRecord> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();

        let mut dataset = Self::from_records(&rows, schema);
        dataset.report.total = total;
        dataset.report.dropped = total - dataset.report.kept;
        Ok(dataset)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// All category keys, income included
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Category keys other than the income column
    pub fn expense_categories(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .map(String::as_str)
            .filter(|key| *key != self.schema.income_key)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn income_key(&self) -> &str {
        &self.schema.income_key
    }

    pub fn is_income(&self, category: &str) -> bool {
        category == self.schema.income_key
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|key| key == category)
    }

    pub fn report(&self) -> NormalizeReport {
        self.report
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
