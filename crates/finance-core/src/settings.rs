//! Column names and expense policy as one serializable unit
//!
//! The proxy publishes the settings it was configured with so the browser
//! and the terminal report aggregate the same data the same way.

use serde::{Deserialize, Serialize};

use crate::aggregate::ExpensePolicy;
use crate::record::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    pub year_key: String,
    pub income_key: String,
    pub expense_policy: ExpensePolicy,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        let schema = Schema::default();
        Self {
            year_key: schema.year_key().to_string(),
            income_key: schema.income_key().to_string(),
            expense_policy: ExpensePolicy::default(),
        }
    }
}

impl SchemaSettings {
    pub fn new(year_key: &str, income_key: &str, expense_policy: ExpensePolicy) -> Self {
        Self {
            year_key: year_key.to_string(),
            income_key: income_key.to_string(),
            expense_policy,
        }
    }

    pub fn schema(&self) -> Schema {
        Schema::new(&self.year_key, &self.income_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use serde_json::json;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: SchemaSettings = serde_json::from_value(json!({"expense_policy": "signed"})).unwrap();

        assert_eq!(settings.schema(), Schema::default());
        assert_eq!(settings.expense_policy, ExpensePolicy::Signed);
    }

    #[test]
    fn test_published_keys_drive_normalization() {
        let settings: SchemaSettings =
            serde_json::from_value(json!({"year_key": "ano", "income_key": "Salário"})).unwrap();
        let dataset = Dataset::from_value(
            json!([{"ANO": 2024, "SALÁRIO": "R$ 3.000,00", "RENT": 900}]),
            settings.schema(),
        )
        .unwrap();

        assert_eq!(dataset.years(), &[2024]);
        assert!(dataset.is_income("SALÁRIO"));
        assert_eq!(dataset.expense_categories().collect::<Vec<_>>(), vec!["RENT"]);
    }
}
