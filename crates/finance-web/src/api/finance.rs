use finance_core::{Dataset, ExpensePolicy, SchemaSettings};
use shared::CONFIG;
use wasm_bindgen::JsValue;

use super::http::{FetchError, get_text};

/// Compiled-in settings, used when the proxy does not publish its own
fn default_settings() -> SchemaSettings {
    let policy = if CONFIG.schema.positive_expenses_only {
        ExpensePolicy::PositiveOnly
    } else {
        ExpensePolicy::Signed
    };
    SchemaSettings::new(CONFIG.schema.year_key, CONFIG.schema.income_key, policy)
}

/// Column names and expense policy configured on the proxy
pub async fn get_settings() -> SchemaSettings {
    let fetched = match get_text(CONFIG.schema_path).await {
        Ok(body) => serde_json::from_str::<SchemaSettings>(&body).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    fetched.unwrap_or_else(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Using built-in schema, {} unavailable: {}",
            CONFIG.schema_path, e
        )));
        default_settings()
    })
}

/// Fetch the yearly sheet through the proxy and normalize it
pub async fn get_dataset(settings: &SchemaSettings) -> Result<Dataset, FetchError> {
    let body = get_text(CONFIG.data_path).await?;
    let dataset = Dataset::from_json(&body, settings.schema())?;

    let report = dataset.report();
    if report.dropped > 0 {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Ignored {} of {} rows without a usable {}",
            report.dropped,
            report.total,
            dataset.schema().year_key()
        )));
    }

    Ok(dataset)
}
