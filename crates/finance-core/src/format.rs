//! Brazilian number formatting for table cells and summary boxes

/// Placeholder for an undefined value (ratio without income, share without expense)
pub const UNDEFINED: &str = "-";

/// Shown instead of a currency amount while values are hidden
pub const MASKED_CURRENCY: &str = "R$ •••••";

/// Shown instead of a percentage while values are hidden
pub const MASKED_PERCENT: &str = "•••%";

/// Format with `.` thousands separators and `,` decimals: 1234.5 -> "1.234,50"
///
/// Non-finite values render as the placeholder. A value that rounds to zero
/// carries no sign.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    // Simple thousands grouping
    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.insert(0, '.');
        }
        grouped.insert(0, c);
    }

    let rounds_to_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !rounds_to_zero { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// "R$ 1.234,56"
pub fn format_currency(value: f64) -> String {
    let digits = format_decimal(value, 2);
    if digits == UNDEFINED {
        return digits;
    }
    match digits.strip_prefix('-') {
        Some(abs) => format!("-R$ {abs}"),
        None => format!("R$ {digits}"),
    }
}

/// "50,00%", or the placeholder when undefined
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", format_decimal(v, 2)),
        Some(_) => UNDEFINED.to_string(),
        None => UNDEFINED.to_string(),
    }
}

/// Currency cell honouring the show-values toggle
pub fn currency_cell(value: f64, show_values: bool) -> String {
    if show_values {
        format_currency(value)
    } else {
        MASKED_CURRENCY.to_string()
    }
}

/// Percentage cell honouring the show-values toggle. Undefined stays "-".
pub fn percent_cell(value: Option<f64>, show_values: bool) -> String {
    match value {
        Some(_) if !show_values => MASKED_PERCENT.to_string(),
        _ => format_percent(value),
    }
}
