/// Shared formatting utilities for the UI layer.

/// Format an amount as US dollars, e.g. `1250.5` -> `"$1,250.50"`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// "Fits up to 4 guests"; singular for one.
pub fn format_capacity(max_capacity: i32) -> String {
    if max_capacity == 1 {
        "Fits up to 1 guest".to_string()
    } else {
        format!("Fits up to {max_capacity} guests")
    }
}
