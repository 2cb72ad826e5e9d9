//! Currency formatting for reports

/// Round to the nearest whole unit and group thousands with commas
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = (rounded.abs() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `format_currency` with a leading currency symbol, sign first
pub fn format_currency_with_symbol(amount: f64, symbol: &str) -> String {
    let formatted = format_currency(amount);
    match formatted.strip_prefix('-') {
        Some(unsigned) => format!("-{symbol}{unsigned}"),
        None => format!("{symbol}{formatted}"),
    }
}
