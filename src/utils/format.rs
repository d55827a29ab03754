/// Round to two decimal places, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render as `$1,234,567.89`. Negative values keep the sign after the dollar
/// sign (`$-1,234.50`).
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", round_to_cents(value).abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && round_to_cents(value) != 0.0 {
        "-"
    } else {
        ""
    };
    format!("${}{}.{}", sign, grouped, cents)
}
