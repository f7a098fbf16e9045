/// Whole-dollar USD figure with thousands separators, e.g. `$1,234,568`.
pub fn format_currency(value: f64) -> String {
    let dollars = value.abs().round();
    if !dollars.is_finite() {
        return "$NaN".to_string();
    }

    let digits = format!("{dollars:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0.0 && dollars > 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
