//! Display formatting for money and percentages. Values are only rounded here.

pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = amount.round();
    let whole = rounded.abs() as u64;
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, group_thousands(whole))
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.0}%", percent)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
