//! Display formatting
//!
//! Brazilian conventions (`R$ 1.234,56`) as used by the dashboard, plus a
//! label for unbounded profit/loss. The engine itself never formats.

use crate::core::Bound;

const CURRENCY_SYMBOL: &str = "R$";
const UNBOUNDED_LABEL: &str = "Ilimitado";

/// `1234.5` → `"1.234,50"` with 2 decimals
pub fn format_number(value: f64, decimals: usize) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// `-1234.5` → `"-R$ 1.234,50"`
pub fn format_currency(value: f64, decimals: usize) -> String {
    let number = format_number(value, decimals);
    match number.strip_prefix('-') {
        Some(abs) => format!("-{} {}", CURRENCY_SYMBOL, abs),
        None => format!("{} {}", CURRENCY_SYMBOL, number),
    }
}

/// Signed percent change: `1.234` → `"+1.23%"`. The value is already in percent.
pub fn format_percent(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.*}%", sign, decimals, value)
}

/// Currency amount, or the unbounded label
pub fn format_bound(bound: &Bound, decimals: usize) -> String {
    match bound {
        Bound::Bounded(v) => format_currency(*v, decimals),
        Bound::Unbounded => UNBOUNDED_LABEL.to_string(),
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("∞")
    } else if value == f64::NEG_INFINITY {
        Some("-∞")
    } else {
        None
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
