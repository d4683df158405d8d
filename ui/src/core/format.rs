//! Formatting helpers for presenting stats and shares.

/// Raw stat with thousands separators, e.g. `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_share(value: f64) -> String {
    format!("{value:.1}%")
}

/// Signed deviation, e.g. `+15.0`, `-2.5`, `0.0`.
pub fn format_diff(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}")
    } else {
        format!("{value:.1}")
    }
}

/// Target percentages print without a trailing `.0`, the way they were typed.
pub fn format_target(value: f64) -> String {
    format!("{value}%")
}
