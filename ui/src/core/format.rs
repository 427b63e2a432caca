//! Formatting helpers for chart labels and tooltips.

/// One decimal place with a percent sign. Undefined values render as a dash,
/// never as `0.0%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}%"),
        _ => "–".to_string(),
    }
}

/// Percentage tick of an axis whose domain is 0..100.
pub fn format_tick_percent(value: f64) -> String {
    format!("{}%", format_number(value, 0))
}

/// Trust is rated 0..10 but shown as a share of 100.
pub fn format_trust_tick(score: f64) -> String {
    format_tick_percent(score * 10.0)
}

/// Fixed decimals with trailing zeros removed.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Integer count with thin-space digit grouping, e.g. `12 345`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
