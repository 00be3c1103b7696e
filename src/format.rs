//! Display formatting for prices, volumes and changes.

/// Formats a US-dollar amount.
///
/// Values below 1 get four decimal places, everything else two, with
/// thousands separators. When `abbreviated` is set, values of a thousand or
/// more are scaled and suffixed with `K`, `M` or `B` instead.
pub fn format_currency(value: f64, abbreviated: bool) -> String {
    if abbreviated && let Some(short) = abbreviate(value) {
        return format!("${short}");
    }

    let decimals = if value < 1.0 { 4 } else { 2 };
    let digits = group_thousands(&format!("{:.*}", decimals, value.abs()));
    if value.is_sign_negative() && value != 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Formats a quantity with the same `K`/`M`/`B` abbreviation and no currency sign.
pub fn format_volume(value: f64) -> String {
    abbreviate(value).unwrap_or_else(|| format!("{value:.0}"))
}

/// Formats a price change as `+$12.34 (1.23%)`.
pub fn format_change(change: f64, percent: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{} ({percent:.2}%)", format_currency(change, false))
}

/// Formats a percentage with two decimal places.
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}

fn abbreviate(value: f64) -> Option<String> {
    if value >= 1e9 {
        Some(format!("{:.2}B", value / 1e9))
    } else if value >= 1e6 {
        Some(format!("{:.2}M", value / 1e6))
    } else if value >= 1e3 {
        Some(format!("{:.2}K", value / 1e3))
    } else {
        None
    }
}

/// Inserts commas into the integer part of an unsigned decimal string.
fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(number.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
