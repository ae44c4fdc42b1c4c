/// Round to the nearest whole yuan (halves toward +∞) and group thousands
/// with commas.
///
/// # Examples
///
/// ```
/// use library_core::formatting::format_yuan;
///
/// assert_eq!(format_yuan(2099.9999999), "2,100");
/// assert_eq!(format_yuan(14000.0), "14,000");
/// assert_eq!(format_yuan(500.4), "500");
/// ```
pub fn format_yuan(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let floor = amount.floor();
    let rounded = if amount - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 {
        return "0".to_string();
    }

    // `{:.0}` keeps every digit even past u64::MAX.
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Render a monthly interval as `¥{min}-{max}/月`.
///
/// # Examples
///
/// ```
/// use library_core::formatting::format_monthly_range;
///
/// assert_eq!(format_monthly_range(3000.0, 10000.0), "¥3,000-10,000/月");
/// assert_eq!(format_monthly_range(2100.0, 9000.0), "¥2,100-9,000/月");
/// ```
pub fn format_monthly_range(min: f64, max: f64) -> String {
    format!("¥{}-{}/月", format_yuan(min), format_yuan(max))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
