use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Shown as the latest publish time when the catalog is empty.
pub const DEFAULT_LATEST_TIME: &str = "2025-01-05 09:00";

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a catalog publish time into a wall-clock timestamp.
///
/// Accepted forms: `2025-12-18`, `2025-12-18 14:28`, `2025-12-18 14:28:05`,
/// the same with a `T` separator, `2025-09` (first of the month) and full
/// RFC 3339. Returns `None` for empty or unrecognised input.
pub fn parse_publish_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    // Collapse any whitespace run between date and time into a single 'T'.
    let normalised = s.split_whitespace().collect::<Vec<_>>().join("T");

    const DATETIME_FMTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalised, fmt) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalised, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    // Year-month only.
    NaiveDate::parse_from_str(&format!("{normalised}-01"), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Milliseconds since the epoch for ordering purposes, `0` when unparseable.
pub fn publish_timestamp(s: &str) -> i64 {
    parse_publish_time(s)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

// ── Relative labels ───────────────────────────────────────────────────────────

/// Human label for how long ago `publish_time` was, relative to `now`.
///
/// Whole elapsed days map to 今天 / 昨天 / N天前; from 30 days on, months
/// are counted as 30 days and years as 365. Future times read as 今天.
/// Unparseable input is returned unchanged.
pub fn relative_time(publish_time: &str, now: NaiveDateTime) -> String {
    let Some(published) = parse_publish_time(publish_time) else {
        return publish_time.to_string();
    };

    let days = (now - published).num_days();
    match days {
        i64::MIN..=0 => "今天".to_string(),
        1 => "昨天".to_string(),
        2..=29 => format!("{days}天前"),
        30..=364 => format!("{}个月前", days / 30),
        _ => format!("{}年前", days / 365),
    }
}

/// Whether `publish_time` falls within the last `days` days of `now`.
///
/// Unparseable times are never recent.
pub fn within_days(publish_time: &str, now: NaiveDateTime, days: i64) -> bool {
    parse_publish_time(publish_time)
        .map(|published| published >= now - Duration::days(days))
        .unwrap_or(false)
}

/// Format a publish time as `M月D日 HH:MM`, dropping the year.
///
/// Unparseable input is returned unchanged.
pub fn format_latest_time(s: &str) -> String {
    match parse_publish_time(s) {
        Some(dt) => dt.format("%-m月%-d日 %H:%M").to_string(),
        None => s.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
