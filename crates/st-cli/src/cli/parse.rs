//! clap value parsers for arguments without a `FromStr` of their own.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// Reject titles that are empty after trimming.
pub fn title(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("title must not be blank".into());
    }
    Ok(trimmed.to_owned())
}

/// Parse a due date in UTC.
///
/// Accepts RFC 3339 (`2026-03-01T09:00:00Z`), `YYYY-MM-DD HH:MM`,
/// `YYYY-MM-DD` (midnight), or a relative `+<n><m|h|d>` from now.
pub fn due(raw: &str) -> Result<DateTime<Utc>, String> {
    due_from(raw, Utc::now())
}

fn due_from(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Some(relative) = raw.strip_prefix('+') {
        return relative_offset(relative).and_then(|delta| {
            now.checked_add_signed(delta)
                .ok_or_else(|| format!("invalid relative due date '+{relative}': out of range"))
        });
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(format!(
        "invalid due date '{raw}': expected RFC 3339, 'YYYY-MM-DD HH:MM', 'YYYY-MM-DD' or '+2h'"
    ))
}

fn relative_offset(raw: &str) -> Result<TimeDelta, String> {
    let invalid = || format!("invalid relative due date '+{raw}'");
    let mut chars = raw.chars();
    let unit = chars.next_back().ok_or_else(invalid)?;
    let amount: i64 = chars.as_str().parse().map_err(|_| invalid())?;
    let delta = match unit {
        'm' => TimeDelta::try_minutes(amount),
        'h' => TimeDelta::try_hours(amount),
        'd' => TimeDelta::try_days(amount),
        _ => return Err(format!("invalid relative unit in '+{raw}': use m, h or d")),
    };
    delta.ok_or_else(invalid)
}
