//! Date arguments and day labels

use chrono::{Duration, NaiveDate};

use crate::cli::CliError;

/// Parse a `--date` value relative to `today`
///
/// `none` yields an undated item.
pub fn parse_date_arg(raw: &str, today: NaiveDate) -> Result<Option<NaiveDate>, CliError> {
    match raw.trim().to_lowercase().as_str() {
        "today" => Ok(Some(today)),
        "tomorrow" => Ok(Some(today + Duration::days(1))),
        "yesterday" => Ok(Some(today - Duration::days(1))),
        "none" | "" => Ok(None),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| CliError::InvalidDate(raw.to_string())),
    }
}

/// Human label for a day, naming the ones next to `today`
pub fn format_day(date: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(date) = date else {
        return "No date".to_string();
    };
    let name = match (date - today).num_days() {
        0 => Some("Today"),
        1 => Some("Tomorrow"),
        -1 => Some("Yesterday"),
        _ => None,
    };
    match name {
        Some(name) => format!("{name} ({date})"),
        None => date.format("%a %Y-%m-%d").to_string(),
    }
}
