// Date and label helpers shared by the list and detail views

use chrono::{NaiveDate, NaiveTime};

use crate::models::settings::{DateFormat, TimeFormat};
use crate::utils::constants::MB;

/// Lenient parse of the dates the backend hands out: plain `YYYY-MM-DD`,
/// naive ISO timestamps and RFC 3339 all start with the calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::MonthFirst => "%m/%d/%Y",
        DateFormat::DayFirst => "%d/%m/%Y",
        DateFormat::Iso => "%Y-%m-%d",
    };
    date.format(pattern).to_string()
}

/// Display form of a raw backend date; unparsable values are shown as-is
pub fn format_display_date(raw: Option<&str>, format: DateFormat) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => "N/A".to_string(),
        Some(value) => parse_date(value)
            .map(|date| format_date(date, format))
            .unwrap_or_else(|| value.to_string()),
    }
}

pub fn format_time(raw: &str, format: TimeFormat) -> String {
    let parsed = NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"));
    match (parsed, format) {
        (Ok(time), TimeFormat::H24) => time.format("%H:%M").to_string(),
        (Ok(time), TimeFormat::H12) => time.format("%-I:%M %p").to_string(),
        (Err(_), _) => raw.to_string(),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

/// Joins the non-empty fragments with `separator`
pub fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
