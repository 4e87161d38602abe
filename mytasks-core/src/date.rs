//! Deadline parsing and formatting
//!
//! Two entry points:
//! - [`parse_deadline`] reads a stored deadline. Absolute formats only, so a
//!   stored value means the same date tomorrow as it does today.
//! - [`parse_date`] reads what a user typed into the deadline field and also
//!   understands relative input: "today", "tomorrow", "friday",
//!   "next monday", "in 3 days", "Jan 25".

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::error::{CoreError, Result};

/// Canonical storage format, the same one an HTML date picker produces
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

const ABSOLUTE_FORMATS: [&str; 4] = [DEADLINE_FORMAT, "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a stored deadline string
///
/// Empty or unrecognised input gives `None`.
pub fn parse_deadline(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    ABSOLUTE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// Parse user input for a deadline relative to `today`
pub fn parse_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim().to_lowercase();

    if let Some(date) = try_parse_relative(&input, today) {
        return Ok(date);
    }

    if let Some(date) = try_parse_weekday(&input, today) {
        return Ok(date);
    }

    if let Some(date) = try_parse_offset(&input, today) {
        return Ok(date);
    }

    if let Some(date) = parse_deadline(&input) {
        return Ok(date);
    }

    let formats = ["%b %d %Y", "%B %d %Y", "%d %b %Y", "%d %B %Y"];
    for format in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(&input, format) {
            return Ok(date);
        }
    }

    // Month and day without a year: the next time that day comes round
    let yearless = ["%b %d", "%B %d", "%m/%d"];
    for format in &yearless {
        let with_year = format!("{} {}", input, today.year());
        let format_with_year = format!("{} %Y", format);
        if let Ok(date) = NaiveDate::parse_from_str(&with_year, &format_with_year) {
            if date < today {
                return date
                    .with_year(today.year() + 1)
                    .ok_or_else(|| CoreError::parse(format!("date '{}': year out of range", input)));
            }
            return Ok(date);
        }
    }

    Err(CoreError::parse(format!(
        "date '{}', try 'tomorrow', 'Jan 25', '2026-01-25', 'next monday' or 'in 3 days'",
        input
    )))
}

/// Parse user input for a deadline relative to the local date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_date_from(input, Local::now().date_naive())
}

/// Turn typed deadline input into the value stored on the task
///
/// Recognised dates become `YYYY-MM-DD`; anything else is kept as typed
/// (trimmed). Empty input stays empty.
pub fn normalize_deadline(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match parse_date(trimmed) {
        Ok(date) => date.format(DEADLINE_FORMAT).to_string(),
        Err(_) => trimmed.to_string(),
    }
}

fn try_parse_relative(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    }
}

fn try_parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let weekday_str = input.strip_prefix("next ").unwrap_or(input);

    let target = match weekday_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    // Always strictly in the future: "monday" on a Monday means a week out
    let days = (target.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let days = if days == 0 { 7 } else { days };

    today.checked_add_days(Days::new(u64::from(days)))
}

fn try_parse_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let rest = input.strip_prefix("in ")?.trim();
    let parts: Vec<&str> = rest.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let num: u64 = parts[0].parse().ok()?;

    match parts[1] {
        "day" | "days" => today.checked_add_days(Days::new(num)),
        "week" | "weeks" => today.checked_add_days(Days::new(num.checked_mul(7)?)),
        _ => None,
    }
}

/// Format a deadline for human-readable display
///
/// Returns strings like: "Today", "Tomorrow", "Mon Jan 27", "Overdue (3 days ago)"
pub fn format_date_human(date: NaiveDate, today: NaiveDate) -> String {
    let diff = date.signed_duration_since(today).num_days();

    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=6 => date.format("%a %b %d").to_string(),
        7..=365 => date.format("%b %d").to_string(),
        _ if diff < 0 => format!("Overdue ({} days ago)", -diff),
        _ => date.format(DEADLINE_FORMAT).to_string(),
    }
}
