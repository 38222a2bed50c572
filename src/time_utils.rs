// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current UTC calendar day. Meal dates and streaks are compared at day
/// granularity only.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Current wall-clock time for display on a meal card, e.g. "07:30 AM".
pub fn display_time_now() -> String {
    Utc::now().format("%I:%M %p").to_string()
}

/// Parse an ISO calendar date (`YYYY-MM-DD`), rejecting anything with a time
/// component.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
