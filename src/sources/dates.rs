use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;

/// Display formats used on the listing page, most common first
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

fn display_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}",
        )
        .expect("date pattern is valid")
    })
}

/// Find the first `Month D, YYYY` date in free text
pub fn find_display_date(text: &str) -> Option<&str> {
    display_date_regex().find(text).map(|m| m.as_str())
}

/// Parse a displayed date or a `datetime` attribute value.
///
/// Calendar dates without a time of day resolve to midnight UTC.
pub fn parse_display_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Some(dt.with_timezone(&Utc));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
