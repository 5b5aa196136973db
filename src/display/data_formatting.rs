use jiff::Timestamp;
use jiff::civil::DateTime;

/// Format a server timestamp for display.
///
/// The API emits naive ISO datetimes (`2024-03-01T10:15:00.123456`); values
/// with an offset are shown in UTC. Anything unparseable is returned as-is.
///
/// # Examples
///
/// ```
/// use tickkk::display::format_timestamp;
///
/// assert_eq!(format_timestamp("2024-03-01T10:15:00.123456"), "2024-03-01 10:15");
/// assert_eq!(format_timestamp("2024-03-01T10:15:00Z"), "2024-03-01 10:15");
/// assert_eq!(format_timestamp("yesterday"), "yesterday");
/// ```
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts.strftime("%Y-%m-%d %H:%M").to_string();
    }
    match raw.parse::<DateTime>() {
        Ok(dt) => dt.strftime("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Format a date string for display
///
/// Extracts just the date part (YYYY-MM-DD) from an ISO datetime string.
/// If the string is too short, returns it unchanged.
///
/// # Examples
///
/// ```
/// use tickkk::display::format_date_for_display;
///
/// assert_eq!(format_date_for_display("2024-01-15T10:30:00"), "2024-01-15");
/// assert_eq!(format_date_for_display("short"), "short");
/// ```
pub fn format_date_for_display(date_str: &str) -> String {
    match date_str.get(..10) {
        Some(date) => date.to_string(),
        None => date_str.to_string(),
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
