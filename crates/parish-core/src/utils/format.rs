const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or empty
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d") {
        // Also covers "2025-03-01T10:00:00" without an offset
        d.format("%b %d, %Y").to_string()
    } else {
        date.to_string()
    }
}

/// English month name for `"3"`, `"03"`, or `"MARCH"`; anything else is returned as given
pub fn month_name(month: &str) -> String {
    let trimmed = month.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        if (1..=12).contains(&n) {
            return MONTHS[n - 1].to_string();
        }
        return month.to_string();
    }
    MONTHS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(trimmed))
        .map(|name| name.to_string())
        .unwrap_or_else(|| month.to_string())
}
