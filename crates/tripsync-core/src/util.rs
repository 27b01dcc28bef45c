//! Small text and time helpers shared across the crate.

/// Trim an optional string, mapping whitespace-only values to `None`.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// True for values carrying an explicit `http://` or `https://` scheme.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Clip a response body down to a length fit for an error message.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Current Unix timestamp in milliseconds, the `lastUpdated` stamp unit.
pub fn unix_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_drops_blank_values() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("  \t ".to_string())), None);
        assert_eq!(
            normalize_text_option(Some(" https://project.supabase.co ".to_string())),
            Some("https://project.supabase.co".to_string())
        );
    }

    #[test]
    fn is_http_url_requires_a_scheme() {
        assert!(is_http_url("http://localhost:54321"));
        assert!(is_http_url("https://project.supabase.co"));
        assert!(!is_http_url("wss://project.supabase.co"));
        assert!(!is_http_url("project.supabase.co"));
    }

    #[test]
    fn compact_text_bounds_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(compact_text(&body).chars().count(), 180);
        assert_eq!(compact_text("  short  "), "short");
    }
}
