//! Duration formatting helpers.

/// Label used when no duration can be computed.
pub const UNKNOWN_DURATION_LABEL: &str = "Unknown";

/// Format a duration in milliseconds as `mm:ss`.
///
/// Minutes are not wrapped at 60, so a 75 minute video reads `75:00`.
/// `None` yields [`UNKNOWN_DURATION_LABEL`].
///
/// # Examples
/// ```
/// use lingo_models::timestamp::format_duration_label;
/// assert_eq!(format_duration_label(Some(90_000)), "01:30");
/// assert_eq!(format_duration_label(None), "Unknown");
/// ```
pub fn format_duration_label(duration_ms: Option<u64>) -> String {
    match duration_ms {
        Some(ms) => {
            let total_secs = ms / 1000;
            format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
        }
        None => UNKNOWN_DURATION_LABEL.to_string(),
    }
}

/// Convert milliseconds to whole seconds, rounding partial seconds up.
pub fn millis_to_whole_seconds(ms: u64) -> u64 {
    ms.div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_label() {
        assert_eq!(format_duration_label(Some(0)), "00:00");
        assert_eq!(format_duration_label(Some(9_000)), "00:09");
        assert_eq!(format_duration_label(Some(61_500)), "01:01");
        assert_eq!(format_duration_label(Some(4_500_000)), "75:00");
        assert_eq!(format_duration_label(None), UNKNOWN_DURATION_LABEL);
    }

    #[test]
    fn test_millis_to_whole_seconds() {
        assert_eq!(millis_to_whole_seconds(0), 0);
        assert_eq!(millis_to_whole_seconds(9_000), 9);
        assert_eq!(millis_to_whole_seconds(9_001), 10);
        assert_eq!(millis_to_whole_seconds(999), 1);
    }
}
