//! Display formatting for durations, sizes and page ranges.

/// `m:ss.mmm` for a millisecond offset. Negative input is treated as zero.
pub fn format_ms(ms: i64) -> String {
    let ms = ms.max(0);
    let total_secs = ms / 1000;
    let minutes = total_secs / 60;
    let secs = total_secs % 60;
    let millis = ms % 1000;
    format!("{minutes}:{secs:02}.{millis:03}")
}

/// `m:ss` for a media position in seconds; non-finite or negative input
/// renders as `0:00`.
pub fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// One-decimal megabytes, e.g. `3.4 MB`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// `Sahifalar: 3` or `Sahifalar: 3–5`; `None` without a start page.
pub fn page_range_label(start: Option<i64>, end: Option<i64>) -> Option<String> {
    let start = start?;
    match end {
        Some(end) if end != start => Some(format!("Sahifalar: {start}–{end}")),
        _ => Some(format!("Sahifalar: {start}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_is_fully_padded() {
        assert_eq!(format_ms(0), "0:00.000");
    }

    #[test]
    fn minute_boundary_and_millis() {
        assert_eq!(format_ms(61_500), "1:01.500");
        assert_eq!(format_ms(59_999), "0:59.999");
        assert_eq!(format_ms(600_007), "10:00.007");
    }

    #[test]
    fn negative_offsets_clamp_to_zero() {
        assert_eq!(format_ms(-20), "0:00.000");
    }

    #[test]
    fn seconds_formatting_handles_unknown_duration() {
        assert_eq!(format_seconds(f64::NAN), "0:00");
        assert_eq!(format_seconds(f64::INFINITY), "0:00");
        assert_eq!(format_seconds(125.9), "2:05");
    }

    #[test]
    fn megabytes_use_one_decimal() {
        assert_eq!(format_megabytes(3 * 1024 * 1024 + 400 * 1024), "3.4 MB");
    }

    #[test]
    fn page_range_collapses_single_page() {
        assert_eq!(page_range_label(None, Some(4)), None);
        assert_eq!(page_range_label(Some(4), None).as_deref(), Some("Sahifalar: 4"));
        assert_eq!(page_range_label(Some(4), Some(4)).as_deref(), Some("Sahifalar: 4"));
        assert_eq!(page_range_label(Some(4), Some(6)).as_deref(), Some("Sahifalar: 4–6"));
    }
}
