use chrono::{DateTime, Local, NaiveDateTime};

/// Placeholder for absent values in the stats view.
pub const NOT_AVAILABLE: &str = "N/A";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Size in megabytes with two decimals, e.g. "1.50 MB"
pub fn fmt_size_mb(size_mb: f64) -> String {
    let v = if size_mb.is_finite() && size_mb > 0.0 { size_mb } else { 0.0 };
    format!("{:.2} MB", v)
}

/// Formats a store timestamp in the viewer's local time.
///
/// Timestamps with an offset (`2024-05-01T10:00:00Z`, `+02:00`) are converted to local
/// time. Naive timestamps (`2024-05-01T10:00:00`, `2024-05-01 10:00:00.123`) are taken
/// as already local, like a browser's `Date` parser does. Anything else is shown as-is.
pub fn fmt_timestamp(raw: &str) -> String {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}

pub fn fmt_timestamp_opt(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.trim().is_empty() => fmt_timestamp(s),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_has_two_decimals() {
        assert_eq!(fmt_size_mb(1.5), "1.50 MB");
        assert_eq!(fmt_size_mb(0.004), "0.00 MB");
        assert_eq!(fmt_size_mb(12.345), "12.35 MB");
        assert_eq!(fmt_size_mb(f64::NAN), "0.00 MB");
    }

    #[test]
    fn naive_timestamps_keep_wall_clock() {
        assert_eq!(fmt_timestamp("2024-05-01T10:00:00"), "2024-05-01 10:00:00");
        assert_eq!(fmt_timestamp("2024-05-01 10:00:00.123456"), "2024-05-01 10:00:00");
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(fmt_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn absent_timestamp_is_na() {
        assert_eq!(fmt_timestamp_opt(None), "N/A");
        assert_eq!(fmt_timestamp_opt(Some("  ")), "N/A");
        assert_ne!(fmt_timestamp_opt(Some("2024-05-01T10:00:00Z")), "N/A");
    }
}
