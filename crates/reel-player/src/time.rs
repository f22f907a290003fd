//! Time formatting

/// Render seconds as `m:ss`.
///
/// Minutes are unpadded and both fields truncate. Unknown, zero or negative
/// values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// `current / duration` label
pub fn time_label(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

/// Progress as a percentage of duration, or `None` while duration is unknown
pub fn progress_percent(current: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return None;
    }
    Some(current / duration * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn test_format_time_truncates() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(0.4), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn test_progress_percent_in_range() {
        let cases = [(0.0, 10.0), (2.5, 10.0), (10.0, 10.0), (1.0, 3.0), (47.3, 212.9)];
        for (t, d) in cases {
            assert_eq!(progress_percent(t, d), Some(t / d * 100.0));
        }
    }

    #[test]
    fn test_progress_percent_unknown_duration() {
        assert_eq!(progress_percent(3.0, f64::NAN), None);
        assert_eq!(progress_percent(0.0, 0.0), None);
    }

    #[test]
    fn test_time_label() {
        assert_eq!(time_label(5.0, 125.0), "0:05 / 2:05");
        assert_eq!(time_label(0.0, f64::NAN), "0:00 / 0:00");
    }
}
