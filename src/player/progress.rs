/// 秒数格式化为 `MM:SS`，两段都补零到 2 位，分钟不设上限。
///
/// 时长未知（NaN / 无穷）时为 `"00:00"`；负数按 0 处理。
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "00:00".to_owned();
    }
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{minutes:02}:{remaining:02}")
}

/// `"<elapsed> / <total>"`
pub fn progress_text(elapsed: f64, duration: f64) -> String {
    format!("{} / {}", format_time(elapsed), format_time(duration))
}

/// 播放进度百分比；时长未知或为 0 时没有意义，返回 None
pub fn playback_percent(elapsed: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration <= 0.0 || !elapsed.is_finite() {
        return None;
    }
    Some(elapsed / duration * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_both_parts() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(5.0), "00:05");
        assert_eq!(format_time(59.99), "00:59");
        assert_eq!(format_time(60.0), "01:00");
        assert_eq!(format_time(754.4), "12:34");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn minutes_are_unbounded() {
        assert_eq!(format_time(6000.0), "100:00");
    }

    #[test]
    fn nan_is_zero() {
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn matches_floor_arithmetic_over_an_hour() {
        for s in 0..3600u32 {
            let expected = format!("{:02}:{:02}", s / 60, s % 60);
            assert_eq!(format_time(f64::from(s) + 0.5), expected);
        }
    }

    #[test]
    fn progress_text_with_unknown_duration() {
        assert_eq!(progress_text(65.0, f64::NAN), "01:05 / 00:00");
        assert_eq!(progress_text(65.0, 200.0), "01:05 / 03:20");
    }

    #[test]
    fn percent() {
        assert_eq!(playback_percent(30.0, 120.0), Some(25.0));
        assert_eq!(playback_percent(30.0, f64::NAN), None);
        assert_eq!(playback_percent(30.0, 0.0), None);
    }
}
