use crate::WeightUnit;

/// `MM:SS`, or `HH:MM:SS` from one hour.
#[must_use]
pub fn format_elapsed_time(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[must_use]
pub fn format_duration(seconds: Option<u32>) -> String {
    let seconds = seconds.unwrap_or(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Volume with thousands separators and at most three decimal places.
#[must_use]
pub fn format_volume(volume: f64) -> String {
    let formatted = format!("{:.3}", volume.abs());
    let (integer, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut result = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if !fraction.is_empty() {
        result.push('.');
        result.push_str(fraction);
    }
    if volume < 0.0 && result != "0" {
        result.insert(0, '-');
    }
    result
}

#[must_use]
pub fn format_completion_summary(total_volume: f64, duration: u32, unit: WeightUnit) -> String {
    format!(
        "Total volume: {} {unit} • Duration: {}",
        format_volume(total_volume),
        format_elapsed_time(duration)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "00:00")]
    #[case(59, "00:59")]
    #[case(2710, "45:10")]
    #[case(3599, "59:59")]
    #[case(3600, "01:00:00")]
    #[case(45_296, "12:34:56")]
    fn test_format_elapsed_time(#[case] seconds: u32, #[case] expected: &str) {
        assert_eq!(format_elapsed_time(seconds), expected);
    }

    #[rstest]
    #[case(None, "0m")]
    #[case(Some(0), "0m")]
    #[case(Some(59), "0m")]
    #[case(Some(2710), "45m")]
    #[case(Some(5400), "1h 30m")]
    fn test_format_duration(#[case] seconds: Option<u32>, #[case] expected: &str) {
        assert_eq!(format_duration(seconds), expected);
    }

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(1000.0, "1,000")]
    #[case(1726.0, "1,726")]
    #[case(1_234_567.5, "1,234,567.5")]
    #[case(12.3456, "12.346")]
    #[case(-1500.0, "-1,500")]
    fn test_format_volume(#[case] volume: f64, #[case] expected: &str) {
        assert_eq!(format_volume(volume), expected);
    }

    #[rstest]
    #[case(WeightUnit::Lbs, "Total volume: 1,000 lbs • Duration: 45:10")]
    #[case(WeightUnit::Kg, "Total volume: 1,000 kg • Duration: 45:10")]
    fn test_format_completion_summary(#[case] unit: WeightUnit, #[case] expected: &str) {
        assert_eq!(format_completion_summary(1000.0, 2710, unit), expected);
    }
}
