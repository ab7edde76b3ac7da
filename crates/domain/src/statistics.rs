use chrono::{DateTime, Utc};

use crate::WorkoutRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeTrend {
    Flat,
    Up(f64),
    Down(f64),
}

#[must_use]
pub fn total_volume(records: &[WorkoutRecord]) -> f64 {
    records.iter().map(WorkoutRecord::volume).sum()
}

/// Volume of completed workouts in chronological order.
#[must_use]
pub fn volume_series(records: &[WorkoutRecord]) -> Vec<(DateTime<Utc>, f64)> {
    let mut series = records
        .iter()
        .filter(|r| r.completed)
        .map(|r| (r.date, r.volume()))
        .collect::<Vec<_>>();
    series.sort_by_key(|(date, _)| *date);
    series
}

/// Relative change between the last two values of a chronological series in percent.
#[must_use]
pub fn volume_trend(series: &[(DateTime<Utc>, f64)]) -> VolumeTrend {
    let [.., (_, previous), (_, last)] = series else {
        return VolumeTrend::Flat;
    };

    if previous.abs() < f64::EPSILON {
        return VolumeTrend::Flat;
    }

    let percentage = (last - previous) / previous * 100.0;

    if percentage >= 0.0 {
        VolumeTrend::Up(percentage)
    } else {
        VolumeTrend::Down(percentage.abs())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::Workout;

    use super::*;

    static DATE: std::sync::LazyLock<DateTime<Utc>> =
        std::sync::LazyLock::new(|| Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap());

    fn record(id: &str, days: i64, total_volume: f64, completed: bool) -> WorkoutRecord {
        WorkoutRecord {
            id: id.into(),
            name: String::from("Workout"),
            date: *DATE + Duration::days(days),
            duration: None,
            total_volume: Some(total_volume),
            workout: Workout::default(),
            completed,
        }
    }

    #[test]
    fn test_total_volume() {
        assert_approx_eq!(
            total_volume(&[record("a", 0, 1000.0, true), record("b", 1, 250.5, true)]),
            1250.5
        );
        assert_approx_eq!(total_volume(&[]), 0.0);
    }

    #[test]
    fn test_volume_series() {
        let records = [
            record("a", 2, 300.0, true),
            record("b", 0, 100.0, true),
            record("c", 1, 200.0, false),
        ];
        assert_eq!(
            volume_series(&records),
            vec![
                (*DATE, 100.0),
                (*DATE + Duration::days(2), 300.0)
            ]
        );
    }

    #[rstest]
    #[case(&[], VolumeTrend::Flat)]
    #[case(&[1000.0], VolumeTrend::Flat)]
    #[case(&[0.0, 1000.0], VolumeTrend::Flat)]
    #[case(&[1000.0, 1000.0], VolumeTrend::Up(0.0))]
    #[case(&[500.0, 1000.0, 1500.0], VolumeTrend::Up(50.0))]
    #[case(&[1000.0, 750.0], VolumeTrend::Down(25.0))]
    fn test_volume_trend(#[case] volumes: &[f64], #[case] expected: VolumeTrend) {
        let series = volumes
            .iter()
            .zip(0..)
            .map(|(volume, day)| (*DATE + Duration::days(day), *volume))
            .collect::<Vec<_>>();
        assert_eq!(volume_trend(&series), expected);
    }
}
