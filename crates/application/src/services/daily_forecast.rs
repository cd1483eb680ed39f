//! Daily forecast aggregation
//!
//! Folds the upstream 3-hour sample series into per-calendar-day summaries.
//! Samples falling on the caller's "today" are excluded so the daily strip
//! complements a separately shown current-day panel. Buckets keep their
//! first-encountered order, which is ascending date order for the
//! chronologically ordered upstream series.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::{RawSample, WeatherCondition};

/// Maximum number of daily summaries emitted
pub const DAILY_WINDOW: usize = 5;

/// Minimum and maximum temperature observed over one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// Lowest contributing sample minimum
    pub min: f64,
    /// Highest contributing sample maximum
    pub max: f64,
}

/// Aggregated forecast for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date in the aggregation timezone
    pub date: NaiveDate,
    /// Temperature extremes across the day's samples
    pub temperature: TemperatureRange,
    /// Condition of the latest sample folded into the day
    pub condition: WeatherCondition,
    /// Humidity snapshot from the day's first sample, percent
    pub humidity: u8,
    /// Wind speed snapshot from the day's first sample
    pub wind_speed: f64,
    /// Total rain plus snow volume, mm, rounded to one decimal
    pub precipitation_mm: f64,
    /// Peak probability of precipitation across the day, percent
    pub precipitation_probability: u8,
}

/// Per-day accumulator, alive only during the fold
#[derive(Debug)]
struct DailyBucket {
    date: NaiveDate,
    temperature_min: f64,
    temperature_max: f64,
    condition: WeatherCondition,
    humidity: u8,
    wind_speed: f64,
    precipitation_mm: f64,
    precipitation_probability: u8,
    samples: u32,
}

impl DailyBucket {
    fn seed(date: NaiveDate, sample: &RawSample) -> Self {
        Self {
            date,
            temperature_min: sample.temperature_min,
            temperature_max: sample.temperature_max,
            condition: sample.condition.clone(),
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
            precipitation_mm: sample.precipitation_mm(),
            precipitation_probability: sample.probability_percent(),
            samples: 1,
        }
    }

    fn fold(&mut self, sample: &RawSample) {
        self.temperature_min = self.temperature_min.min(sample.temperature_min);
        self.temperature_max = self.temperature_max.max(sample.temperature_max);
        self.precipitation_mm += sample.precipitation_mm();
        self.precipitation_probability = self
            .precipitation_probability
            .max(sample.probability_percent());
        // latest-in-day observation wins
        self.condition = sample.condition.clone();
        self.samples += 1;
    }

    fn into_summary(self) -> DailySummary {
        DailySummary {
            date: self.date,
            temperature: TemperatureRange {
                min: self.temperature_min,
                max: self.temperature_max,
            },
            condition: self.condition,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            precipitation_mm: (self.precipitation_mm * 10.0).round() / 10.0,
            precipitation_probability: self.precipitation_probability,
        }
    }
}

/// Aggregate a 3-hour sample series into at most [`DAILY_WINDOW`] daily
/// summaries
///
/// `today` and the date keys are both calendar dates in `zone`; samples dated
/// `today` are skipped entirely. Days without samples simply produce no
/// bucket. An empty series yields an empty output.
#[must_use]
pub fn aggregate_daily(samples: &[RawSample], today: NaiveDate, zone: Tz) -> Vec<DailySummary> {
    let mut buckets: Vec<DailyBucket> = Vec::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(&zone).date_naive();
        if date == today {
            continue;
        }
        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.fold(sample),
            None => buckets.push(DailyBucket::seed(date, sample)),
        }
    }

    let folded: u32 = buckets.iter().map(|bucket| bucket.samples).sum();
    debug!(
        samples = samples.len(),
        folded,
        days = buckets.len(),
        "aggregated daily forecast"
    );

    buckets
        .into_iter()
        .take(DAILY_WINDOW)
        .map(DailyBucket::into_summary)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Tz;

    use super::*;
    use crate::ports::PrecipitationVolume;

    fn condition(id: u16, group: &str) -> WeatherCondition {
        WeatherCondition {
            id,
            group: group.to_string(),
            description: group.to_lowercase(),
            icon: "01d".to_string(),
        }
    }

    fn sample_at(timestamp: DateTime<Utc>, min: f64, max: f64) -> RawSample {
        RawSample {
            timestamp,
            temperature: (min + max) / 2.0,
            feels_like: None,
            temperature_min: min,
            temperature_max: max,
            humidity: 50,
            pressure: Some(1010),
            wind_speed: 5.0,
            wind_direction: Some(200),
            cloud_cover: Some(40),
            rain: None,
            snow: None,
            precipitation_probability: None,
            condition: condition(800, "Clear"),
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const UTC_ZONE: Tz = chrono_tz::UTC;

    #[test]
    fn empty_input_yields_empty_output() {
        let summaries = aggregate_daily(&[], date(2024, 5, 10), UTC_ZONE);
        assert!(summaries.is_empty());
    }

    #[test]
    fn todays_samples_are_excluded() {
        let samples = vec![
            sample_at(utc(2024, 5, 10, 9), 10.0, 15.0),
            sample_at(utc(2024, 5, 10, 12), 11.0, 16.0),
            sample_at(utc(2024, 5, 11, 9), 9.0, 14.0),
        ];

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, date(2024, 5, 11));
    }

    #[test]
    fn output_is_capped_at_five_days() {
        let mut samples = Vec::new();
        for day in 11..=17 {
            samples.push(sample_at(utc(2024, 5, day, 9), 10.0, 15.0));
        }

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries.len(), DAILY_WINDOW);
        assert_eq!(summaries[0].date, date(2024, 5, 11));
        assert_eq!(summaries[4].date, date(2024, 5, 15));
    }

    #[test]
    fn fewer_days_than_cap_returns_what_exists() {
        let samples = vec![
            sample_at(utc(2024, 5, 11, 9), 10.0, 15.0),
            sample_at(utc(2024, 5, 12, 9), 10.0, 15.0),
        ];

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries.len(), 2);
    }

    #[test]
    fn temperature_extremes_are_exact() {
        let samples = vec![
            sample_at(utc(2024, 5, 11, 3), 8.0, 12.0),
            sample_at(utc(2024, 5, 11, 9), 6.5, 17.0),
            sample_at(utc(2024, 5, 11, 15), 9.0, 15.5),
        ];

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries.len(), 1);
        assert!((summaries[0].temperature.min - 6.5).abs() < f64::EPSILON);
        assert!((summaries[0].temperature.max - 17.0).abs() < f64::EPSILON);
    }

    #[test]
    fn latest_sample_condition_wins() {
        let mut first = sample_at(utc(2024, 5, 11, 6), 10.0, 15.0);
        first.condition = condition(800, "Clear");
        let mut second = sample_at(utc(2024, 5, 11, 18), 10.0, 15.0);
        second.condition = condition(500, "Rain");

        let summaries = aggregate_daily(&[first, second], date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries[0].condition.id, 500);
        assert_eq!(summaries[0].condition.group, "Rain");
    }

    #[test]
    fn humidity_and_wind_keep_first_sample_snapshot() {
        let mut first = sample_at(utc(2024, 5, 11, 6), 10.0, 15.0);
        first.humidity = 80;
        first.wind_speed = 2.0;
        let mut second = sample_at(utc(2024, 5, 11, 18), 10.0, 15.0);
        second.humidity = 30;
        second.wind_speed = 9.0;

        let summaries = aggregate_daily(&[first, second], date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries[0].humidity, 80);
        assert!((summaries[0].wind_speed - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn precipitation_accumulates_and_rounds() {
        let mut first = sample_at(utc(2024, 5, 11, 6), 10.0, 15.0);
        first.rain = Some(PrecipitationVolume {
            three_hour: Some(0.1),
            one_hour: None,
        });
        let mut second = sample_at(utc(2024, 5, 11, 9), 10.0, 15.0);
        second.rain = Some(PrecipitationVolume {
            three_hour: Some(0.2),
            one_hour: None,
        });
        let mut third = sample_at(utc(2024, 5, 11, 12), 10.0, 15.0);
        third.snow = Some(PrecipitationVolume {
            three_hour: None,
            one_hour: Some(1.25),
        });

        let summaries = aggregate_daily(&[first, second, third], date(2024, 5, 10), UTC_ZONE);
        // 0.1 + 0.2 + 1.25 = 1.55, rounded to one decimal
        assert!((summaries[0].precipitation_mm - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn probability_is_running_maximum() {
        let mut first = sample_at(utc(2024, 5, 11, 6), 10.0, 15.0);
        first.precipitation_probability = Some(0.7);
        let mut second = sample_at(utc(2024, 5, 11, 12), 10.0, 15.0);
        second.precipitation_probability = Some(0.2);
        let mut third = sample_at(utc(2024, 5, 11, 18), 10.0, 15.0);
        third.precipitation_probability = None;

        let summaries = aggregate_daily(&[first, second, third], date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries[0].precipitation_probability, 70);
    }

    #[test]
    fn day_gaps_produce_no_synthetic_buckets() {
        let samples = vec![
            sample_at(utc(2024, 5, 11, 9), 10.0, 15.0),
            sample_at(utc(2024, 5, 13, 9), 10.0, 15.0),
        ];

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].date, date(2024, 5, 11));
        assert_eq!(summaries[1].date, date(2024, 5, 13));
    }

    #[test]
    fn dates_are_bucketed_in_the_given_zone() {
        // 23:30 UTC on the 10th is already the 11th in Berlin (UTC+2 in May)
        let berlin: Tz = chrono_tz::Europe::Berlin;
        let samples = vec![sample_at(
            Utc.with_ymd_and_hms(2024, 5, 10, 23, 30, 0).unwrap(),
            10.0,
            15.0,
        )];

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), berlin);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, date(2024, 5, 11));

        // the same instant in UTC still belongs to the excluded "today"
        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert!(summaries.is_empty());
    }

    #[test]
    fn sixteen_samples_spanning_five_calendar_days() {
        // 16 samples spanning today plus four complete future days
        let mut samples = Vec::new();
        for slot in 0..4 {
            samples.push(sample_at(utc(2024, 5, 10, slot * 3 + 9), 10.0, 15.0));
        }
        for day in 11..=14 {
            for slot in 0..3 {
                samples.push(sample_at(utc(2024, 5, day, slot * 6), 10.0, 15.0));
            }
        }
        assert_eq!(samples.len(), 16);

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        assert_eq!(summaries.len(), 4);
        let dates: Vec<NaiveDate> = summaries.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 5, 11),
                date(2024, 5, 12),
                date(2024, 5, 13),
                date(2024, 5, 14)
            ]
        );
    }

    #[test]
    fn output_order_is_ascending_date() {
        let mut samples = Vec::new();
        for day in 11..=15 {
            samples.push(sample_at(utc(2024, 5, day, 9), 10.0, 15.0));
        }

        let summaries = aggregate_daily(&samples, date(2024, 5, 10), UTC_ZONE);
        for pair in summaries.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::ports::WeatherCondition;

    fn arbitrary_series(
        days: usize,
        per_day: usize,
        mins: &[f64],
    ) -> (Vec<RawSample>, NaiveDate) {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut samples = Vec::new();
        let mut idx = 0;
        for day in 0..days {
            for slot in 0..per_day {
                let timestamp = Utc
                    .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
                    .unwrap()
                    + Duration::days(day as i64)
                    + Duration::hours((slot * 3) as i64);
                let min = mins[idx % mins.len()];
                samples.push(RawSample {
                    timestamp,
                    temperature: min + 2.0,
                    feels_like: None,
                    temperature_min: min,
                    temperature_max: min + 4.0,
                    humidity: 50,
                    pressure: None,
                    wind_speed: 3.0,
                    wind_direction: None,
                    cloud_cover: None,
                    rain: None,
                    snow: None,
                    precipitation_probability: None,
                    condition: WeatherCondition {
                        id: 800,
                        group: "Clear".to_string(),
                        description: "clear sky".to_string(),
                        icon: "01d".to_string(),
                    },
                });
                idx += 1;
            }
        }
        (samples, today)
    }

    proptest! {
        #[test]
        fn summary_count_is_min_of_days_and_cap(
            days in 0usize..9,
            per_day in 1usize..5,
        ) {
            let (samples, today) = arbitrary_series(days, per_day, &[10.0]);
            let summaries = aggregate_daily(&samples, today, chrono_tz::UTC);
            prop_assert_eq!(summaries.len(), days.min(DAILY_WINDOW));
        }

        #[test]
        fn minimum_is_exact_over_contributing_samples(
            mins in proptest::collection::vec(-30.0f64..40.0, 1..16),
        ) {
            let (samples, today) = arbitrary_series(1, mins.len(), &mins);
            let summaries = aggregate_daily(&samples, today, chrono_tz::UTC);
            prop_assert_eq!(summaries.len(), 1);

            let expected_min = mins.iter().copied().fold(f64::INFINITY, f64::min);
            let expected_max = mins.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 4.0;
            prop_assert!((summaries[0].temperature.min - expected_min).abs() < 1e-9);
            prop_assert!((summaries[0].temperature.max - expected_max).abs() < 1e-9);
        }

        #[test]
        fn precipitation_never_negative(
            days in 1usize..6,
            per_day in 1usize..5,
        ) {
            let (samples, today) = arbitrary_series(days, per_day, &[5.0]);
            for summary in aggregate_daily(&samples, today, chrono_tz::UTC) {
                prop_assert!(summary.precipitation_mm >= 0.0);
            }
        }
    }
}
