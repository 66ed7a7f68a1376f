//! Synthetic analytics generator: expands a campaign's lifetime impressions
//! and CTR into 30 days of daily metrics, audience breakdowns and an hourly
//! delivery curve.

use crate::bundle::{
    Bucket, CampaignAnalyticsBundle, DailyMetric, HourlyPerformance, DAILY_WINDOW_DAYS,
    HOURS_PER_DAY,
};
use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::debug;

/// (name, min, range): each bucket weight is `floor(min + U[0,1) * range)`.
const DEVICE_BUCKETS: &[(&str, u32, u32)] =
    &[("Desktop", 35, 20), ("Mobile", 30, 20), ("Tablet", 5, 10)];

const AGE_BUCKETS: &[(&str, u32, u32)] = &[
    ("18-24", 10, 15),
    ("25-34", 25, 15),
    ("35-44", 20, 15),
    ("45-54", 15, 10),
    ("55+", 5, 10),
];

const LOCATION_BUCKETS: &[(&str, u32, u32)] = &[
    ("United States", 40, 20),
    ("United Kingdom", 15, 10),
    ("Canada", 10, 10),
    ("Australia", 8, 7),
    ("Germany", 5, 5),
    ("Other", 5, 10),
];

const MALE_MIN: u32 = 40;
const MALE_RANGE: u32 = 20;

/// Hours (inclusive) during which delivery follows the half-sine hump.
const ACTIVE_HOURS: std::ops::RangeInclusive<u8> = 8..=22;
const OFF_HOURS_MULTIPLIER: f64 = 0.2;

/// Relative delivery weight for an hour of the day.
pub fn hourly_curve(hour: u8) -> f64 {
    if ACTIVE_HOURS.contains(&hour) {
        0.5 + 0.5 * (((hour as f64 - 8.0) / 14.0) * PI).sin()
    } else {
        OFF_HOURS_MULTIPLIER
    }
}

/// Generator with an explicit random source, so bundles are reproducible
/// when seeded.
pub struct MetricsSynthesizer {
    rng: StdRng,
}

impl MetricsSynthesizer {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, otherwise drawn from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Synthesize a bundle whose daily series ends on the current UTC date.
    pub fn synthesize(&mut self, base_impressions: f64, base_ctr: f64) -> CampaignAnalyticsBundle {
        self.synthesize_on(Utc::now().date_naive(), base_impressions, base_ctr)
    }

    pub fn synthesize_on(
        &mut self,
        today: NaiveDate,
        base_impressions: f64,
        base_ctr: f64,
    ) -> CampaignAnalyticsBundle {
        let bundle = CampaignAnalyticsBundle {
            daily_metrics: self.daily_metrics(today, base_impressions, base_ctr),
            device_breakdown: self.breakdown(DEVICE_BUCKETS),
            age_breakdown: self.breakdown(AGE_BUCKETS),
            gender_breakdown: self.gender_breakdown(),
            location_breakdown: self.breakdown(LOCATION_BUCKETS),
            hourly_performance: self.hourly_performance(base_impressions),
        };

        metrics::counter!("analytics.bundles_synthesized").increment(1);
        debug!(
            base_impressions,
            base_ctr,
            %today,
            "Synthesized campaign analytics bundle"
        );
        bundle
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn daily_metrics(
        &mut self,
        today: NaiveDate,
        base_impressions: f64,
        base_ctr: f64,
    ) -> Vec<DailyMetric> {
        let daily_base = base_impressions / DAILY_WINDOW_DAYS as f64;

        (0..DAILY_WINDOW_DAYS as u64)
            .rev()
            .map(|days_back| {
                let date = today.checked_sub_days(Days::new(days_back)).unwrap_or(today);

                let multiplier = 0.7 + self.unit() * 0.6;
                let impressions = (daily_base * multiplier).round().max(0.0) as u64;
                let ctr = base_ctr * (0.8 + self.unit() * 0.4);
                let clicks = (impressions as f64 * ctr / 100.0).round().max(0.0) as u64;
                let conversion_rate = 0.05 + self.unit() * 0.1;
                let conversions = (clicks as f64 * conversion_rate).round() as u64;
                let cost = (daily_base * multiplier * 0.01 * 100.0).round() / 100.0;

                DailyMetric {
                    date,
                    impressions,
                    clicks,
                    conversions,
                    ctr,
                    cost,
                }
            })
            .collect()
    }

    fn weight(&mut self, min: u32, range: u32) -> u32 {
        (min as f64 + self.unit() * range as f64).floor() as u32
    }

    fn breakdown(&mut self, spec: &[(&str, u32, u32)]) -> Vec<Bucket> {
        spec.iter()
            .map(|&(name, min, range)| Bucket {
                name: name.to_string(),
                value: self.weight(min, range),
            })
            .collect()
    }

    fn gender_breakdown(&mut self) -> Vec<Bucket> {
        let male = self.weight(MALE_MIN, MALE_RANGE);
        vec![
            Bucket {
                name: "Male".into(),
                value: male,
            },
            Bucket {
                name: "Female".into(),
                value: 100 - male,
            },
        ]
    }

    fn hourly_performance(&mut self, base_impressions: f64) -> Vec<HourlyPerformance> {
        let hourly_base = base_impressions / DAILY_WINDOW_DAYS as f64 / HOURS_PER_DAY as f64;

        (0..HOURS_PER_DAY as u8)
            .map(|hour| {
                let jitter = 1.0 + self.unit() * 0.5;
                let impressions =
                    (hourly_base * hourly_curve(hour) * jitter).round().max(0.0) as u64;
                let click_rate = 0.02 + self.unit() * 0.04;
                let clicks = (impressions as f64 * click_rate).round() as u64;
                HourlyPerformance {
                    hour,
                    impressions,
                    clicks,
                }
            })
            .collect()
    }
}

impl Default for MetricsSynthesizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    #[test]
    fn test_daily_dates_consecutive_ending_today() {
        let mut synth = MetricsSynthesizer::seeded(7);
        let bundle = synth.synthesize_on(today(), 125_000.0, 3.24);
        let daily = &bundle.daily_metrics;

        assert_eq!(daily.len(), 30);
        assert_eq!(daily.last().unwrap().date, today());
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
        for pair in daily.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
    }

    #[test]
    fn test_daily_series_crosses_month_and_year() {
        let mut synth = MetricsSynthesizer::seeded(1);
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let bundle = synth.synthesize_on(new_year, 10_000.0, 2.0);
        assert_eq!(bundle.daily_metrics[0].date, NaiveDate::from_ymd_opt(2024, 12, 12).unwrap());
    }

    #[test]
    fn test_daily_derivations() {
        let mut synth = MetricsSynthesizer::seeded(42);
        let base = 280_000.0;
        let base_ctr = 2.87;
        let bundle = synth.synthesize_on(today(), base, base_ctr);

        for day in &bundle.daily_metrics {
            let daily_base = base / 30.0;
            assert!(day.impressions as f64 >= (daily_base * 0.7).floor());
            assert!(day.impressions as f64 <= (daily_base * 1.3).ceil());
            assert!(day.ctr >= base_ctr * 0.8 - 1e-9 && day.ctr <= base_ctr * 1.2 + 1e-9);
            assert_eq!(day.clicks, (day.impressions as f64 * day.ctr / 100.0).round() as u64);

            let low = (day.clicks as f64 * 0.05).round() as u64;
            let high = (day.clicks as f64 * 0.15).round() as u64;
            assert!(day.conversions >= low && day.conversions <= high);

            assert_eq!(day.cost, (day.cost * 100.0).round() / 100.0);
            assert!(day.cost >= daily_base * 0.7 * 0.01 - 0.01);
            assert!(day.cost <= daily_base * 1.3 * 0.01 + 0.01);
        }
    }

    #[test]
    fn test_gender_always_sums_to_100() {
        for seed in 0..200 {
            let mut synth = MetricsSynthesizer::seeded(seed);
            let bundle = synth.synthesize_on(today(), 1_000.0, 1.0);
            let genders = &bundle.gender_breakdown;
            assert_eq!(genders.len(), 2);
            assert_eq!(genders[0].name, "Male");
            assert_eq!(genders[1].name, "Female");
            assert_eq!(genders[0].value + genders[1].value, 100);
            assert!((40..60).contains(&genders[0].value));
        }
    }

    #[test]
    fn test_breakdown_ranges_and_no_normalization() {
        let mut saw_non_100 = false;
        for seed in 0..50 {
            let mut synth = MetricsSynthesizer::seeded(seed);
            let bundle = synth.synthesize_on(today(), 1_000.0, 1.0);

            let names: Vec<_> = bundle.device_breakdown.iter().map(|b| b.name.as_str()).collect();
            assert_eq!(names, ["Desktop", "Mobile", "Tablet"]);
            assert!((35..55).contains(&bundle.device_breakdown[0].value));
            assert!((30..50).contains(&bundle.device_breakdown[1].value));
            assert!((5..15).contains(&bundle.device_breakdown[2].value));

            assert_eq!(bundle.age_breakdown.len(), 5);
            assert!((25..40).contains(&bundle.age_breakdown[1].value));
            assert_eq!(bundle.location_breakdown.len(), 6);
            assert!((8..15).contains(&bundle.location_breakdown[3].value));

            if CampaignAnalyticsBundle::breakdown_total(&bundle.device_breakdown) != 100 {
                saw_non_100 = true;
            }
        }
        assert!(saw_non_100, "device weights are independent draws, not shares");
    }

    #[test]
    fn test_hourly_shape() {
        let mut synth = MetricsSynthesizer::seeded(3);
        let bundle = synth.synthesize_on(today(), 450_000.0, 3.89);
        let hourly = &bundle.hourly_performance;

        assert_eq!(hourly.len(), 24);
        for (i, h) in hourly.iter().enumerate() {
            assert_eq!(h.hour as usize, i);
        }
        assert!(hourly[14].impressions > hourly[3].impressions);
        for h in hourly {
            assert!(h.clicks as f64 <= (h.impressions as f64 * 0.06).ceil());
        }
    }

    #[test]
    fn test_hourly_curve() {
        assert_eq!(hourly_curve(3), 0.2);
        assert_eq!(hourly_curve(23), 0.2);
        assert!((hourly_curve(8) - 0.5).abs() < 1e-9);
        assert!((hourly_curve(15) - 1.0).abs() < 1e-9);
        assert!((hourly_curve(22) - 0.5).abs() < 1e-9);
        // Minimum in-window weight is 0.5, maximum off-window weight with
        // jitter is 0.3.
        assert!(hourly_curve(14) > hourly_curve(3) * 1.5);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = MetricsSynthesizer::seeded(99).synthesize_on(today(), 95_000.0, 4.12);
        let b = MetricsSynthesizer::seeded(99).synthesize_on(today(), 95_000.0, 4.12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseeded_same_shape() {
        let mut synth = MetricsSynthesizer::from_entropy();
        let a = synth.synthesize(95_000.0, 4.12);
        let b = synth.synthesize(95_000.0, 4.12);
        assert_eq!(a.daily_metrics.len(), b.daily_metrics.len());
        assert_eq!(a.hourly_performance.len(), b.hourly_performance.len());
        assert_eq!(a.age_breakdown.len(), b.age_breakdown.len());
        assert_eq!(a.location_breakdown.len(), b.location_breakdown.len());
    }

    #[test]
    fn test_non_positive_base_degrades_to_zero() {
        let mut synth = MetricsSynthesizer::seeded(5);
        let bundle = synth.synthesize_on(today(), -500.0, 3.0);
        assert!(bundle.daily_metrics.iter().all(|d| d.impressions == 0 && d.clicks == 0));
        assert!(bundle.hourly_performance.iter().all(|h| h.impressions == 0));

        let zero = synth.synthesize_on(today(), 0.0, 0.0);
        assert!(zero.daily_metrics.iter().all(|d| d.cost == 0.0));
    }
}
