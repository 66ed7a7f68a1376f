//! Chart-ready analytics bundle derived for a single campaign.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days covered by the daily series, oldest first and ending today.
pub const DAILY_WINDOW_DAYS: usize = 30;
pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignAnalyticsBundle {
    pub daily_metrics: Vec<DailyMetric>,
    pub device_breakdown: Vec<Bucket>,
    pub age_breakdown: Vec<Bucket>,
    pub gender_breakdown: Vec<Bucket>,
    pub location_breakdown: Vec<Bucket>,
    pub hourly_performance: Vec<HourlyPerformance>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    /// Click-through rate for the day, in percent.
    pub ctr: f64,
    pub cost: f64,
}

/// A named weight in a categorical breakdown. Weights are relative and
/// only the gender pair is guaranteed to sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyPerformance {
    pub hour: u8,
    pub impressions: u64,
    pub clicks: u64,
}

impl HourlyPerformance {
    pub fn ctr(&self) -> f64 {
        if self.impressions > 0 {
            self.clicks as f64 / self.impressions as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl CampaignAnalyticsBundle {
    /// Sum of bucket weights, used to turn a breakdown into shares.
    pub fn breakdown_total(buckets: &[Bucket]) -> u32 {
        buckets.iter().map(|b| b.value).sum()
    }
}
