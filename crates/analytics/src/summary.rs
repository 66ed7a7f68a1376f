use crate::bundle::DailyMetric;
use serde::{Deserialize, Serialize};

/// Totals over a daily series, shown as the overview cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    /// Aggregate click-through rate in percent; 0 without impressions.
    pub ctr: f64,
    pub cost: f64,
}

impl SummaryMetrics {
    pub fn from_daily(days: &[DailyMetric]) -> Self {
        let impressions: u64 = days.iter().map(|d| d.impressions).sum();
        let clicks: u64 = days.iter().map(|d| d.clicks).sum();
        let conversions: u64 = days.iter().map(|d| d.conversions).sum();
        let cost: f64 = days.iter().map(|d| d.cost).sum();

        Self {
            impressions,
            clicks,
            conversions,
            ctr: if impressions > 0 {
                clicks as f64 / impressions as f64 * 100.0
            } else {
                0.0
            },
            cost,
        }
    }
}
