//! Synthetic campaign analytics: the per-campaign bundle generator, the
//! startup store that serves bundles by campaign id, and summary totals.

pub mod bundle;
pub mod store;
pub mod summary;
pub mod synthesizer;

pub use bundle::{Bucket, CampaignAnalyticsBundle, DailyMetric, HourlyPerformance};
pub use store::AnalyticsStore;
pub use summary::SummaryMetrics;
pub use synthesizer::MetricsSynthesizer;
