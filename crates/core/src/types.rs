use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A paid-media campaign from the seed catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub budget: f64,
    pub spent: f64,
    /// Lifetime click-through rate, in percent.
    pub ctr: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

/// A saved report shown on the reports page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    pub description: String,
    pub last_updated: DateTime<Utc>,
    pub kind: ReportKind,
    pub status: ReportStatus,
    pub metrics: ReportMetrics,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Performance,
    Audience,
    Conversion,
    Custom,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Performance => "performance",
            ReportKind::Audience => "audience",
            ReportKind::Conversion => "conversion",
            ReportKind::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Ready,
    Generating,
    Error,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Ready => "ready",
            ReportStatus::Generating => "generating",
            ReportStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReportMetrics {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: f64,
}

/// Headline KPI card on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiMetric {
    pub label: String,
    /// Pre-formatted display value ("3.24%", "$1.23").
    pub value: String,
    /// Period-over-period change, in percent.
    pub change: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// One slice of the audience (a device class or a country).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudienceSegment {
    pub name: String,
    pub users: u64,
    pub percentage: f64,
    /// RGB swatch used for legends.
    pub color: [u8; 3],
}

/// A labelled point for the dashboard trend and share charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DemographicRow {
    pub age_group: String,
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

impl DemographicRow {
    pub fn total(&self) -> u64 {
        self.male + self.female + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CampaignStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let kind: ReportKind = serde_json::from_str("\"audience\"").unwrap();
        assert_eq!(kind, ReportKind::Audience);
    }

    #[test]
    fn test_demographic_total() {
        let row = DemographicRow {
            age_group: "18-24".into(),
            male: 1200,
            female: 1800,
            other: 50,
        };
        assert_eq!(row.total(), 3050);
    }
}
