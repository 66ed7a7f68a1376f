//! Immutable seed catalog: campaigns, saved reports, dashboard KPIs and
//! audience composition. Built once at startup and never mutated.

use crate::types::{
    AudienceSegment, Campaign, CampaignStatus, ChartPoint, DemographicRow, KpiMetric, Report,
    ReportKind, ReportMetrics, ReportStatus, Trend,
};
use chrono::{DateTime, NaiveDate, Utc};

/// All seed data the dashboard renders from.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub campaigns: Vec<Campaign>,
    pub reports: Vec<Report>,
    pub kpis: Vec<KpiMetric>,
    /// Monthly conversions trend.
    pub trend: Vec<ChartPoint>,
    /// Traffic share by device class.
    pub device_share: Vec<ChartPoint>,
    pub audience_by_device: Vec<AudienceSegment>,
    pub audience_by_location: Vec<AudienceSegment>,
    pub demographics: Vec<DemographicRow>,
}

impl Catalog {
    pub fn seed() -> Self {
        Self {
            campaigns: seed_campaigns(),
            reports: seed_reports(),
            kpis: seed_kpis(),
            trend: points(&[
                ("Jan", 4000.0),
                ("Feb", 3000.0),
                ("Mar", 5000.0),
                ("Apr", 4500.0),
                ("May", 6000.0),
                ("Jun", 5500.0),
                ("Jul", 7000.0),
            ]),
            device_share: points(&[("Desktop", 65.0), ("Mobile", 28.0), ("Tablet", 7.0)]),
            audience_by_device: seed_devices(),
            audience_by_location: seed_locations(),
            demographics: seed_demographics(),
        }
    }

    pub fn find_campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn find_report(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn seed_campaigns() -> Vec<Campaign> {
    use CampaignStatus::*;

    let campaigns = [
        ("1", "Summer Sale 2024", Active, 5000.0, 3240.0, 3.24, 125_000, 4050, 324),
        ("2", "Brand Awareness", Active, 8000.0, 6100.0, 2.87, 280_000, 8036, 567),
        ("3", "Product Launch", Paused, 3000.0, 1850.0, 4.12, 95_000, 3914, 289),
        ("4", "Retargeting Campaign", Active, 2500.0, 1200.0, 5.67, 45_000, 2551, 178),
        ("5", "Holiday Promotion", Completed, 10000.0, 9850.0, 3.89, 450_000, 17505, 1245),
        ("6", "AI-Powered Chatbot", Active, 7000.0, 5000.0, 4.21, 300_000, 12000, 890),
    ];
    let flights = [
        (date(2024, 6, 1), Some(date(2024, 8, 31))),
        (date(2024, 4, 1), Some(date(2024, 6, 30))),
        (date(2024, 5, 15), None),
        (date(2024, 7, 1), Some(date(2024, 7, 31))),
        (date(2023, 11, 1), Some(date(2023, 12, 31))),
        (date(2024, 8, 1), Some(date(2024, 9, 30))),
    ];

    campaigns
        .iter()
        .zip(flights)
        .map(
            |(&(id, name, status, budget, spent, ctr, impressions, clicks, conversions), flight)| {
                Campaign {
                    id: id.into(),
                    name: name.into(),
                    status,
                    budget,
                    spent,
                    ctr,
                    impressions,
                    clicks,
                    conversions,
                    start_date: flight.0,
                    end_date: flight.1,
                }
            },
        )
        .collect()
}

fn seed_reports() -> Vec<Report> {
    let report = |id: &str,
                  name: &str,
                  description: &str,
                  last_updated: &str,
                  kind: ReportKind,
                  status: ReportStatus,
                  metrics: (u64, u64, u64, f64)| Report {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        last_updated: timestamp(last_updated),
        kind,
        status,
        metrics: ReportMetrics {
            impressions: metrics.0,
            clicks: metrics.1,
            conversions: metrics.2,
            revenue: metrics.3,
        },
    };

    vec![
        report(
            "1",
            "Monthly Performance Report",
            "Comprehensive overview of campaign performance for the current month",
            "2024-07-15T10:30:00Z",
            ReportKind::Performance,
            ReportStatus::Ready,
            (1_250_000, 45_000, 2340, 125_000.0),
        ),
        report(
            "2",
            "Audience Insights",
            "Detailed breakdown of audience demographics and behavior",
            "2024-07-14T15:45:00Z",
            ReportKind::Audience,
            ReportStatus::Ready,
            (890_000, 32_000, 1890, 89_000.0),
        ),
        report(
            "3",
            "Conversion Funnel Analysis",
            "Step-by-step analysis of user conversion journey",
            "2024-07-13T09:15:00Z",
            ReportKind::Conversion,
            ReportStatus::Generating,
            (567_000, 23_000, 1456, 67_000.0),
        ),
        report(
            "4",
            "Custom ROI Report",
            "Custom report focusing on return on investment metrics",
            "2024-07-12T14:20:00Z",
            ReportKind::Custom,
            ReportStatus::Ready,
            (345_000, 15_000, 890, 45_000.0),
        ),
    ]
}

fn seed_kpis() -> Vec<KpiMetric> {
    let kpi = |label: &str, value: &str, change: f64, trend: Trend| KpiMetric {
        label: label.into(),
        value: value.into(),
        change,
        trend,
    };
    vec![
        kpi("Click-Through Rate", "3.24%", 12.5, Trend::Up),
        kpi("Cost Per Click", "$1.23", -8.2, Trend::Down),
        kpi("Impressions", "2.4M", 15.3, Trend::Up),
        kpi("Conversions", "1,247", 23.1, Trend::Up),
    ]
}

fn points(data: &[(&str, f64)]) -> Vec<ChartPoint> {
    data.iter()
        .map(|&(name, value)| ChartPoint {
            name: name.into(),
            value,
        })
        .collect()
}

fn segment(name: &str, users: u64, percentage: f64, color: [u8; 3]) -> AudienceSegment {
    AudienceSegment {
        name: name.into(),
        users,
        percentage,
        color,
    }
}

const BLUE: [u8; 3] = [37, 99, 235];
const GREEN: [u8; 3] = [22, 163, 74];
const YELLOW: [u8; 3] = [250, 204, 21];
const RED: [u8; 3] = [239, 68, 68];
const SLATE: [u8; 3] = [100, 116, 139];

fn seed_devices() -> Vec<AudienceSegment> {
    vec![
        segment("Desktop", 45_230, 65.2, BLUE),
        segment("Mobile", 19_456, 28.1, GREEN),
        segment("Tablet", 4_634, 6.7, YELLOW),
    ]
}

fn seed_locations() -> Vec<AudienceSegment> {
    vec![
        segment("United States", 28_450, 41.0, BLUE),
        segment("Canada", 12_340, 17.8, GREEN),
        segment("United Kingdom", 9_876, 14.2, YELLOW),
        segment("Germany", 7_654, 11.0, RED),
        segment("Other", 11_000, 16.0, SLATE),
    ]
}

fn seed_demographics() -> Vec<DemographicRow> {
    [
        ("18-24", 1200, 1800, 50),
        ("25-34", 2400, 2200, 80),
        ("35-44", 1800, 2000, 60),
        ("45-54", 1500, 1600, 40),
        ("55+", 1000, 1200, 30),
    ]
    .into_iter()
    .map(|(age_group, male, female, other)| DemographicRow {
        age_group: age_group.into(),
        male,
        female,
        other,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.campaigns.len(), 6);
        assert_eq!(catalog.reports.len(), 4);
        assert_eq!(catalog.kpis.len(), 4);
        assert_eq!(catalog.audience_by_device.len(), 3);
        assert_eq!(catalog.demographics.len(), 5);
        assert_eq!(catalog.trend.len(), 7);
        let share: f64 = catalog.device_share.iter().map(|p| p.value).sum();
        assert_eq!(share, 100.0);
    }

    #[test]
    fn test_campaign_ids_unique() {
        let catalog = Catalog::seed();
        let mut ids: Vec<_> = catalog.campaigns.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.campaigns.len());
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::seed();
        let c = catalog.find_campaign("4").unwrap();
        assert_eq!(c.name, "Retargeting Campaign");
        assert_eq!(c.status, CampaignStatus::Active);
        assert!(catalog.find_campaign("99").is_none());

        let r = catalog.find_report("3").unwrap();
        assert_eq!(r.status, ReportStatus::Generating);
        assert_eq!(r.last_updated.to_rfc3339(), "2024-07-13T09:15:00+00:00");
    }

    #[test]
    fn test_open_ended_campaign() {
        let catalog = Catalog::seed();
        assert!(catalog.find_campaign("3").unwrap().end_date.is_none());
    }
}
