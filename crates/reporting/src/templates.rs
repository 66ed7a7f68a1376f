//! The four report layouts. Each builds a section list for the shared
//! export engine; chart-bearing layouts also provide a rasterizer with
//! their charts registered under the selectors the sections refer to.

use crate::document::{Color, TextStyle};
use crate::export::ReportDefinition;
use crate::raster::{ChartRasterizer, ChartSpec};
use crate::section::{
    Badge, Banner, Chart, Column, Heading, KpiCard, KpiGrid, Section, Table, TextBlock,
};
use campaign_analytics::{Bucket, CampaignAnalyticsBundle, SummaryMetrics};
use campaign_core::format::{
    format_currency, format_grouped, format_number, format_percentage, title_case,
};
use campaign_core::types::{Campaign, Report};
use campaign_core::Catalog;
use chrono::{DateTime, NaiveDate, Utc};

pub const DASHBOARD_TREND_CHART: &str = "#dashboard-trend-chart";
pub const DASHBOARD_DEVICE_CHART: &str = "#dashboard-device-chart";

pub const ANALYTICS_PERFORMANCE_CHART: &str = "#analytics-performance-chart";
pub const ANALYTICS_DEVICE_CHART: &str = "#analytics-device-chart";
pub const ANALYTICS_AGE_CHART: &str = "#analytics-age-chart";
pub const ANALYTICS_GENDER_CHART: &str = "#analytics-gender-chart";
pub const ANALYTICS_LOCATION_CHART: &str = "#analytics-location-chart";

const CAMPAIGN_NAME_MAX: usize = 20;
const TOP_LOCATIONS: usize = 7;

/// `7/15/2024, 2:05:09 PM`
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const DATE_FORMAT: &str = "%-m/%-d/%Y";

const TITLE_BLUE: Color = Color(30, 64, 175);
const TEXT_DARK: Color = Color(55, 55, 55);

// ─── Filenames ──────────────────────────────────────────────────────────────

/// Lowercase with every space replaced by an underscore.
pub fn report_filename(name: &str) -> String {
    format!("{}.pdf", name.to_lowercase().replace(' ', "_"))
}

/// Lowercase with each whitespace run collapsed to one underscore.
pub fn analytics_filename(campaign_name: &str) -> String {
    let slug = campaign_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    format!("analytics_{slug}.pdf")
}

pub fn dashboard_filename(date: NaiveDate) -> String {
    format!("campaign_report_{}.pdf", date.format("%Y-%m-%d"))
}

pub const AUDIENCE_FILENAME: &str = "audience_report.pdf";

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn series(points: impl IntoIterator<Item = (String, f64)>) -> Vec<(String, f64)> {
    points.into_iter().collect()
}

fn bucket_series(buckets: &[Bucket]) -> Vec<(String, f64)> {
    series(buckets.iter().map(|b| (b.name.clone(), f64::from(b.value))))
}

// ─── Dashboard ──────────────────────────────────────────────────────────────

pub fn dashboard_report(catalog: &Catalog, today: NaiveDate) -> ReportDefinition {
    let kpis = catalog
        .kpis
        .iter()
        .map(|kpi| KpiCard::new(&kpi.label, &kpi.value))
        .collect();

    let rows = catalog
        .campaigns
        .iter()
        .map(|c| {
            vec![
                truncate(&c.name, CAMPAIGN_NAME_MAX),
                format_grouped(c.clicks),
                c.conversions.to_string(),
                format!("{}%", c.ctr),
                format!("${}", format_grouped(c.spent.round() as u64)),
            ]
        })
        .collect();
    let campaigns = Table::new(
        vec![
            Column::new("Campaign", 5.0),
            Column::new("Clicks", 60.0),
            Column::new("Conversions", 90.0),
            Column::new("CTR", 130.0),
            Column::new("Spent", 150.0),
        ],
        rows,
    )
    .header_height(10.0)
    .row_height(10.0)
    .font_size(10.0)
    .header_fill(Color::BRAND, Color::WHITE)
    .zebra();

    ReportDefinition::new("Campaign Performance Report", dashboard_filename(today))
        .footer("© 2024 Ad Analytics - Confidential")
        .sections([
            Section::Banner(Banner::new(
                "Campaign Performance Report",
                Some(format!("Generated: {}", today.format(DATE_FORMAT))),
            )),
            Section::Heading(Heading::section("Key Performance Indicators").keep_with_next(28.0)),
            Section::KpiGrid(KpiGrid::new(kpis, 2)),
            Section::Heading(Heading::section("Campaign Performance").keep_with_next(20.0)),
            Section::Table(campaigns),
            Section::Chart(Chart::new(DASHBOARD_TREND_CHART, "Performance Trend")),
            Section::Chart(Chart::new(DASHBOARD_DEVICE_CHART, "Traffic Sources")),
        ])
}

pub fn dashboard_rasterizer(catalog: &Catalog) -> ChartRasterizer {
    let mut rasterizer = ChartRasterizer::default();
    rasterizer
        .register(
            DASHBOARD_TREND_CHART,
            ChartSpec::line(
                series(catalog.trend.iter().map(|p| (p.name.clone(), p.value))),
                [59, 130, 246],
            ),
        )
        .register(
            DASHBOARD_DEVICE_CHART,
            ChartSpec::bar(
                series(catalog.device_share.iter().map(|p| (p.name.clone(), p.value))),
                [16, 185, 129],
            ),
        );
    rasterizer
}

// ─── Campaign analytics ─────────────────────────────────────────────────────

pub fn campaign_analytics_report(
    campaign: &Campaign,
    bundle: &CampaignAnalyticsBundle,
    generated: DateTime<Utc>,
) -> ReportDefinition {
    let summary = SummaryMetrics::from_daily(&bundle.daily_metrics);
    let overview = vec![
        KpiCard::new("Impressions", format_number(summary.impressions as f64)),
        KpiCard::new("Clicks", format_number(summary.clicks as f64)),
        KpiCard::new("CTR", format_percentage(summary.ctr)),
        KpiCard::new("Conversions", format_number(summary.conversions as f64)),
        KpiCard::new("Cost", format_currency(summary.cost)),
    ];

    let hourly = Table::new(
        vec![
            Column::new("Hour", 5.0),
            Column::new("Impressions", 40.0),
            Column::new("Clicks", 80.0),
            Column::new("CTR", 120.0),
        ],
        bundle
            .hourly_performance
            .iter()
            .map(|h| {
                vec![
                    format!("{}:00", h.hour),
                    format_number(h.impressions as f64),
                    format_number(h.clicks as f64),
                    format_percentage(h.ctr()),
                ]
            })
            .collect(),
    )
    .header_height(7.0)
    .row_height(6.0);

    let body = TextStyle::new(10.0).color(TEXT_DARK);

    let filename = analytics_filename(&campaign.name);
    ReportDefinition::new("Campaign Analytics Report", filename).sections([
        Section::Heading(Heading::title("Campaign Analytics Report")),
        Section::Text(TextBlock::new(format!("Campaign: {}", campaign.name), body)),
        Section::Text(TextBlock::new(
            format!("Generated: {}", generated.format(TIMESTAMP_FORMAT)),
            body,
        )),
        Section::Heading(Heading::bar("Overview Metrics").keep_with_next(28.0)),
        Section::KpiGrid(KpiGrid::new(overview, 3)),
        Section::Chart(Chart::new(ANALYTICS_PERFORMANCE_CHART, "Daily Performance")),
        Section::Chart(Chart::new(ANALYTICS_DEVICE_CHART, "Device Breakdown")),
        Section::Chart(Chart::new(ANALYTICS_AGE_CHART, "Age Demographics")),
        Section::Chart(Chart::new(ANALYTICS_GENDER_CHART, "Gender Distribution")),
        Section::Chart(Chart::new(ANALYTICS_LOCATION_CHART, "Geographic Distribution")),
        Section::Heading(Heading::bar("Hourly Performance").keep_with_next(13.0)),
        Section::Table(hourly),
    ])
}

pub fn analytics_rasterizer(bundle: &CampaignAnalyticsBundle) -> ChartRasterizer {
    let daily = series(
        bundle
            .daily_metrics
            .iter()
            .map(|d| (d.date.format("%d").to_string(), d.clicks as f64)),
    );

    let mut rasterizer = ChartRasterizer::default();
    rasterizer
        .register(ANALYTICS_PERFORMANCE_CHART, ChartSpec::line(daily, [59, 130, 246]))
        .register(
            ANALYTICS_DEVICE_CHART,
            ChartSpec::bar(bucket_series(&bundle.device_breakdown), [16, 185, 129]),
        )
        .register(
            ANALYTICS_AGE_CHART,
            ChartSpec::bar(bucket_series(&bundle.age_breakdown), [139, 92, 246]),
        )
        .register(
            ANALYTICS_GENDER_CHART,
            ChartSpec::bar(bucket_series(&bundle.gender_breakdown), [236, 72, 153]),
        )
        .register(
            ANALYTICS_LOCATION_CHART,
            ChartSpec::bar(bucket_series(&bundle.location_breakdown), [245, 158, 11]),
        );
    rasterizer
}

// ─── Audience ───────────────────────────────────────────────────────────────

pub fn audience_report(catalog: &Catalog, generated: DateTime<Utc>) -> ReportDefinition {
    let devices = &catalog.audience_by_device;
    let total_users: u64 = devices.iter().map(|d| d.users).sum();
    let mobile_share = devices
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case("mobile"))
        .map(|d| format_percentage(d.percentage))
        .unwrap_or_else(|| "--".to_string());

    let overview = vec![
        KpiCard::new("Total Users", format_number(total_users as f64))
            .background(Color(219, 234, 254))
            .accent(Color(29, 78, 216)),
        KpiCard::new("Countries", format_number(catalog.audience_by_location.len() as f64))
            .background(Color(209, 250, 229))
            .accent(Color(21, 128, 61)),
        KpiCard::new("Mobile Users", mobile_share)
            .background(Color(237, 233, 254))
            .accent(Color(126, 34, 206)),
    ];

    let device_table = Table::new(
        vec![Column::new("Device", 7.0), Column::new("Users", 35.0), Column::new("Share", 65.0)],
        devices
            .iter()
            .map(|d| {
                vec![
                    d.name.clone(),
                    format_number(d.users as f64),
                    format_percentage(d.percentage),
                ]
            })
            .collect(),
    )
    .swatches(devices.iter().map(|d| Color::from_rgb(d.color)).collect());

    let location_table = Table::new(
        vec![Column::new("Location", 0.0), Column::new("Users", 35.0)],
        catalog
            .audience_by_location
            .iter()
            .take(TOP_LOCATIONS)
            .map(|l| vec![l.name.clone(), format_number(l.users as f64)])
            .collect(),
    )
    .row_height(6.0);

    let demographics = Table::new(
        vec![
            Column::new("Age Group", 4.0),
            Column::new("Male", 32.0),
            Column::new("Female", 54.0),
            Column::new("Other", 76.0),
            Column::new("Total", 97.0),
        ],
        catalog
            .demographics
            .iter()
            .map(|row| {
                vec![
                    row.age_group.clone(),
                    format_number(row.male as f64),
                    format_number(row.female as f64),
                    format_number(row.other as f64),
                    format_number(row.total() as f64),
                ]
            })
            .collect(),
    )
    .header_height(6.0)
    .row_height(6.0)
    .header_fill(Color::gray(240), Color::gray(35));

    ReportDefinition::new("Audience Insights Report", AUDIENCE_FILENAME)
        .footer("© 2025 AdMyBrand Analytics")
        .sections([
            Section::Banner(Banner::new(
                "Audience Insights Report",
                Some(format!("Generated: {}", generated.format(TIMESTAMP_FORMAT))),
            )),
            Section::KpiGrid(KpiGrid::new(overview, 3)),
            Section::Heading(Heading::section("Device Breakdown").keep_with_next(15.0)),
            Section::Table(device_table),
            Section::Heading(Heading::section("Top Locations").keep_with_next(15.0)),
            Section::Table(location_table),
            Section::Heading(
                Heading::section("Demographics by Age & Gender").keep_with_next(12.0),
            ),
            Section::Table(demographics),
        ])
}

// ─── Saved report ───────────────────────────────────────────────────────────

pub fn saved_report(report: &Report, today: NaiveDate) -> ReportDefinition {
    let metrics = &report.metrics;
    let cards = [
        ("Impressions", format_grouped(metrics.impressions)),
        ("Clicks", format_grouped(metrics.clicks)),
        ("Conversions", format_grouped(metrics.conversions)),
        ("Revenue", format_currency(metrics.revenue)),
    ]
    .into_iter()
    .map(|(label, value)| KpiCard::new(label, value).background(Color(249, 250, 251)))
    .collect();

    ReportDefinition::new(&report.name, report_filename(&report.name))
        .footer(format!("Report generated on {}", today.format(DATE_FORMAT)))
        .sections([
            Section::Heading(Heading::title(&report.name).color(TITLE_BLUE)),
            Section::Text(TextBlock::new(
                &report.description,
                TextStyle::new(11.0).color(TEXT_DARK),
            )),
            Section::Badges(vec![
                Badge::new(title_case(report.kind.as_str()), Color(219, 234, 254), TITLE_BLUE),
                Badge::new(
                    title_case(report.status.as_str()),
                    Color(187, 247, 208),
                    Color(22, 101, 52),
                ),
            ]),
            Section::Heading(Heading::section("Metrics").keep_with_next(28.0)),
            Section::KpiGrid(KpiGrid::new(cards, 2)),
        ])
}
