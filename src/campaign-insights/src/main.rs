//! Campaign Insights: synthetic campaign analytics and PDF report export.
//!
//! Builds the seed catalog and per-campaign analytics bundles at startup,
//! then either prints a bundle or exports one of the report layouts.

use campaign_analytics::{AnalyticsStore, MetricsSynthesizer};
use campaign_core::config::AppConfig;
use campaign_core::{CampaignError, Catalog};
use campaign_reporting::templates;
use campaign_reporting::{ChartRasterizer, ReportDefinition, ReportExporter};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-insights")]
#[command(about = "Synthetic campaign analytics and PDF report export")]
#[command(version)]
struct Cli {
    /// Config file (optional; environment variables override it)
    #[arg(long, default_value = "campaign-insights.toml")]
    config: PathBuf,

    /// RNG seed for reproducible analytics (overrides config)
    #[arg(long, env = "CAMPAIGN_INSIGHTS__ANALYTICS__SEED")]
    seed: Option<u64>,

    /// Directory reports are written to (overrides config)
    #[arg(long, env = "CAMPAIGN_INSIGHTS__REPORT__OUTPUT_DIR")]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a campaign's analytics bundle as JSON
    Bundle {
        #[arg(long)]
        campaign: String,
    },
    /// Export a PDF report
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
}

#[derive(Subcommand, Debug)]
enum ExportTarget {
    /// Campaign performance overview
    Dashboard,
    /// Audience composition
    Audience,
    /// Per-campaign analytics with charts
    Analytics {
        #[arg(long)]
        campaign: String,
    },
    /// One of the saved reports
    Report {
        #[arg(long)]
        report: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_insights=info,campaign_reporting=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load(Some(&cli.config)).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.analytics.seed = Some(seed);
    }
    if let Some(dir) = cli.out_dir {
        config.report.output_dir = dir;
    }

    info!(
        seed = ?config.analytics.seed,
        output_dir = %config.report.output_dir.display(),
        "Configuration loaded"
    );

    let catalog = Catalog::seed();
    let mut synthesizer = MetricsSynthesizer::new(config.analytics.seed);
    let store = AnalyticsStore::build(&catalog.campaigns, &mut synthesizer);
    info!(campaigns = store.len(), "Analytics bundles ready");

    match cli.command {
        Command::Bundle { campaign } => {
            println!("{}", store.bundle_json(&campaign)?);
        }
        Command::Export { target } => {
            let (report, rasterizer) = prepare_export(&catalog, &store, target)?;
            let exporter = ReportExporter::from_config(&config.report);

            match exporter
                .export_to_file(&report, &rasterizer, &config.report.output_dir)
                .await
            {
                Ok(path) => println!("{}", path.display()),
                Err(_) => {
                    eprintln!("Export failed. Please try again.");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn prepare_export(
    catalog: &Catalog,
    store: &AnalyticsStore,
    target: ExportTarget,
) -> Result<(ReportDefinition, ChartRasterizer), CampaignError> {
    let now = Utc::now();
    let today = now.date_naive();

    Ok(match target {
        ExportTarget::Dashboard => (
            templates::dashboard_report(catalog, today),
            templates::dashboard_rasterizer(catalog),
        ),
        ExportTarget::Audience => (
            templates::audience_report(catalog, now),
            ChartRasterizer::default(),
        ),
        ExportTarget::Analytics { campaign } => {
            let found = catalog
                .find_campaign(&campaign)
                .ok_or_else(|| CampaignError::CampaignNotFound(campaign.clone()))?;
            let bundle = store
                .get_bundle(&campaign)
                .ok_or(CampaignError::CampaignNotFound(campaign))?;
            (
                templates::campaign_analytics_report(found, &bundle, now),
                templates::analytics_rasterizer(&bundle),
            )
        }
        ExportTarget::Report { report } => {
            let found = catalog
                .find_report(&report)
                .ok_or(CampaignError::ReportNotFound(report))?;
            (templates::saved_report(found, today), ChartRasterizer::default())
        }
    })
}
