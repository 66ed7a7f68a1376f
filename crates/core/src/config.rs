use crate::error::CampaignResult;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `CAMPAIGN_INSIGHTS__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Page geometry and output location for PDF exports. All lengths in mm.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_page_width_mm")]
    pub page_width_mm: f32,
    #[serde(default = "default_page_height_mm")]
    pub page_height_mm: f32,
    #[serde(default = "default_margin_mm")]
    pub margin_mm: f32,
    #[serde(default = "default_chart_width_mm")]
    pub chart_width_mm: f32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsConfig {
    /// Fixed RNG seed for reproducible bundles; fresh entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default functions
fn default_page_width_mm() -> f32 {
    210.0
}
fn default_page_height_mm() -> f32 {
    297.0
}
fn default_margin_mm() -> f32 {
    20.0
}
fn default_chart_width_mm() -> f32 {
    170.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_width_mm: default_page_width_mm(),
            page_height_mm: default_page_height_mm(),
            margin_mm: default_margin_mm(),
            chart_width_mm: default_chart_width_mm(),
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file and environment
    /// variables. Environment values win over the file.
    pub fn load(file: Option<&Path>) -> CampaignResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("CAMPAIGN_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_a4() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.report.page_width_mm, 210.0);
        assert_eq!(cfg.report.page_height_mm, 297.0);
        assert_eq!(cfg.report.margin_mm, 20.0);
        assert!(cfg.analytics.seed.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[report]\nmargin_mm = 15.0\noutput_dir = \"out\"\n\n[analytics]\nseed = 42"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.report.margin_mm, 15.0);
        assert_eq!(cfg.report.page_height_mm, 297.0);
        assert_eq!(cfg.report.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.analytics.seed, Some(42));
    }

    #[test]
    fn test_mistyped_value_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[report]\nmargin_mm = \"wide\"").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, crate::CampaignError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let cfg = AppConfig::load(Some(Path::new("/nonexistent/campaign-insights.toml"))).unwrap();
        assert_eq!(cfg.report.chart_width_mm, 170.0);
    }
}
