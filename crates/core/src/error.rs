use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
