//! Shared domain model for the campaign insights workspace: seed catalog,
//! display formatting, configuration and the error taxonomy.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
