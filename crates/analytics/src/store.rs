//! Per-campaign analytics bundles, precomputed once over the seed catalog.

use crate::bundle::CampaignAnalyticsBundle;
use crate::synthesizer::MetricsSynthesizer;
use campaign_core::types::Campaign;
use campaign_core::{CampaignError, CampaignResult};
use dashmap::DashMap;
use tracing::info;

pub struct AnalyticsStore {
    bundles: DashMap<String, CampaignAnalyticsBundle>,
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self {
            bundles: DashMap::new(),
        }
    }

    /// Synthesize a bundle for every campaign from its lifetime stats.
    pub fn build(campaigns: &[Campaign], synthesizer: &mut MetricsSynthesizer) -> Self {
        let store = Self::new();
        store.regenerate(campaigns, synthesizer);
        store
    }

    /// Redraw every bundle, replacing whatever was there before.
    pub fn regenerate(&self, campaigns: &[Campaign], synthesizer: &mut MetricsSynthesizer) {
        self.bundles.clear();
        for campaign in campaigns {
            let bundle = synthesizer.synthesize(campaign.impressions as f64, campaign.ctr);
            self.bundles.insert(campaign.id.clone(), bundle);
        }
        info!(campaigns = campaigns.len(), "Campaign analytics generated");
    }

    pub fn get_bundle(&self, campaign_id: &str) -> Option<CampaignAnalyticsBundle> {
        self.bundles.get(campaign_id).map(|b| b.clone())
    }

    /// Pretty-printed JSON for one campaign's bundle.
    pub fn bundle_json(&self, campaign_id: &str) -> CampaignResult<String> {
        let bundle = self
            .get_bundle(campaign_id)
            .ok_or_else(|| CampaignError::CampaignNotFound(campaign_id.to_string()))?;
        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl Default for AnalyticsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::Catalog;

    #[test]
    fn test_build_covers_every_campaign() {
        let catalog = Catalog::seed();
        let mut synth = MetricsSynthesizer::seeded(11);
        let store = AnalyticsStore::build(&catalog.campaigns, &mut synth);

        assert_eq!(store.len(), catalog.campaigns.len());
        for campaign in &catalog.campaigns {
            let bundle = store.get_bundle(&campaign.id).unwrap();
            assert_eq!(bundle.daily_metrics.len(), 30);
            assert_eq!(bundle.hourly_performance.len(), 24);
        }
    }

    #[test]
    fn test_unknown_campaign() {
        let store = AnalyticsStore::new();
        assert!(store.is_empty());
        assert!(store.get_bundle("missing").is_none());
    }

    #[test]
    fn test_bundle_json() {
        let catalog = Catalog::seed();
        let store = AnalyticsStore::build(&catalog.campaigns, &mut MetricsSynthesizer::seeded(3));

        let json = store.bundle_json("2").unwrap();
        let parsed: CampaignAnalyticsBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store.get_bundle("2").unwrap());
        assert!(json.contains("\"hourlyPerformance\""));

        let err = store.bundle_json("99").unwrap_err();
        assert!(matches!(err, CampaignError::CampaignNotFound(id) if id == "99"));
    }

    #[test]
    fn test_regenerate_redraws() {
        let catalog = Catalog::seed();
        let mut synth = MetricsSynthesizer::seeded(11);
        let store = AnalyticsStore::build(&catalog.campaigns, &mut synth);
        let before = store.get_bundle("1").unwrap();

        store.regenerate(&catalog.campaigns, &mut synth);
        let after = store.get_bundle("1").unwrap();
        assert_eq!(store.len(), 6);
        assert_ne!(before, after);
    }
}
