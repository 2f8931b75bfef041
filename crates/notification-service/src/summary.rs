use std::collections::BTreeMap;

use advisory_core::{AssetRecommendation, Signal};
use chrono::{DateTime, Utc};

/// One cycle's ranked output, ready to render.
pub struct SummaryReport<'a> {
    pub generated_at: DateTime<Utc>,
    /// Ranked, best first
    pub recommendations: &'a [AssetRecommendation],
    pub top_picks: Vec<&'a AssetRecommendation>,
    pub category_leaders: BTreeMap<&'a str, &'a AssetRecommendation>,
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        recommendations: &'a [AssetRecommendation],
        top_picks: Vec<&'a AssetRecommendation>,
        category_leaders: BTreeMap<&'a str, &'a AssetRecommendation>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            recommendations,
            top_picks,
            category_leaders,
        }
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn instrument_count(&self) -> usize {
        self.recommendations.len()
    }

    /// Count of composite signals, strongest first. Levels nobody landed on are omitted.
    pub fn signal_distribution(&self) -> Vec<(Signal, usize)> {
        Signal::ALL
            .iter()
            .map(|signal| {
                let count = self
                    .recommendations
                    .iter()
                    .filter(|r| r.consensus_signal == *signal)
                    .count();
                (*signal, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
