use std::collections::BTreeMap;

use advisory_core::{AssetRecommendation, InstrumentReading, MarketSnapshot, ResolvedReading};
use expert_panel::ExpertPanel;
use rayon::prelude::*;

pub mod consensus;
pub mod ranker;
pub mod sizing;

pub use consensus::{calculate_consensus, Consensus, ExpertWeights};
pub use ranker::{DEFAULT_TOP_PICKS, PICK_SCORE_THRESHOLD};


/// Turns a cycle's readings into a ranked recommendation list.
pub struct AdvisoryEngine {
    panel: ExpertPanel,
    weights: ExpertWeights,
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisoryEngine {
    pub fn new() -> Self {
        Self {
            panel: ExpertPanel::new(),
            weights: ExpertWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ExpertWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &ExpertWeights {
        &self.weights
    }

    /// Run the five experts and the consensus over one reading.
    ///
    /// `None` when the reading has no usable price. Rank fields are left at 0
    /// until [`AdvisoryEngine::analyze_all`] ranks the list.
    pub fn analyze_asset(
        &self,
        symbol: &str,
        reading: &InstrumentReading,
    ) -> Option<AssetRecommendation> {
        let resolved = reading.resolve(symbol)?;
        Some(self.recommend(resolved))
    }

    fn recommend(&self, r: ResolvedReading) -> AssetRecommendation {
        let opinions = self.panel.evaluate(&r);
        let consensus = calculate_consensus(&opinions, &self.weights);

        AssetRecommendation {
            position_size: sizing::position_size(consensus.score, consensus.risk).to_string(),
            stop_loss: sizing::stop_loss(r.price, consensus.signal, r.volatility),
            take_profit: sizing::take_profit(r.price, consensus.signal, r.volatility),
            symbol: r.symbol,
            name: r.name,
            category: r.category,
            current_price: r.price,
            opinions,
            consensus_signal: consensus.signal,
            consensus_score: consensus.score,
            consensus_reasoning: consensus.reasoning,
            risk_level: consensus.risk,
            rank_in_category: 0,
            overall_rank: 0,
        }
    }

    /// Analyze every instrument in the snapshot and rank the results.
    ///
    /// The category key of the snapshot wins over any category carried in the
    /// reading. Instruments without a usable reading are skipped.
    pub fn analyze_all(&self, snapshot: &MarketSnapshot) -> Vec<AssetRecommendation> {
        let entries: Vec<(&str, &str, &InstrumentReading)> = snapshot
            .iter()
            .filter_map(|(category, symbol, reading)| match reading {
                Some(reading) if !reading.is_empty() => Some((category, symbol, reading)),
                _ => {
                    tracing::debug!(category, symbol, "No reading, skipping");
                    None
                }
            })
            .collect();

        // Collecting into a Vec keeps enumeration order
        let mut recommendations: Vec<AssetRecommendation> = entries
            .par_iter()
            .filter_map(|(category, symbol, reading)| {
                let Some(mut rec) = self.analyze_asset(symbol, reading) else {
                    tracing::debug!(%category, %symbol, "No usable price, skipping");
                    return None;
                };
                rec.category = category.to_string();
                Some(rec)
            })
            .collect();

        ranker::rank(&mut recommendations);

        tracing::info!(
            "Analyzed {} of {} instruments, {} top picks",
            recommendations.len(),
            snapshot.instrument_count(),
            recommendations
                .iter()
                .filter(|r| r.consensus_score >= PICK_SCORE_THRESHOLD)
                .count()
        );

        recommendations
    }

    pub fn get_top_picks<'a>(
        &self,
        recommendations: &'a [AssetRecommendation],
        n: usize,
    ) -> Vec<&'a AssetRecommendation> {
        ranker::top_picks(recommendations, n)
    }

    pub fn get_category_leaders<'a>(
        &self,
        recommendations: &'a [AssetRecommendation],
    ) -> BTreeMap<&'a str, &'a AssetRecommendation> {
        ranker::category_leaders(recommendations)
    }
}
