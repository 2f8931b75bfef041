use std::collections::{BTreeMap, HashMap};

use advisory_core::AssetRecommendation;

/// Minimum composite score for a top pick or category leader.
pub const PICK_SCORE_THRESHOLD: f64 = 60.0;

/// Default number of top picks.
pub const DEFAULT_TOP_PICKS: usize = 5;

/// Sort by composite score (stable, descending) and assign both rank fields in one pass.
pub fn rank(recommendations: &mut [AssetRecommendation]) {
    recommendations.sort_by(|a, b| b.consensus_score.total_cmp(&a.consensus_score));

    let mut category_counters: HashMap<String, usize> = HashMap::new();
    for (i, rec) in recommendations.iter_mut().enumerate() {
        rec.overall_rank = i + 1;
        let counter = category_counters.entry(rec.category.clone()).or_insert(0);
        *counter += 1;
        rec.rank_in_category = *counter;
    }
}

/// First `n` recommendations clearing the pick threshold, in existing order.
pub fn top_picks(recommendations: &[AssetRecommendation], n: usize) -> Vec<&AssetRecommendation> {
    recommendations
        .iter()
        .filter(|r| r.consensus_score >= PICK_SCORE_THRESHOLD)
        .take(n)
        .collect()
}

/// Category leaders that clear the pick threshold, keyed by category.
pub fn category_leaders(
    recommendations: &[AssetRecommendation],
) -> BTreeMap<&str, &AssetRecommendation> {
    recommendations
        .iter()
        .filter(|r| r.rank_in_category == 1 && r.consensus_score >= PICK_SCORE_THRESHOLD)
        .map(|r| (r.category.as_str(), r))
        .collect()
}
