use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Recommendation level, ordered by its ordinal score.
///
/// The variant table in [`Signal::meta`] is the single place where labels,
/// scores and icons are defined. Everything else (thresholds, averaging,
/// comparisons) goes through [`Signal::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    Buy,
    WeakBuy,
    Hold,
    WeakSell,
    Sell,
}

impl Signal {
    /// All levels, strongest buy first.
    pub const ALL: [Signal; 6] = [
        Signal::StrongBuy,
        Signal::Buy,
        Signal::WeakBuy,
        Signal::Hold,
        Signal::WeakSell,
        Signal::Sell,
    ];

    /// (label, score, icon)
    const fn meta(self) -> (&'static str, u8, &'static str) {
        match self {
            Signal::StrongBuy => ("Strong Buy", 5, "🟢🟢🟢"),
            Signal::Buy => ("Buy", 4, "🟢🟢"),
            Signal::WeakBuy => ("Weak Buy", 3, "🟢"),
            Signal::Hold => ("Hold", 2, "🟡"),
            Signal::WeakSell => ("Reduce", 1, "🟠"),
            Signal::Sell => ("Sell", 0, "🔴"),
        }
    }

    /// Ordinal score, 0 (Sell) to 5 (Strong Buy)
    pub const fn score(self) -> u8 {
        self.meta().1
    }

    pub const fn label(self) -> &'static str {
        self.meta().0
    }

    pub const fn icon(self) -> &'static str {
        self.meta().2
    }

    /// Buy-leaning experts score at least Weak Buy.
    pub const fn is_buy_leaning(self) -> bool {
        self.score() >= 3
    }

    /// Sell-leaning experts score at most Reduce.
    pub const fn is_sell_leaning(self) -> bool {
        self.score() <= 1
    }

    /// Map an averaged ordinal (0.0 to 5.0) back onto a level.
    pub fn from_average(avg: f64) -> Self {
        match avg {
            a if a >= 4.5 => Signal::StrongBuy,
            a if a >= 3.5 => Signal::Buy,
            a if a >= 2.5 => Signal::WeakBuy,
            a if a >= 1.5 => Signal::Hold,
            a if a >= 0.5 => Signal::WeakSell,
            _ => Signal::Sell,
        }
    }
}

impl PartialOrd for Signal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Signal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score().cmp(&other.score())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of one of the five experts, in their fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertKind {
    Trend,
    MeanReversion,
    Momentum,
    Value,
    BandOscillator,
}

impl ExpertKind {
    pub const ALL: [ExpertKind; 5] = [
        ExpertKind::Trend,
        ExpertKind::MeanReversion,
        ExpertKind::Momentum,
        ExpertKind::Value,
        ExpertKind::BandOscillator,
    ];

    /// Position of this expert in [`ExpertKind::ALL`]
    pub const fn index(self) -> usize {
        match self {
            ExpertKind::Trend => 0,
            ExpertKind::MeanReversion => 1,
            ExpertKind::Momentum => 2,
            ExpertKind::Value => 3,
            ExpertKind::BandOscillator => 4,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            ExpertKind::Trend => "Trend Following",
            ExpertKind::MeanReversion => "Mean Reversion",
            ExpertKind::Momentum => "Momentum",
            ExpertKind::Value => "Value",
            ExpertKind::BandOscillator => "Band + CCI",
        }
    }
}

impl fmt::Display for ExpertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Result of one expert for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertOpinion {
    pub expert: ExpertKind,
    pub signal: Signal,
    /// Cites the numeric inputs that drove the decision
    pub reasoning: String,
    /// Self-assessed reliability, 0.0 to 1.0. Carried for display; the
    /// aggregator only consumes `signal`.
    pub confidence: f64,
    pub key_metrics: serde_json::Value,
}

impl ExpertOpinion {
    pub fn new(
        expert: ExpertKind,
        signal: Signal,
        reasoning: impl Into<String>,
        confidence: f64,
        key_metrics: serde_json::Value,
    ) -> Self {
        Self {
            expert,
            signal,
            reasoning: reasoning.into(),
            confidence,
            key_metrics,
        }
    }
}

/// Risk tier derived from expert disagreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Disagreement is the spread (max - min) of the expert ordinals.
    pub fn from_disagreement(disagreement: u8) -> Self {
        match disagreement {
            d if d >= 3 => RiskTier::High,
            2 => RiskTier::Medium,
            _ => RiskTier::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-instrument consensus recommendation for one monitoring cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecommendation {
    pub symbol: String,
    pub name: String,
    pub category: String,
    pub current_price: f64,

    /// One opinion per expert, indexed by [`ExpertKind::index`]
    pub opinions: [ExpertOpinion; 5],

    pub consensus_signal: Signal,
    /// 0.0 to 100.0
    pub consensus_score: f64,
    pub consensus_reasoning: String,
    pub risk_level: RiskTier,
    pub position_size: String,
    pub stop_loss: f64,
    pub take_profit: f64,

    /// 1-based, 0 until ranked
    pub rank_in_category: usize,
    /// 1-based, 0 until ranked
    pub overall_rank: usize,
}

impl AssetRecommendation {
    pub fn opinion(&self, kind: ExpertKind) -> &ExpertOpinion {
        &self.opinions[kind.index()]
    }

    pub fn trend(&self) -> &ExpertOpinion {
        self.opinion(ExpertKind::Trend)
    }

    pub fn mean_reversion(&self) -> &ExpertOpinion {
        self.opinion(ExpertKind::MeanReversion)
    }

    pub fn momentum(&self) -> &ExpertOpinion {
        self.opinion(ExpertKind::Momentum)
    }

    pub fn value(&self) -> &ExpertOpinion {
        self.opinion(ExpertKind::Value)
    }

    pub fn band_oscillator(&self) -> &ExpertOpinion {
        self.opinion(ExpertKind::BandOscillator)
    }
}
