//! Five-expert consensus: weighted ordinal average, disagreement and risk tier.

use advisory_core::{AdvisoryError, ExpertKind, ExpertOpinion, RiskTier, Signal};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::str::FromStr;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
/// Composite values are snapped to this many parts per unit so that
/// summation order cannot move them across a bracket threshold.
const COMPOSITE_PRECISION: f64 = 1e9;

fn snap(value: f64) -> f64 {
    (value * COMPOSITE_PRECISION).round() / COMPOSITE_PRECISION
}

/// One weight per expert, indexed by [`ExpertKind`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpertWeights([f64; 5]);

impl Default for ExpertWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl ExpertWeights {
    pub const fn uniform() -> Self {
        Self([0.2; 5])
    }

    /// Weights must be finite, non-negative and sum to 1.
    pub fn new(weights: [f64; 5]) -> Result<Self, AdvisoryError> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(AdvisoryError::InvalidWeights(format!(
                "weight {} is not a finite non-negative number",
                bad
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AdvisoryError::InvalidWeights(format!(
                "weights sum to {:.4}, expected 1",
                sum
            )));
        }
        Ok(Self(weights))
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.0
    }
}

impl Index<ExpertKind> for ExpertWeights {
    type Output = f64;

    fn index(&self, kind: ExpertKind) -> &f64 {
        &self.0[kind.index()]
    }
}

/// Parses `"0.2,0.2,0.2,0.2,0.2"` in [`ExpertKind::ALL`] order.
impl FromStr for ExpertWeights {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|e| {
                    AdvisoryError::InvalidWeights(format!("'{}': {}", part.trim(), e))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let weights: [f64; 5] = parsed.try_into().map_err(|v: Vec<f64>| {
            AdvisoryError::InvalidWeights(format!("expected 5 weights, got {}", v.len()))
        })?;
        Self::new(weights)
    }
}

/// Aggregated view of the five opinions
#[derive(Debug, Clone, PartialEq)]
pub struct Consensus {
    pub signal: Signal,
    /// 0.0 to 100.0
    pub score: f64,
    pub reasoning: String,
    pub risk: RiskTier,
    /// max - min of the expert ordinals
    pub disagreement: u8,
}

pub fn calculate_consensus(opinions: &[ExpertOpinion; 5], weights: &ExpertWeights) -> Consensus {
    let scores: Vec<u8> = opinions.iter().map(|o| o.signal.score()).collect();

    let average = snap(
        opinions
            .iter()
            .map(|o| f64::from(o.signal.score()) * weights[o.expert])
            .sum(),
    );

    let max = scores.iter().copied().max().unwrap_or(0);
    let min = scores.iter().copied().min().unwrap_or(0);
    let disagreement = max - min;

    let buy_count = opinions.iter().filter(|o| o.signal.is_buy_leaning()).count();
    let sell_count = opinions.iter().filter(|o| o.signal.is_sell_leaning()).count();

    let reasoning = if buy_count >= 3 {
        format!(
            "{} of 5 experts lean buy, disagreement {}",
            buy_count, disagreement
        )
    } else if sell_count >= 2 {
        format!("{} of 5 experts lean sell or reduce", sell_count)
    } else if disagreement <= 1 {
        "High consensus among experts, high confidence".to_string()
    } else {
        format!(
            "Experts diverge (disagreement={}), combine with macro judgment",
            disagreement
        )
    };

    Consensus {
        signal: Signal::from_average(average),
        score: snap(average / 5.0 * 100.0).clamp(0.0, 100.0),
        reasoning,
        risk: RiskTier::from_disagreement(disagreement),
        disagreement,
    }
}
