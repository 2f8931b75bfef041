use advisory_core::{Expert, ExpertKind, ExpertOpinion, ResolvedReading, Signal};
use serde_json::json;

const CONFIDENCE: f64 = 0.65;

/// 52-week range position and volatility as a valuation / safety-margin proxy
pub struct ValueExpert;

impl ValueExpert {
    pub fn decide(range_position: f64, volatility: f64) -> (Signal, String) {
        if range_position < 25.0 && volatility < 20.0 {
            (
                Signal::Buy,
                format!(
                    "Value zone! Near 52w low ({:.1}% of range), volatility {:.1}%, wide safety margin",
                    range_position, volatility
                ),
            )
        } else if range_position > 80.0 {
            (
                Signal::WeakSell,
                format!(
                    "Rich valuation, near 52w high ({:.1}% of range), watch for drawdown",
                    range_position
                ),
            )
        } else if range_position < 50.0 {
            (
                Signal::WeakBuy,
                format!(
                    "Below range midpoint ({:.1}% of range), some attraction",
                    range_position
                ),
            )
        } else {
            (
                Signal::Hold,
                format!("Neutral valuation, at {:.1}% of 52w range", range_position),
            )
        }
    }
}

impl Expert for ValueExpert {
    fn kind(&self) -> ExpertKind {
        ExpertKind::Value
    }

    fn evaluate(&self, r: &ResolvedReading) -> ExpertOpinion {
        let range_position = r.range_position();
        let (signal, reasoning) = Self::decide(range_position, r.volatility);

        ExpertOpinion::new(
            self.kind(),
            signal,
            reasoning,
            CONFIDENCE,
            json!({
                "range_position": range_position,
                "volatility": r.volatility,
            }),
        )
    }
}
