use advisory_core::{Expert, ExpertKind, ExpertOpinion, ResolvedReading, Signal};
use serde_json::json;

/// Oscillator extremity against distance from the 50-period average
pub struct MeanReversionExpert;

impl MeanReversionExpert {
    /// `dist_to_ma50` and `range_position` are percentages.
    pub fn decide(rsi: f64, dist_to_ma50: f64, range_position: f64) -> (Signal, String) {
        if rsi < 30.0 && dist_to_ma50 < -5.0 {
            (
                Signal::StrongBuy,
                format!(
                    "Oversold! RSI={:.1}, {:.1}% from MA50, high odds of reverting to the mean",
                    rsi, dist_to_ma50
                ),
            )
        } else if rsi > 70.0 && dist_to_ma50 > 5.0 {
            (
                Signal::Sell,
                format!(
                    "Overbought! RSI={:.1}, +{:.1}% from MA50, pullback risk",
                    rsi, dist_to_ma50
                ),
            )
        } else if rsi < 40.0 && range_position < 30.0 {
            (
                Signal::Buy,
                format!(
                    "Near oversold, RSI={:.1}, near 52w low ({:.1}% of range)",
                    rsi, range_position
                ),
            )
        } else if rsi > 60.0 && range_position > 70.0 {
            (
                Signal::WeakSell,
                format!(
                    "Near overbought, RSI={:.1}, near 52w high ({:.1}% of range)",
                    rsi, range_position
                ),
            )
        } else {
            (
                Signal::Hold,
                format!("RSI={:.1} neutral, {:+.1}% from MA50", rsi, dist_to_ma50),
            )
        }
    }

    pub fn confidence(rsi: f64) -> f64 {
        if rsi < 30.0 || rsi > 70.0 {
            0.8
        } else {
            0.5
        }
    }
}

impl Expert for MeanReversionExpert {
    fn kind(&self) -> ExpertKind {
        ExpertKind::MeanReversion
    }

    fn evaluate(&self, r: &ResolvedReading) -> ExpertOpinion {
        let dist = r.dist_to_ma50();
        let range_position = r.range_position();
        let (signal, reasoning) = Self::decide(r.rsi, dist, range_position);

        ExpertOpinion::new(
            self.kind(),
            signal,
            reasoning,
            Self::confidence(r.rsi),
            json!({
                "rsi": r.rsi,
                "range_position": range_position,
                "dist_to_ma50": dist,
            }),
        )
    }
}
