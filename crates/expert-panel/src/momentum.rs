use advisory_core::{Expert, ExpertKind, ExpertOpinion, ResolvedReading, Signal};
use serde_json::json;

/// Year-to-date and short-term return, adjusted by oscillator and volatility
pub struct MomentumExpert;

impl MomentumExpert {
    pub fn decide(ytd: f64, change_1d: f64, rsi: f64, volatility: f64) -> (Signal, String) {
        if ytd > 15.0 && change_1d > 0.0 && rsi > 50.0 {
            (
                Signal::Buy,
                format!(
                    "Strong momentum! YTD +{:.1}%, today +{:.1}%, ride the trend",
                    ytd, change_1d
                ),
            )
        } else if ytd < -10.0 && change_1d < 0.0 {
            (
                Signal::WeakSell,
                format!(
                    "Weakness persists, YTD {:.1}%, today {:.1}%, momentum pointing down",
                    ytd, change_1d
                ),
            )
        } else if ytd.abs() < 5.0 && volatility < 15.0 {
            (
                Signal::WeakBuy,
                format!(
                    "Low-volatility consolidation, YTD {:.1}%, volatility {:.1}%, awaiting breakout",
                    ytd, volatility
                ),
            )
        } else {
            (
                Signal::Hold,
                format!("Momentum neutral, YTD {:+.1}%, volatility {:.1}%", ytd, volatility),
            )
        }
    }

    pub fn confidence(ytd: f64) -> f64 {
        if ytd.abs() > 10.0 {
            0.7
        } else {
            0.55
        }
    }
}

impl Expert for MomentumExpert {
    fn kind(&self) -> ExpertKind {
        ExpertKind::Momentum
    }

    fn evaluate(&self, r: &ResolvedReading) -> ExpertOpinion {
        let (signal, reasoning) = Self::decide(r.ytd, r.change_1d, r.rsi, r.volatility);

        ExpertOpinion::new(
            self.kind(),
            signal,
            reasoning,
            Self::confidence(r.ytd),
            json!({
                "ytd": r.ytd,
                "change_1d": r.change_1d,
                "rsi": r.rsi,
                "volatility": r.volatility,
            }),
        )
    }
}
