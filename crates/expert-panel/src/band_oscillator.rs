use advisory_core::{BandPosition, Expert, ExpertKind, ExpertOpinion, ResolvedReading, Signal};
use serde_json::json;

/// CCI level treated as oversold / overbought
const CCI_EXTREME: f64 = 100.0;
/// CCI band around zero treated as neutral while price sits mid-band
const CCI_NEUTRAL: f64 = 50.0;
const CONFIDENCE: f64 = 0.85;

/// Bollinger band position combined with the 120-period CCI
pub struct BandOscillatorExpert;

impl BandOscillatorExpert {
    /// Percent location of price between the bands, 50 when they coincide.
    pub fn band_pct(price: f64, upper: f64, lower: f64) -> f64 {
        if upper == lower {
            50.0
        } else {
            (price - lower) / (upper - lower) * 100.0
        }
    }

    /// `band_pct` is for display only and never drives the decision.
    pub fn decide(position: &BandPosition, cci: f64, band_pct: f64) -> (Signal, String) {
        let at_lower = *position == BandPosition::Lower;
        let at_upper = *position == BandPosition::Upper;

        if at_lower && cci < -CCI_EXTREME {
            (
                Signal::StrongBuy,
                format!(
                    "Lower band ({:.0}%) + CCI oversold ({:.0}), strong rebound setup",
                    band_pct, cci
                ),
            )
        } else if at_lower || cci < -CCI_EXTREME {
            (
                Signal::Buy,
                format!(
                    "Band at {:.0}% ({}) with CCI={:.0}, oversold territory",
                    band_pct, position, cci
                ),
            )
        } else if at_upper && cci > CCI_EXTREME {
            (
                Signal::Sell,
                format!(
                    "Upper band ({:.0}%) + CCI overbought ({:.0}), pullback risk",
                    band_pct, cci
                ),
            )
        } else if at_upper || cci > CCI_EXTREME {
            (
                Signal::WeakSell,
                format!(
                    "Band at {:.0}% ({}) with CCI={:.0}, overbought territory",
                    band_pct, position, cci
                ),
            )
        } else if *position == BandPosition::Middle {
            if cci > -CCI_NEUTRAL && cci < CCI_NEUTRAL {
                (
                    Signal::Hold,
                    format!(
                        "Mid band ({:.0}%) + CCI neutral ({:.0}), range-bound",
                        band_pct, cci
                    ),
                )
            } else if cci <= -CCI_NEUTRAL {
                (
                    Signal::WeakBuy,
                    format!("Mid band + CCI soft ({:.0}), watch the lower band", cci),
                )
            } else {
                (
                    Signal::WeakSell,
                    format!("Mid band + CCI firm ({:.0}), watch the upper band", cci),
                )
            }
        } else {
            (
                Signal::Hold,
                format!("Band position {} ({:.0}%), CCI={:.0}", position, band_pct, cci),
            )
        }
    }
}

impl Expert for BandOscillatorExpert {
    fn kind(&self) -> ExpertKind {
        ExpertKind::BandOscillator
    }

    fn evaluate(&self, r: &ResolvedReading) -> ExpertOpinion {
        let band_pct = Self::band_pct(r.price, r.bb_upper, r.bb_lower);
        let (signal, reasoning) = Self::decide(&r.bb_position, r.cci_120, band_pct);

        ExpertOpinion::new(
            self.kind(),
            signal,
            reasoning,
            CONFIDENCE,
            json!({
                "bb_position": r.bb_position.as_str(),
                "bb_width": format!("{:.1}%", r.bb_width),
                "cci_120": format!("{:.1}", r.cci_120),
            }),
        )
    }
}
