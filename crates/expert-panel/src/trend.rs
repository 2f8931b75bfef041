use advisory_core::{Expert, ExpertKind, ExpertOpinion, ResolvedReading, Signal};
use serde_json::json;

/// Distance from the 120-period average beyond which the trend note calls
/// the instrument strong or weak (percent)
const MA120_BAND_PCT: f64 = 5.0;

/// Moving-average ordering and short/long horizon alignment
pub struct TrendExpert;

impl TrendExpert {
    pub fn decide(
        price: f64,
        ma_10: f64,
        ma_50: f64,
        change_1d: f64,
        ma_120: Option<f64>,
    ) -> (Signal, String) {
        if ma_50 == 0.0 {
            return (Signal::Hold, "Insufficient data to judge trend (MA50 is 0)".to_string());
        }

        let (signal, mut reason) = if price > ma_10 && ma_10 > ma_50 && change_1d > 0.0 {
            (
                Signal::Buy,
                format!(
                    "Bullish alignment, price ${:.2} > MA10 (${:.2}) > MA50 (${:.2})",
                    price, ma_10, ma_50
                ),
            )
        } else if price < ma_10 && ma_10 < ma_50 && change_1d < 0.0 {
            (
                Signal::Sell,
                format!(
                    "Bearish alignment, price ${:.2} < MA10 (${:.2}) < MA50 (${:.2})",
                    price, ma_10, ma_50
                ),
            )
        } else if price > ma_50 {
            (
                Signal::WeakBuy,
                format!(
                    "Price ${:.2} above MA50 (${:.2}), mid-term trend up",
                    price, ma_50
                ),
            )
        } else {
            (
                Signal::Hold,
                format!(
                    "Trend indecisive, MA10 (${:.2}) and MA50 (${:.2}) tangled",
                    ma_10, ma_50
                ),
            )
        };

        // The long-horizon note is informational only
        if let Some(ma_120) = ma_120.filter(|m| *m != 0.0) {
            let dist_120 = (price - ma_120) / ma_120 * 100.0;
            if dist_120 > MA120_BAND_PCT {
                reason.push_str(&format!(" | {:+.1}% above 120SMA, strong", dist_120));
            } else if dist_120 < -MA120_BAND_PCT {
                reason.push_str(&format!(" | {:.1}% below 120SMA, weak", dist_120));
            } else {
                reason.push_str(&format!(" | near 120SMA ({:+.1}%)", dist_120));
            }
        }

        (signal, reason)
    }

    pub fn confidence(change_1d: f64) -> f64 {
        if change_1d.abs() > 2.0 {
            0.75
        } else {
            0.6
        }
    }
}

impl Expert for TrendExpert {
    fn kind(&self) -> ExpertKind {
        ExpertKind::Trend
    }

    fn evaluate(&self, r: &ResolvedReading) -> ExpertOpinion {
        let (signal, reasoning) =
            Self::decide(r.price, r.ma_10, r.ma_50, r.change_1d, Some(r.ma_120));
        let price_to_ma50 = if r.ma_50 != 0.0 { r.price / r.ma_50 } else { 1.0 };

        ExpertOpinion::new(
            self.kind(),
            signal,
            reasoning,
            Self::confidence(r.change_1d),
            json!({
                "ma_10": r.ma_10,
                "ma_50": r.ma_50,
                "price_to_ma50": price_to_ma50,
            }),
        )
    }
}
