//! Instrument readings handed over by the indicator collaborator.
//!
//! [`InstrumentReading`] mirrors the loosely typed field mapping: every field
//! is optional. [`InstrumentReading::resolve`] validates it once and fills in
//! the defaults, so the experts only ever see a [`ResolvedReading`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RSI: f64 = 50.0;
pub const DEFAULT_BB_WIDTH: f64 = 4.0;
pub const DEFAULT_CATEGORY: &str = "unknown";
/// Default band envelope when no Bollinger bands were computed: price +/- 2%
const DEFAULT_BAND_OFFSET: f64 = 0.02;

/// Raw per-instrument field mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentReading {
    pub current_price: Option<f64>,
    pub ma_10: Option<f64>,
    pub ma_50: Option<f64>,
    pub ma_120: Option<f64>,
    pub rsi: Option<f64>,
    pub daily_change_pct: Option<f64>,
    pub ytd_return: Option<f64>,
    pub volatility: Option<f64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_position: Option<String>,
    pub bb_width: Option<f64>,
    pub cci_120: Option<f64>,
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Location of price within its volatility band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    Lower,
    Middle,
    Upper,
    /// Anything the indicator layer reported that is not one of the three
    Other(String),
}

impl BandPosition {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "lower" => BandPosition::Lower,
            "middle" => BandPosition::Middle,
            "upper" => BandPosition::Upper,
            other => BandPosition::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BandPosition::Lower => "lower",
            BandPosition::Middle => "middle",
            BandPosition::Upper => "upper",
            BandPosition::Other(s) => s,
        }
    }
}

impl fmt::Display for BandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated reading with every default substituted
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReading {
    pub symbol: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub ma_10: f64,
    pub ma_50: f64,
    pub ma_120: f64,
    pub rsi: f64,
    pub change_1d: f64,
    pub ytd: f64,
    pub volatility: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub bb_middle: f64,
    pub bb_position: BandPosition,
    pub bb_width: f64,
    pub cci_120: f64,
}

impl InstrumentReading {
    /// True when the collaborator handed over an empty mapping.
    pub fn is_empty(&self) -> bool {
        *self == InstrumentReading::default()
    }

    /// Apply the default-substitution rules.
    ///
    /// Returns `None` when there is no usable price (missing, non-finite or
    /// not strictly positive); that is the only condition that drops an
    /// instrument from a cycle.
    pub fn resolve(&self, symbol: &str) -> Option<ResolvedReading> {
        let price = self.current_price.filter(|p| p.is_finite() && *p > 0.0)?;
        let ma_50 = self.ma_50.unwrap_or(price);

        Some(ResolvedReading {
            symbol: symbol.to_string(),
            name: self.name.clone().unwrap_or_else(|| symbol.to_string()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            price,
            ma_10: self.ma_10.unwrap_or(price),
            ma_50,
            ma_120: self.ma_120.unwrap_or(ma_50),
            rsi: self.rsi.unwrap_or(DEFAULT_RSI),
            change_1d: self.daily_change_pct.unwrap_or(0.0),
            ytd: self.ytd_return.unwrap_or(0.0),
            volatility: self.volatility.unwrap_or(0.0),
            high_52w: self.high_52w.unwrap_or(price),
            low_52w: self.low_52w.unwrap_or(price),
            bb_upper: self.bb_upper.unwrap_or(price * (1.0 + DEFAULT_BAND_OFFSET)),
            bb_lower: self.bb_lower.unwrap_or(price * (1.0 - DEFAULT_BAND_OFFSET)),
            bb_middle: self.bb_middle.unwrap_or(price),
            bb_position: self
                .bb_position
                .as_deref()
                .map(BandPosition::parse)
                .unwrap_or(BandPosition::Middle),
            bb_width: self.bb_width.unwrap_or(DEFAULT_BB_WIDTH),
            cci_120: self.cci_120.unwrap_or(0.0),
        })
    }
}

impl ResolvedReading {
    /// Percentage location of price within the 52-week range.
    /// A zero-width range uses a denominator of 1.
    pub fn range_position(&self) -> f64 {
        let span = self.high_52w - self.low_52w;
        let span = if span == 0.0 { 1.0 } else { span };
        (self.price - self.low_52w) / span * 100.0
    }

    /// Percentage distance of price from the 50-period average, 0 when the
    /// average is 0.
    pub fn dist_to_ma50(&self) -> f64 {
        if self.ma_50 == 0.0 {
            0.0
        } else {
            (self.price - self.ma_50) / self.ma_50 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn priced(price: f64) -> InstrumentReading {
        InstrumentReading {
            current_price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_or_zero_price_is_unusable() {
        assert!(InstrumentReading::default().resolve("AAPL").is_none());
        assert!(priced(0.0).resolve("AAPL").is_none());
        assert!(priced(-3.0).resolve("AAPL").is_none());
        assert!(priced(f64::NAN).resolve("AAPL").is_none());
    }

    #[test]
    fn test_defaults_are_substituted() {
        let r = priced(100.0).resolve("GLD").unwrap();
        assert_eq!(r.name, "GLD");
        assert_eq!(r.category, DEFAULT_CATEGORY);
        assert_eq!(r.ma_10, 100.0);
        assert_eq!(r.ma_50, 100.0);
        assert_eq!(r.ma_120, 100.0);
        assert_eq!(r.rsi, 50.0);
        assert_eq!(r.change_1d, 0.0);
        assert_eq!(r.high_52w, 100.0);
        assert_eq!(r.low_52w, 100.0);
        assert_relative_eq!(r.bb_upper, 102.0, epsilon = 1e-9);
        assert_relative_eq!(r.bb_lower, 98.0, epsilon = 1e-9);
        assert_eq!(r.bb_position, BandPosition::Middle);
        assert_eq!(r.bb_width, 4.0);
        assert_eq!(r.cci_120, 0.0);
    }

    #[test]
    fn test_ma120_falls_back_to_ma50() {
        let reading = InstrumentReading {
            ma_50: Some(90.0),
            ..priced(100.0)
        };
        let r = reading.resolve("SPY").unwrap();
        assert_eq!(r.ma_120, 90.0);
    }

    #[test]
    fn test_range_position() {
        let reading = InstrumentReading {
            high_52w: Some(200.0),
            low_52w: Some(150.0),
            ..priced(175.0)
        };
        let r = reading.resolve("AAPL").unwrap();
        assert_relative_eq!(r.range_position(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_width_range_uses_unit_denominator() {
        let reading = InstrumentReading {
            high_52w: Some(100.0),
            low_52w: Some(100.0),
            ..priced(100.5)
        };
        let r = reading.resolve("UUP").unwrap();
        assert_relative_eq!(r.range_position(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dist_to_ma50_guards_zero() {
        let reading = InstrumentReading {
            ma_50: Some(0.0),
            ..priced(10.0)
        };
        assert_eq!(reading.resolve("X").unwrap().dist_to_ma50(), 0.0);
    }

    #[test]
    fn test_band_position_parse() {
        assert_eq!(BandPosition::parse("lower"), BandPosition::Lower);
        assert_eq!(BandPosition::parse("upper"), BandPosition::Upper);
        assert_eq!(
            BandPosition::parse("outside"),
            BandPosition::Other("outside".to_string())
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"current_price": 175, "rsi": 45.5, "trend": "up", "bb_position": "lower"}"#;
        let reading: InstrumentReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.current_price, Some(175.0));
        assert_eq!(reading.rsi, Some(45.5));
        assert_eq!(reading.bb_position.as_deref(), Some("lower"));
    }

    #[test]
    fn test_is_empty() {
        assert!(InstrumentReading::default().is_empty());
        assert!(!priced(1.0).is_empty());
    }
}
