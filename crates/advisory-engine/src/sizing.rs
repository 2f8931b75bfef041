use advisory_core::{RiskTier, Signal};

/// Suggested share of the portfolio for a composite score and risk tier.
pub fn position_size(score: f64, risk: RiskTier) -> &'static str {
    if score >= 80.0 && risk == RiskTier::Low {
        "15–20%"
    } else if score >= 70.0 {
        "10–15%"
    } else if score >= 60.0 {
        "5–10%"
    } else if score >= 40.0 {
        "3–5% (watch position)"
    } else {
        "0–2% (probe position)"
    }
}

/// Stop distance in percent. Buy-leaning composites get a wider floor.
pub fn stop_distance_pct(signal: Signal, volatility: f64) -> f64 {
    match signal.score() {
        s if s >= 4 => (volatility * 1.5).max(5.0),
        s if s <= 1 => volatility.max(3.0),
        _ => volatility * 2.0,
    }
}

/// Target distance in percent, roughly 1:2 risk/reward on buy-leaning composites.
pub fn target_distance_pct(signal: Signal, volatility: f64) -> f64 {
    if signal.score() >= 4 {
        (volatility * 3.0).max(10.0)
    } else {
        volatility * 2.0
    }
}

pub fn stop_loss(price: f64, signal: Signal, volatility: f64) -> f64 {
    price * (1.0 - stop_distance_pct(signal, volatility) / 100.0)
}

pub fn take_profit(price: f64, signal: Signal, volatility: f64) -> f64 {
    price * (1.0 + target_distance_pct(signal, volatility) / 100.0)
}
