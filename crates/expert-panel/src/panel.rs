use advisory_core::{Expert, ExpertKind, ExpertOpinion, ResolvedReading};

use crate::{BandOscillatorExpert, MeanReversionExpert, MomentumExpert, TrendExpert, ValueExpert};

/// Runs all five experts over one reading, in [`ExpertKind::ALL`] order.
#[derive(Default)]
pub struct ExpertPanel;

impl ExpertPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn expert(&self, kind: ExpertKind) -> &'static dyn Expert {
        match kind {
            ExpertKind::Trend => &TrendExpert,
            ExpertKind::MeanReversion => &MeanReversionExpert,
            ExpertKind::Momentum => &MomentumExpert,
            ExpertKind::Value => &ValueExpert,
            ExpertKind::BandOscillator => &BandOscillatorExpert,
        }
    }

    pub fn evaluate(&self, reading: &ResolvedReading) -> [ExpertOpinion; 5] {
        ExpertKind::ALL.map(|kind| {
            let opinion = self.expert(kind).evaluate(reading);
            tracing::debug!(
                symbol = %reading.symbol,
                expert = %kind,
                signal = %opinion.signal,
                "{}",
                opinion.reasoning
            );
            opinion
        })
    }
}
