use crate::{ExpertKind, ExpertOpinion, ResolvedReading};

/// A rule-based evaluator that turns one instrument's reading into an opinion.
///
/// Experts never fail: every reading maps to exactly one signal with a
/// non-empty reasoning string.
pub trait Expert: Send + Sync {
    fn kind(&self) -> ExpertKind;

    fn evaluate(&self, reading: &ResolvedReading) -> ExpertOpinion;
}
