//! The five independent rule-based experts.
//!
//! Each expert reads only its own slice of a [`ResolvedReading`] and never
//! looks at another expert's output.
//!
//! [`ResolvedReading`]: advisory_core::ResolvedReading

pub mod band_oscillator;
pub mod mean_reversion;
pub mod momentum;
pub mod panel;
pub mod trend;
pub mod value;

#[cfg(test)]
mod test_support;

pub use band_oscillator::BandOscillatorExpert;
pub use mean_reversion::MeanReversionExpert;
pub use momentum::MomentumExpert;
pub use panel::ExpertPanel;
pub use trend::TrendExpert;
pub use value::ValueExpert;
