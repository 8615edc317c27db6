pub mod filters;

pub use crate::building_blocks::filters::*;

/// the user-facing parameters of the low-pass filter
#[repr(C)]
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum FilterParameterLabel {
    LowpassCutoffFrequency, // Hz, keep below Nyquist
    LowpassGain,            // passband gain in dB
    LowpassQFactor,         // resonance
}

/// How a filter instance moves from its current parameter set to a
/// newly requested one.
///
/// `CoefficientRamp` blends the five biquad coefficients directly,
/// which is cheap but interpolates in coefficient space, so large jumps
/// can briefly pass through combinations no valid parameter triple
/// would produce. `ParameterRamp` blends cutoff/gain/Q instead and
/// re-derives the coefficients every block, so every intermediate set
/// belongs to a real parameter triple.
///
/// The original chose between these at compile time; here it's a
/// constructor argument so both stay testable in one binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampPolicy {
    CoefficientRamp,
    ParameterRamp,
}
