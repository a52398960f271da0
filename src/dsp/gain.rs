//! Fixed attenuation stages.

/*
Attenuation in Decibels
=======================

Level changes are measured in decibels because hearing is logarithmic:

    dB = 20 × log₁₀(amplitude_ratio)

The effect uses three fixed stages, rounded to three decimals:

    -6 dB  →  ×0.501   dry path
    -3 dB  →  ×0.708   first echo
    -1 dB  →  ×0.891   second echo, on top of the first -3 dB

The rounded values are part of the sound. They are constants, not derived
from the dB figures at runtime, so output stays bit-exact.
*/

/// -6 dB as a linear factor.
pub const G6: f64 = 0.501;
/// -3 dB as a linear factor.
pub const G3: f64 = 0.708;
/// -1 dB as a linear factor.
pub const G1: f64 = 0.891;

/// One of the three fixed attenuation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainStage {
    Minus6Db,
    Minus3Db,
    Minus1Db,
}

impl GainStage {
    /// Linear multiplier for this stage.
    #[inline]
    pub const fn factor(self) -> f64 {
        match self {
            GainStage::Minus6Db => G6,
            GainStage::Minus3Db => G3,
            GainStage::Minus1Db => G1,
        }
    }

    #[inline]
    pub fn apply(self, sample: f64) -> f64 {
        sample * self.factor()
    }

    /// Nominal attenuation in dB.
    pub const fn decibels(self) -> f64 {
        match self {
            GainStage::Minus6Db => -6.0,
            GainStage::Minus3Db => -3.0,
            GainStage::Minus1Db => -1.0,
        }
    }
}

/// Multiply a buffer by one stage's factor in place.
#[inline]
pub fn apply_stage(signal: &mut [f64], stage: GainStage) {
    let gain = stage.factor();
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}
