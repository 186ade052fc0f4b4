use crate::spectrum::Spectrum;

/// Per-pair score strategy, selected once per scoring call from the power
/// exponents so the matching loops avoid redundant `powf` calls.
///
/// Every variant evaluates the same formula
/// `(mz1 * mz2)^mz_power * (intensity1 * intensity2)^intensity_power`
/// with the unit/zero exponents folded away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairScorer {
    /// `mz_power == 0 && intensity_power == 1`
    Simple,
    /// `mz_power == 0`
    IntensityPower { intensity_power: f32 },
    /// `intensity_power == 1`
    MzPower { mz_power: f32 },
    Full {
        mz_power: f32,
        intensity_power: f32,
    },
}

impl PairScorer {
    pub fn new(mz_power: f32, intensity_power: f32) -> Self {
        if mz_power == 0.0 {
            if intensity_power == 1.0 {
                Self::Simple
            } else {
                Self::IntensityPower { intensity_power }
            }
        } else if intensity_power == 1.0 {
            Self::MzPower { mz_power }
        } else {
            Self::Full {
                mz_power,
                intensity_power,
            }
        }
    }

    /// Score contribution of one matched peak pair. NaN/Inf inputs propagate.
    pub fn score(self, intensity1: f32, intensity2: f32, mz1: f32, mz2: f32) -> f32 {
        match self {
            Self::Simple => intensity1 * intensity2,
            Self::IntensityPower { intensity_power } => {
                (intensity1 * intensity2).powf(intensity_power)
            }
            Self::MzPower { mz_power } => (mz1 * mz2).powf(mz_power) * intensity1 * intensity2,
            Self::Full {
                mz_power,
                intensity_power,
            } => (mz1 * mz2).powf(mz_power) * (intensity1 * intensity2).powf(intensity_power),
        }
    }
}

/// Squared norm of a whole spectrum for the cosine denominator:
/// `Σ mz_i^(2 * mz_power) * intensity_i^(2 * intensity_power)`,
/// with the same exponent fast paths as [`PairScorer`].
pub fn spectrum_norm(spectrum: &Spectrum, mz_power: f32, intensity_power: f32) -> f32 {
    let mz = spectrum.mz();
    let intensity = spectrum.intensity();

    if mz_power == 0.0 {
        if intensity_power == 1.0 {
            intensity.iter().map(|i| i * i).sum()
        } else {
            intensity
                .iter()
                .map(|i| i.powf(2.0 * intensity_power))
                .sum()
        }
    } else if intensity_power == 1.0 {
        mz.iter()
            .zip(intensity.iter())
            .map(|(m, i)| m.powf(2.0 * mz_power) * i * i)
            .sum()
    } else {
        mz.iter()
            .zip(intensity.iter())
            .map(|(m, i)| m.powf(2.0 * mz_power) * i.powf(2.0 * intensity_power))
            .sum()
    }
}

/// Clamps a final score into `[0, 1]`; non-finite values become NaN.
pub fn clamp_unit(score: f32) -> f32 {
    if !score.is_finite() {
        f32::NAN
    } else if score < 0.0 {
        0.0
    } else if score > 1.0 {
        1.0
    } else {
        score
    }
}
