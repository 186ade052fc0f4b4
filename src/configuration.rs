/// Scoring parameters shared by the cosine similarity functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    /// Maximum allowed m/z difference between two matched peaks (inclusive).
    pub tolerance: f32,
    /// Exponent applied to the product of the matched m/z values.
    pub mz_power: f32,
    /// Exponent applied to the product of the matched intensities.
    pub intensity_power: f32,
}

impl Configuration {
    pub fn new(tolerance: f32, mz_power: f32, intensity_power: f32) -> Self {
        Self {
            tolerance,
            mz_power,
            intensity_power,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(0.1, 0.0, 1.0)
    }
}
