use ndarray::Array1;

use crate::error::Error;

/// A mass spectrum as parallel m/z and intensity columns, ordered by
/// ascending m/z.
///
/// The ordering is validated once at construction; the scoring code relies on
/// it for its window-search correctness and never re-checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    mz: Array1<f32>,
    intensity: Array1<f32>,
}

impl Spectrum {
    /// Creates a spectrum from columns already sorted by m/z.
    ///
    /// Arguments:
    /// * `mz` - The m/z values, non-decreasing.
    /// * `intensity` - The intensity values, same length as `mz`.
    ///
    pub fn new(mz: Array1<f32>, intensity: Array1<f32>) -> Result<Self, Error> {
        if mz.len() != intensity.len() {
            return Err(Error::PeakArrayShape(mz.len(), intensity.len()));
        }

        for index in 1..mz.len() {
            if mz[index] < mz[index - 1] {
                return Err(Error::UnsortedPeaks(index));
            }
        }

        Ok(Self { mz, intensity })
    }

    /// Creates a spectrum from unsorted columns, sorting the peaks by m/z
    /// first.
    pub fn from_unsorted(mz: Array1<f32>, intensity: Array1<f32>) -> Result<Self, Error> {
        if mz.len() != intensity.len() {
            return Err(Error::PeakArrayShape(mz.len(), intensity.len()));
        }

        let mut peaks: Vec<(f32, f32)> = mz
            .iter()
            .copied()
            .zip(intensity.iter().copied())
            .collect();
        peaks.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(Self {
            mz: peaks.iter().map(|peak| peak.0).collect(),
            intensity: peaks.iter().map(|peak| peak.1).collect(),
        })
    }

    /// Creates a spectrum from a slice of `(mz, intensity)` pairs sorted by
    /// m/z.
    pub fn from_peaks(peaks: &[(f32, f32)]) -> Result<Self, Error> {
        Self::new(
            peaks.iter().map(|peak| peak.0).collect(),
            peaks.iter().map(|peak| peak.1).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    pub fn mz(&self) -> &Array1<f32> {
        &self.mz
    }

    pub fn intensity(&self) -> &Array1<f32> {
        &self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let result = Spectrum::new(
            Array1::from(vec![100.0, 200.0]),
            Array1::from(vec![1.0, 2.0, 3.0]),
        );
        assert!(matches!(result, Err(Error::PeakArrayShape(2, 3))));
    }

    #[test]
    fn test_unsorted_mz_is_rejected() {
        let result = Spectrum::new(
            Array1::from(vec![100.0, 300.0, 200.0]),
            Array1::from(vec![1.0, 2.0, 3.0]),
        );
        assert!(matches!(result, Err(Error::UnsortedPeaks(2))));
    }

    #[test]
    fn test_ties_in_mz_are_accepted() {
        let spectrum = Spectrum::new(
            Array1::from(vec![100.0, 100.0, 200.0]),
            Array1::from(vec![1.0, 2.0, 3.0]),
        );
        assert!(spectrum.is_ok());
    }

    #[test]
    fn test_from_unsorted_sorts_by_mz() {
        let spectrum = Spectrum::from_unsorted(
            Array1::from(vec![300.0, 100.0, 200.0]),
            Array1::from(vec![3.0, 1.0, 2.0]),
        )
        .unwrap();
        assert_eq!(spectrum.mz(), &Array1::from(vec![100.0, 200.0, 300.0]));
        assert_eq!(spectrum.intensity(), &Array1::from(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_from_peaks() {
        let spectrum = Spectrum::from_peaks(&[(100.0, 1.0), (200.0, 0.5)]).unwrap();
        assert_eq!(spectrum.len(), 2);
        assert_eq!(spectrum.mz()[1], 200.0);
        assert_eq!(spectrum.intensity()[1], 0.5);
    }
}
