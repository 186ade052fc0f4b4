use crate::spectrum::Spectrum;

/// Unit of a precursor m/z tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceUnit {
    Dalton,
    Ppm,
}

/// Jaccard-style m/z overlap of two sorted spectra: the number of peak pairs
/// within `tolerance` (inclusive) of each other over the size of the peak
/// union. Intensities are ignored.
///
/// Returns a value in `[0, 1]`; spectra without any intersecting peak
/// (including empty spectra) score 0.
pub fn intersect_mz(reference: &Spectrum, query: &Spectrum, tolerance: f32) -> f32 {
    let mz1 = reference.mz();
    let mz2 = query.mz();

    let mut peak1 = 0;
    let mut peak2 = 0;
    let mut count_intersect = 0usize;
    let mut count_union = 0usize;

    while peak1 < mz1.len() && peak2 < mz2.len() {
        if mz1[peak1] + tolerance < mz2[peak2] {
            peak1 += 1;
            count_union += 1;
        } else if mz2[peak2] + tolerance < mz1[peak1] {
            peak2 += 1;
            count_union += 1;
        } else {
            peak1 += 1;
            peak2 += 1;
            count_union += 1;
            count_intersect += 1;
        }
    }

    count_union += mz1.len() - peak1 + mz2.len() - peak2;

    if count_intersect == 0 {
        0.0
    } else {
        count_intersect as f32 / count_union as f32
    }
}

/// Whether two precursor m/z values agree within `tolerance` (inclusive),
/// measured in Dalton or in parts per million of the mean m/z.
pub fn precursor_mz_match(
    reference_mz: f32,
    query_mz: f32,
    tolerance: f32,
    unit: ToleranceUnit,
) -> bool {
    let difference = (reference_mz - query_mz).abs();

    match unit {
        ToleranceUnit::Dalton => difference <= tolerance,
        ToleranceUnit::Ppm => {
            let mean = (reference_mz + query_mz).abs() / 2.0;
            difference / mean * 1e6 <= tolerance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(peaks: &[(f32, f32)]) -> Spectrum {
        Spectrum::from_peaks(peaks).unwrap()
    }

    #[test]
    fn test_self_intersection_is_one() {
        let spectrum = spectrum(&[(100.0, 1.0), (200.0, 0.5), (300.0, 0.25)]);
        assert_eq!(intersect_mz(&spectrum, &spectrum, 0.05), 1.0);
    }

    #[test]
    fn test_partial_intersection() {
        let reference = spectrum(&[(100.0, 1.0), (200.0, 1.0), (300.0, 1.0)]);
        let query = spectrum(&[(100.01, 1.0), (400.0, 1.0)]);
        // one matched pair, union of four peaks
        assert_eq!(intersect_mz(&reference, &query, 0.05), 0.25);
    }

    #[test]
    fn test_disjoint_spectra_intersect_zero() {
        let reference = spectrum(&[(100.0, 1.0)]);
        let query = spectrum(&[(500.0, 1.0)]);
        assert_eq!(intersect_mz(&reference, &query, 0.05), 0.0);
    }

    #[test]
    fn test_empty_spectra_intersect_zero() {
        let empty = spectrum(&[]);
        assert_eq!(intersect_mz(&empty, &empty, 0.05), 0.0);
    }

    #[test]
    fn test_intersection_boundary_is_inclusive() {
        let reference = spectrum(&[(100.0, 1.0)]);
        let query = spectrum(&[(100.5, 1.0)]);
        assert_eq!(intersect_mz(&reference, &query, 0.5), 1.0);
        assert_eq!(intersect_mz(&reference, &query, 0.4), 0.0);
    }

    #[test]
    fn test_precursor_match_dalton() {
        assert!(precursor_mz_match(500.0, 500.4, 0.5, ToleranceUnit::Dalton));
        assert!(precursor_mz_match(500.0, 500.5, 0.5, ToleranceUnit::Dalton));
        assert!(!precursor_mz_match(500.0, 500.6, 0.5, ToleranceUnit::Dalton));
    }

    #[test]
    fn test_precursor_match_ppm() {
        // ~5 ppm at m/z 1000
        assert!(precursor_mz_match(1000.0, 1000.005, 5.5, ToleranceUnit::Ppm));
        assert!(!precursor_mz_match(1000.0, 1000.005, 4.5, ToleranceUnit::Ppm));
    }
}
