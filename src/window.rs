use std::ops::Range;

use ndarray::ArrayView1;

/// Returns the indices of `mzs` that fall into the inclusive window
/// `[low + shift, high + shift]`, together with the advanced low-water
/// cursor.
///
/// `mzs` must be sorted ascending and the windows of consecutive calls must
/// not move backwards. A peak below the current lower bound can then never
/// satisfy any later (larger-mz) window, so the cursor only moves forward and
/// enumeration over all windows of one scoring call is O(n + m) amortized.
pub(crate) fn window_candidates(
    mzs: ArrayView1<'_, f32>,
    low: f32,
    high: f32,
    shift: f32,
    cursor: usize,
) -> (Range<usize>, usize) {
    let len = mzs.len();
    let low = low + shift;
    let high = high + shift;

    let mut start = cursor;
    while start < len && mzs[start] < low {
        start += 1;
    }

    let mut end = start;
    while end < len && mzs[end] <= high {
        end += 1;
    }

    (start..end, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn test_window_bounds_are_inclusive() {
        let mzs = Array1::from(vec![99.0, 99.5, 100.0, 100.5, 101.0]);
        let (range, _) = window_candidates(mzs.view(), 99.5, 100.5, 0.0, 0);
        assert_eq!(range, 1..4);
    }

    #[test]
    fn test_empty_window() {
        let mzs = Array1::from(vec![100.0, 500.0]);
        let (range, cursor) = window_candidates(mzs.view(), 200.0, 210.0, 0.0, 0);
        assert!(range.is_empty());
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_cursor_advances_monotonically() {
        let mzs = Array1::from(vec![100.0, 200.0, 300.0]);

        let (range, cursor) = window_candidates(mzs.view(), 199.0, 201.0, 0.0, 0);
        assert_eq!(range, 1..2);
        assert_eq!(cursor, 1);

        let (range, cursor) = window_candidates(mzs.view(), 299.0, 301.0, 0.0, cursor);
        assert_eq!(range, 2..3);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_cursor_skips_passed_peaks() {
        let mzs = Array1::from(vec![100.0, 200.0]);
        // peak 0 lies below the window and can never match again
        let (range, cursor) = window_candidates(mzs.view(), 150.0, 250.0, 0.0, 0);
        assert_eq!(range, 1..2);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_shift_moves_the_window() {
        let mzs = Array1::from(vec![100.0, 160.0]);
        let (range, _) = window_candidates(mzs.view(), 149.95, 150.05, 10.0, 0);
        assert_eq!(range, 1..2);
    }
}
