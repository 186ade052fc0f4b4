use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("m/z ({0}) and intensity ({1}) arrays must have the same length")]
    PeakArrayShape(usize, usize),
    #[error("peaks must be ordered by ascending m/z (violated at index {0})")]
    UnsortedPeaks(usize),
}
