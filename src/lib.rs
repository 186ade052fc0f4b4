//! Spectral similarity scoring for mass-spectrometry library search.
//!
//! Scores two m/z-sorted peak lists with a greedy cosine, a precursor-shifted
//! ("modified") cosine, a neutral-loss cosine or an optimal-assignment
//! ("Hungarian") cosine, plus an m/z-only overlap ratio. All scores lie in
//! `[0, 1]`, or are NaN for infeasible input.

pub mod configuration;
/// Cosine score entry points
pub mod cosine;
pub mod error;
mod greedy;
/// Rectangular assignment solver
pub mod lsap;
pub mod overlap;
pub mod score;
pub mod spectrum;
mod window;

pub use configuration::Configuration;
pub use cosine::{
    cosine_greedy, cosine_greedy_simple, cosine_hungarian, cosine_neutral_losses, modified_cosine,
};
pub use error::Error;
pub use lsap::{solve_rectangular_assignment, Assignment};
pub use overlap::{intersect_mz, precursor_mz_match, ToleranceUnit};
pub use spectrum::Spectrum;
