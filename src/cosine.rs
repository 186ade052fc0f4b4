use ndarray::{s, Array2};
use tracing::debug;

use crate::{
    configuration::Configuration,
    greedy::GreedyMatcher,
    lsap::solve_rectangular_assignment,
    score::{clamp_unit, spectrum_norm, PairScorer},
    spectrum::Spectrum,
    window::window_candidates,
};

/// Divides an accumulated match score by the whole-spectrum norms and clamps
/// it into `[0, 1]`.
///
/// The division is skipped while the accumulated score is zero, so spectra
/// with degenerate norms (empty, all-zero intensities) score 0 rather than
/// NaN.
fn normalize(
    score: f32,
    reference: &Spectrum,
    query: &Spectrum,
    config: &Configuration,
) -> f32 {
    let mut score = score;

    if score != 0.0 {
        let norm1 = spectrum_norm(reference, config.mz_power, config.intensity_power);
        let norm2 = spectrum_norm(query, config.mz_power, config.intensity_power);
        score /= (norm1 * norm2).sqrt();
    }

    clamp_unit(score)
}

/// Greedy cosine similarity of two m/z-sorted spectra.
///
/// Every reference peak greedily claims its most intense unused query peak
/// within `config.tolerance` (inclusive), with a forward-collision check that
/// yields contested peaks to more intense later reference peaks. The
/// accumulated pair scores are normalized by both spectrum norms.
///
/// Returns a score in `[0, 1]`, or NaN if the arithmetic went non-finite.
/// Note that reference and query roles are not interchangeable.
pub fn cosine_greedy(reference: &Spectrum, query: &Spectrum, config: &Configuration) -> f32 {
    let scorer = PairScorer::new(config.mz_power, config.intensity_power);
    let mut matcher = GreedyMatcher::new(query.len());
    let mut cursor = 0;
    let mut score = 0.0f32;

    for peak in 0..reference.len() {
        let low = reference.mz()[peak] - config.tolerance;
        let high = reference.mz()[peak] + config.tolerance;

        matcher.begin_peak();
        let (candidates, advanced) = window_candidates(query.mz().view(), low, high, 0.0, cursor);
        cursor = advanced;
        matcher.collect(query, candidates, 0.0);

        if let Some(winner) = matcher.resolve(reference, config.tolerance, peak, reference.len()) {
            score += scorer.score(
                reference.intensity()[peak],
                query.intensity()[winner],
                reference.mz()[peak],
                query.mz()[winner],
            );
        }
    }

    normalize(score, reference, query, config)
}

/// Greedy cosine similarity with fixed exponents (`mz_power` 0,
/// `intensity_power` 1), i.e. the plain normalized dot product of matched
/// intensities.
pub fn cosine_greedy_simple(reference: &Spectrum, query: &Spectrum, tolerance: f32) -> f32 {
    cosine_greedy(
        reference,
        query,
        &Configuration {
            tolerance,
            ..Configuration::default()
        },
    )
}

/// Modified cosine similarity: peaks match either directly or displaced by
/// the constant `shift` (typically the precursor mass difference).
///
/// For each reference peak, candidates from the direct window
/// `[mz - tolerance, mz + tolerance]` and the shifted window
/// `[mz - tolerance + shift, mz + tolerance + shift]` compete on intensity
/// like in [`cosine_greedy`]. Each window keeps its own monotonic cursor.
pub fn modified_cosine(
    reference: &Spectrum,
    query: &Spectrum,
    shift: f32,
    config: &Configuration,
) -> f32 {
    let scorer = PairScorer::new(config.mz_power, config.intensity_power);
    let mut matcher = GreedyMatcher::new(query.len());
    let mut direct_cursor = 0;
    let mut shifted_cursor = 0;
    let mut score = 0.0f32;

    for peak in 0..reference.len() {
        let low = reference.mz()[peak] - config.tolerance;
        let high = reference.mz()[peak] + config.tolerance;

        matcher.begin_peak();

        let (candidates, advanced) =
            window_candidates(query.mz().view(), low, high, 0.0, direct_cursor);
        direct_cursor = advanced;
        matcher.collect(query, candidates, 0.0);

        let (candidates, advanced) =
            window_candidates(query.mz().view(), low, high, shift, shifted_cursor);
        shifted_cursor = advanced;
        matcher.collect(query, candidates, shift);

        if let Some(winner) = matcher.resolve(reference, config.tolerance, peak, reference.len()) {
            score += scorer.score(
                reference.intensity()[peak],
                query.intensity()[winner],
                reference.mz()[peak],
                query.mz()[winner],
            );
        }
    }

    normalize(score, reference, query, config)
}

/// Neutral-loss cosine similarity: peaks are aligned on their mass loss
/// relative to the precursor, i.e. a query peak matches a reference peak when
/// `query_precursor_mz - query_mz` is within tolerance of
/// `reference_precursor_mz - reference_mz`.
///
/// Peaks above their own precursor m/z carry no neutral loss and are excluded
/// from matching; the norms still cover the whole spectra.
pub fn cosine_neutral_losses(
    reference: &Spectrum,
    query: &Spectrum,
    reference_precursor_mz: f32,
    query_precursor_mz: f32,
    config: &Configuration,
) -> f32 {
    let scorer = PairScorer::new(config.mz_power, config.intensity_power);
    let shift = query_precursor_mz - reference_precursor_mz;

    // sorted inputs make the eligible peaks a prefix on both sides
    let reference_limit = reference
        .mz()
        .iter()
        .take_while(|&&mz| mz <= reference_precursor_mz)
        .count();
    let query_limit = query
        .mz()
        .iter()
        .take_while(|&&mz| mz <= query_precursor_mz)
        .count();
    let query_mzs = query.mz().slice(s![..query_limit]);

    let mut matcher = GreedyMatcher::new(query_limit);
    let mut cursor = 0;
    let mut score = 0.0f32;

    for peak in 0..reference_limit {
        let low = reference.mz()[peak] - config.tolerance;
        let high = reference.mz()[peak] + config.tolerance;

        matcher.begin_peak();
        let (candidates, advanced) = window_candidates(query_mzs, low, high, shift, cursor);
        cursor = advanced;
        matcher.collect(query, candidates, shift);

        if let Some(winner) = matcher.resolve(reference, config.tolerance, peak, reference_limit) {
            score += scorer.score(
                reference.intensity()[peak],
                query.intensity()[winner],
                reference.mz()[peak],
                query.mz()[winner],
            );
        }
    }

    normalize(score, reference, query, config)
}

/// Cosine similarity under a globally optimal one-to-one peak assignment.
///
/// All in-tolerance peak pairs are enumerated first. Peaks that occur in
/// exactly one pair are scored directly; the remaining ambiguous peaks span a
/// dense score matrix that is resolved by the rectangular assignment solver.
/// Weakly dominates [`cosine_greedy`] on the same inputs.
///
/// Returns NaN when the assignment is infeasible.
pub fn cosine_hungarian(reference: &Spectrum, query: &Spectrum, config: &Configuration) -> f32 {
    let scorer = PairScorer::new(config.mz_power, config.intensity_power);

    let mut used1 = vec![0usize; reference.len()];
    let mut used2 = vec![0usize; query.len()];
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut cursor = 0;

    for peak1 in 0..reference.len() {
        let low = reference.mz()[peak1] - config.tolerance;
        let high = reference.mz()[peak1] + config.tolerance;

        let (candidates, advanced) = window_candidates(query.mz().view(), low, high, 0.0, cursor);
        cursor = advanced;

        for peak2 in candidates {
            used1[peak1] += 1;
            used2[peak2] += 1;
            pairs.push((peak1, peak2));
        }
    }

    let mut score = 0.0f32;
    let mut matched = 0;

    if !pairs.is_empty() {
        // ambiguous peaks (more than one viable pairing on either side) get
        // compact row/column indices in the cost matrix
        let mut map1: Vec<Option<usize>> = vec![None; reference.len()];
        let mut map2: Vec<Option<usize>> = vec![None; query.len()];
        let mut selected1 = 0;
        let mut selected2 = 0;

        for &(peak1, peak2) in &pairs {
            if used1[peak1] != 1 || used2[peak2] != 1 {
                if map1[peak1].is_none() {
                    map1[peak1] = Some(selected1);
                    selected1 += 1;
                }
                if map2[peak2].is_none() {
                    map2[peak2] = Some(selected2);
                    selected2 += 1;
                }
            }
        }

        // the solver expects rows <= columns; the assignment is symmetric
        // under transposition
        let transposed = selected1 > selected2;
        let shape = if transposed {
            (selected2, selected1)
        } else {
            (selected1, selected2)
        };

        let mut cost = Array2::<f32>::zeros(shape);
        let mut offset = 0.0f32;

        for &(peak1, peak2) in &pairs {
            let pair_score = scorer.score(
                reference.intensity()[peak1],
                query.intensity()[peak2],
                reference.mz()[peak1],
                query.mz()[peak2],
            );

            match (map1[peak1], map2[peak2]) {
                (Some(row), Some(col)) => {
                    // keep a structural pairing distinguishable from an
                    // empty cell
                    let pair_score = if pair_score == 0.0 {
                        f32::MIN_POSITIVE
                    } else {
                        pair_score
                    };

                    if pair_score > offset {
                        offset = pair_score;
                    }

                    let cell = if transposed { (col, row) } else { (row, col) };
                    cost[cell] = pair_score;
                }
                _ => {
                    score += pair_score;
                    matched += 1;
                }
            }
        }

        match solve_rectangular_assignment(cost.view(), offset) {
            Some(assignment) => {
                score += assignment.score;
                matched += assignment.matched;
            }
            None => return f32::NAN,
        }
    }

    debug!(matched, "optimal assignment matching complete");
    normalize(score, reference, query, config)
}
