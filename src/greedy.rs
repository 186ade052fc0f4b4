use std::ops::Range;

use tracing::trace;

use crate::spectrum::Spectrum;

/// A query-peak candidate for one reference peak.
///
/// `effective_mz` is the query m/z minus the window shift, i.e. the
/// candidate's position in reference-m/z space. Forward-collision contests
/// use it so that a shifted candidate is contested via the same alignment
/// relation that admitted it.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    effective_mz: f32,
    intensity: f32,
}

/// One-to-one peak matcher for a single scoring call.
///
/// For each reference peak the in-window query candidates are kept on a
/// stack ordered by rising intensity, so the top is the preferred one.
/// Before a candidate is claimed, the later reference peaks that could also
/// reach it are scanned; a rival at least as intense takes precedence and
/// pops the candidate. The winner is marked used, which keeps the overall
/// matching a bijective partial matching. This is a local heuristic, not a
/// globally optimal assignment, and it is not symmetric in the two spectra.
pub(crate) struct GreedyMatcher {
    used: Vec<bool>,
    stack: Vec<Candidate>,
    highest_intensity: f32,
}

impl GreedyMatcher {
    pub fn new(query_len: usize) -> Self {
        Self {
            used: vec![false; query_len],
            stack: Vec::new(),
            highest_intensity: f32::NEG_INFINITY,
        }
    }

    /// Starts candidate collection for the next reference peak.
    pub fn begin_peak(&mut self) {
        self.stack.clear();
        self.highest_intensity = f32::NEG_INFINITY;
    }

    /// Pushes the unused candidates whose intensity exceeds everything
    /// collected so far for this reference peak, keeping the stack top the
    /// most intense candidate.
    ///
    /// `shift` must be the window shift the candidate range was produced
    /// with.
    pub fn collect(&mut self, query: &Spectrum, candidates: Range<usize>, shift: f32) {
        for index in candidates {
            let intensity = query.intensity()[index];
            if !self.used[index] && intensity > self.highest_intensity {
                self.stack.push(Candidate {
                    index,
                    effective_mz: query.mz()[index] - shift,
                    intensity,
                });
                self.highest_intensity = intensity;
            }
        }
    }

    /// Resolves the collected candidates against the later reference peaks
    /// and claims the winner. Returns the winning query index, or `None`
    /// when no candidate was collected.
    ///
    /// The scan walks reference peaks `peak + 1 .. forward_limit` while they
    /// can still reach the top candidate (rival mz within `tolerance` of the
    /// candidate's effective mz). A rival at least as intense as the top
    /// candidate pops it and restarts the scan; ties yield to the later
    /// reference peak, which is what resolves self-similarity to the
    /// identity matching. When the stack empties this way, the stack-bottom
    /// candidate is claimed rather than leaving the reference peak
    /// unmatched.
    pub fn resolve(
        &mut self,
        reference: &Spectrum,
        tolerance: f32,
        peak: usize,
        forward_limit: usize,
    ) -> Option<usize> {
        let bottom = *self.stack.first()?;
        let mut forward = peak + 1;

        let winner = loop {
            let top = match self.stack.last() {
                Some(&top) => top,
                None => {
                    trace!(peak, index = bottom.index, "stack empty, claiming bottom");
                    break bottom;
                }
            };

            if forward >= forward_limit || reference.mz()[forward] > top.effective_mz + tolerance {
                // no later reference peak can contest the candidate
                break top;
            }

            if reference.intensity()[forward] >= top.intensity {
                trace!(peak, forward, index = top.index, "popped by later peak");
                self.stack.pop();
                forward = peak + 1;
                continue;
            }

            forward += 1;
        };

        self.used[winner.index] = true;
        trace!(peak, index = winner.index, "claimed");
        Some(winner.index)
    }
}
