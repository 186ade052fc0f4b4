//! Rectangular linear sum assignment by shortest augmenting paths.
//!
//! Follows the algorithm described in pages 1685-1686 of:
//!
//! > DF Crouse. On implementing 2D rectangular assignment algorithms.
//! > IEEE Transactions on Aerospace and Electronic Systems 52(4):1679-1696,
//! > August 2016, doi: 10.1109/TAES.2016.140952
//!
//! The matrix cells hold pair *scores*; the solver minimizes the transformed
//! cost `offset - cost[row][col]`, so a maximum-score matching falls out of
//! the minimization.

use ndarray::ArrayView2;
use tracing::debug;

const UNASSIGNED: usize = usize::MAX;

/// A feasible optimal assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column assigned to each row.
    pub row_to_col: Vec<usize>,
    /// Number of assigned cells with strictly positive score.
    pub matched: usize,
    /// Sum of the assigned cells with strictly positive score.
    pub score: f32,
}

/// One Dijkstra-style search from `start_row` to the nearest unassigned
/// column under the current dual variables. Returns the sink column and the
/// path length, or `None` when no finite-cost path exists.
#[allow(clippy::too_many_arguments)]
fn augmenting_path(
    cost: &ArrayView2<'_, f32>,
    offset: f32,
    u: &[f32],
    v: &[f32],
    path: &mut [usize],
    row4col: &[usize],
    shortest_paths: &mut [f32],
    start_row: usize,
    visited_rows: &mut [bool],
    visited_cols: &mut [bool],
    remaining: &mut Vec<usize>,
) -> Option<(usize, f32)> {
    let nc = cost.ncols();
    let mut min = 0.0f32;

    // Filling this up in reverse order ensures that the solution of a
    // constant cost matrix is the identity assignment.
    remaining.clear();
    remaining.extend((0..nc).rev());

    visited_rows.fill(false);
    visited_cols.fill(false);
    shortest_paths.fill(f32::INFINITY);

    let mut row = start_row;
    loop {
        visited_rows[row] = true;

        let mut lowest = f32::INFINITY;
        let mut index = UNASSIGNED;

        for (it, &col) in remaining.iter().enumerate() {
            // true cell value is offset - cost[row][col]
            let reduced = min + offset - cost[[row, col]] - u[row] - v[col];

            if reduced < shortest_paths[col] {
                path[col] = row;
                shortest_paths[col] = reduced;
            }

            // When multiple columns tie for the minimum, prefer one that
            // yields a new sink node.
            if shortest_paths[col] < lowest
                || (shortest_paths[col] == lowest && row4col[col] == UNASSIGNED)
            {
                lowest = shortest_paths[col];
                index = it;
            }
        }

        if lowest == f32::INFINITY {
            return None; // infeasible cost matrix
        }

        min = lowest;
        let col = remaining[index];
        visited_cols[col] = true;
        remaining.swap_remove(index);

        if row4col[col] == UNASSIGNED {
            return Some((col, min));
        }
        row = row4col[col];
    }
}

/// Computes a maximum-score one-to-one assignment over a dense score matrix.
///
/// `offset` must be at least the largest cell score; the solver minimizes
/// `offset - cost`. Only assigned cells with strictly positive score count
/// toward `matched`/`score`, so rows forced onto empty cells do not report a
/// match.
///
/// Returns `None` when `offset` is infinite or no complete assignment exists;
/// an empty matrix yields an empty assignment.
pub fn solve_rectangular_assignment(
    cost: ArrayView2<'_, f32>,
    offset: f32,
) -> Option<Assignment> {
    if offset == f32::INFINITY {
        return None;
    }

    let (nr, nc) = cost.dim();
    if nr == 0 || nc == 0 {
        return Some(Assignment {
            row_to_col: Vec::new(),
            matched: 0,
            score: 0.0,
        });
    }

    let mut u = vec![0.0f32; nr];
    let mut v = vec![0.0f32; nc];
    let mut shortest_paths = vec![f32::INFINITY; nc];
    let mut path = vec![UNASSIGNED; nc];
    let mut col4row = vec![UNASSIGNED; nr];
    let mut row4col = vec![UNASSIGNED; nc];
    let mut visited_rows = vec![false; nr];
    let mut visited_cols = vec![false; nc];
    let mut remaining = Vec::with_capacity(nc);

    for row in 0..nr {
        let (sink, min) = augmenting_path(
            &cost,
            offset,
            &u,
            &v,
            &mut path,
            &row4col,
            &mut shortest_paths,
            row,
            &mut visited_rows,
            &mut visited_cols,
            &mut remaining,
        )?;

        // update dual variables
        u[row] += min;
        for i in 0..nr {
            if visited_rows[i] && i != row {
                u[i] += min - shortest_paths[col4row[i]];
            }
        }
        for j in 0..nc {
            if visited_cols[j] {
                v[j] -= min - shortest_paths[j];
            }
        }

        // augment the previous solution along the path back to `row`
        let mut sink = sink;
        loop {
            let i = path[sink];
            row4col[sink] = i;
            std::mem::swap(&mut col4row[i], &mut sink);
            if i == row {
                break;
            }
        }
    }

    let mut matched = 0;
    let mut score = 0.0f32;
    for row in 0..nr {
        let cell = cost[[row, col4row[row]]];
        if cell > 0.0 {
            score += cell;
            matched += 1;
        }
    }

    debug!(rows = nr, cols = nc, matched, "assignment solved");
    Some(Assignment {
        row_to_col: col4row,
        matched,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_constant_matrix_resolves_to_identity() {
        let cost = Array2::from_elem((3, 4), 1.0f32);
        let assignment = solve_rectangular_assignment(cost.view(), 1.0).unwrap();
        assert_eq!(assignment.row_to_col, vec![0, 1, 2]);
        assert_eq!(assignment.matched, 3);
        assert_eq!(assignment.score, 3.0);
    }

    #[test]
    fn test_optimal_beats_row_greedy() {
        // greedy row-wise selection would take 0.6 + 0.665 = 1.265
        let cost = arr2(&[[0.57f32, 0.6], [0.665, 0.7]]);
        let assignment = solve_rectangular_assignment(cost.view(), 0.7).unwrap();
        assert_eq!(assignment.row_to_col, vec![0, 1]);
        assert_eq!(assignment.matched, 2);
        assert!((assignment.score - 1.27).abs() < 1e-6);
    }

    #[test]
    fn test_maximizes_total_score() {
        let cost = arr2(&[[1.0f32, 2.0], [2.0, 10.0]]);
        let assignment = solve_rectangular_assignment(cost.view(), 10.0).unwrap();
        assert_eq!(assignment.row_to_col, vec![0, 1]);
        assert_eq!(assignment.score, 11.0);
    }

    #[test]
    fn test_rectangular_single_row() {
        let cost = arr2(&[[0.2f32, 0.9, 0.5]]);
        let assignment = solve_rectangular_assignment(cost.view(), 0.9).unwrap();
        assert_eq!(assignment.row_to_col, vec![1]);
        assert_eq!(assignment.matched, 1);
        assert_eq!(assignment.score, 0.9);
    }

    #[test]
    fn test_zero_cells_do_not_count_as_matches() {
        // row 1 is forced onto an empty cell
        let cost = arr2(&[[1.0f32, 0.0], [0.0, 0.0]]);
        let assignment = solve_rectangular_assignment(cost.view(), 1.0).unwrap();
        assert_eq!(assignment.matched, 1);
        assert_eq!(assignment.score, 1.0);
    }

    #[test]
    fn test_infinite_offset_is_infeasible() {
        let cost = Array2::from_elem((2, 2), 1.0f32);
        assert!(solve_rectangular_assignment(cost.view(), f32::INFINITY).is_none());
    }

    #[test]
    fn test_empty_matrix() {
        let cost = Array2::<f32>::zeros((0, 0));
        let assignment = solve_rectangular_assignment(cost.view(), 0.0).unwrap();
        assert_eq!(assignment.matched, 0);
        assert_eq!(assignment.score, 0.0);
    }
}
