//! Exhaustive parameter search over the restoration filter family.
//!
//! Every candidate beta runs through the clamp filter and every
//! (beta, delta) combination through the piecewise filter; each
//! restoration is scored against the noise-free original. The two
//! families track their minima independently: a strong clamp score
//! never displaces a piecewise candidate or vice versa.
//!
//! Evaluations are independent and read-only over the shared grids, so
//! they run under rayon. Selection happens afterwards in a sequential
//! fold over the order-preserving collected results, which keeps the
//! first-seen-wins tie-break deterministic regardless of scheduling.

use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::error::FilterError;
use crate::filters::restore::{clamp_filter, piecewise_filter, Statistic};
use crate::score::mean_abs_diff;

/// Filter family a sweep evaluation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Clamp,
    Piecewise,
}

/// One scored configuration, in enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub family: Family,
    pub beta: f32,
    /// Present for piecewise evaluations only.
    pub delta: Option<f32>,
    pub score: f64,
}

/// Best clamp-filter configuration seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestClamp {
    pub beta: f32,
    pub score: f64,
}

/// Best piecewise-filter configuration seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPiecewise {
    pub beta: f32,
    pub delta: f32,
    pub score: f64,
}

/// Result of one sweep: per-family bests plus every evaluation record
/// for the reporting surface.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub evaluations: Vec<Evaluation>,
    pub best_clamp: Option<BestClamp>,
    pub best_piecewise: Option<BestPiecewise>,
}

/// Grid-search filter parameters against a noisy grid.
///
/// Enumeration order is: for each beta, the clamp evaluation, then one
/// piecewise evaluation per delta. Ties on exact score keep the earlier
/// configuration (replacement only on strictly lower score).
///
/// # Arguments
/// * `original` - Noise-free reference grid
/// * `noisy` - Grid to restore
/// * `stat` - Neighbor statistic backing both parameterized filters
/// * `betas` - Candidate spread bounds
/// * `deltas` - Candidate transition widths for the piecewise filter
///
/// # Errors
/// [`FilterError::ShapeMismatch`] when the grids differ in shape;
/// [`FilterError::ZeroDelta`] when a candidate delta is zero.
pub fn sweep(
    original: ArrayView2<f32>,
    noisy: ArrayView2<f32>,
    stat: Statistic,
    betas: &[f32],
    deltas: &[f32],
) -> Result<SweepOutcome, FilterError> {
    if original.dim() != noisy.dim() {
        return Err(FilterError::ShapeMismatch {
            left: original.dim(),
            right: noisy.dim(),
        });
    }

    let mut jobs = Vec::with_capacity(betas.len() * (1 + deltas.len()));
    for &beta in betas {
        jobs.push((Family::Clamp, beta, None));
        for &delta in deltas {
            jobs.push((Family::Piecewise, beta, Some(delta)));
        }
    }

    let evaluations: Vec<Evaluation> = jobs
        .par_iter()
        .map(|&(family, beta, delta)| {
            let restored = match family {
                Family::Clamp => clamp_filter(noisy, stat, beta),
                Family::Piecewise => {
                    // delta is always Some for piecewise jobs
                    piecewise_filter(noisy, stat, beta, delta.unwrap_or(0.0))?
                }
            };
            let score = mean_abs_diff(original, restored.view())?;

            Ok(Evaluation {
                family,
                beta,
                delta,
                score,
            })
        })
        .collect::<Result<_, FilterError>>()?;

    let mut best_clamp: Option<BestClamp> = None;
    let mut best_piecewise: Option<BestPiecewise> = None;

    for eval in &evaluations {
        match eval.family {
            Family::Clamp => {
                if best_clamp.map_or(true, |b| eval.score < b.score) {
                    best_clamp = Some(BestClamp {
                        beta: eval.beta,
                        score: eval.score,
                    });
                }
            }
            Family::Piecewise => {
                if best_piecewise.map_or(true, |b| eval.score < b.score) {
                    best_piecewise = Some(BestPiecewise {
                        beta: eval.beta,
                        delta: eval.delta.unwrap_or(0.0),
                        score: eval.score,
                    });
                }
            }
        }
    }

    Ok(SweepOutcome {
        evaluations,
        best_clamp,
        best_piecewise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_perfect_restoration_scores_zero() {
        let original = Array2::<f32>::from_elem((3, 3), 10.0);
        let mut noisy = original.clone();
        noisy[[1, 1]] = 200.0;

        // beta = 0 snaps every cell to its median, recovering the
        // original exactly
        let outcome = sweep(
            original.view(),
            noisy.view(),
            Statistic::Median,
            &[0.0],
            &[1.0],
        )
        .unwrap();

        let best = outcome.best_clamp.unwrap();
        assert_eq!(best.beta, 0.0);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_uniform_grid_selects_first_configuration() {
        let grid = Array2::<f32>::from_elem((2, 2), 42.0);

        let outcome = sweep(
            grid.view(),
            grid.view(),
            Statistic::Median,
            &[1.0, 2.0],
            &[1.0],
        )
        .unwrap();

        // Every configuration scores exactly 0; first seen wins
        let clamp = outcome.best_clamp.unwrap();
        assert_eq!(clamp.beta, 1.0);
        assert_eq!(clamp.score, 0.0);

        let piecewise = outcome.best_piecewise.unwrap();
        assert_eq!(piecewise.beta, 1.0);
        assert_eq!(piecewise.delta, 1.0);
        assert_eq!(piecewise.score, 0.0);
    }

    #[test]
    fn test_nonzero_tie_keeps_earlier_beta() {
        let original = Array2::<f32>::from_elem((3, 3), 10.0);
        let mut noisy = original.clone();
        noisy[[1, 1]] = 50.0;

        // Both betas exceed the deviation, so neither clamp pass changes
        // anything: identical non-zero scores
        let outcome = sweep(
            original.view(),
            noisy.view(),
            Statistic::Median,
            &[100.0, 200.0],
            &[1.0],
        )
        .unwrap();

        let best = outcome.best_clamp.unwrap();
        assert_eq!(best.beta, 100.0);
        assert!(best.score > 0.0);
    }

    #[test]
    fn test_families_tracked_independently() {
        let original = Array2::<f32>::from_elem((3, 3), 10.0);
        let mut noisy = original.clone();
        noisy[[1, 1]] = 200.0;

        let outcome = sweep(
            original.view(),
            noisy.view(),
            Statistic::Median,
            &[5.0, 50.0],
            &[1.0, 10.0],
        )
        .unwrap();

        let clamp_min = outcome
            .evaluations
            .iter()
            .filter(|e| e.family == Family::Clamp)
            .map(|e| e.score)
            .fold(f64::INFINITY, f64::min);
        let piecewise_min = outcome
            .evaluations
            .iter()
            .filter(|e| e.family == Family::Piecewise)
            .map(|e| e.score)
            .fold(f64::INFINITY, f64::min);

        assert_eq!(outcome.best_clamp.unwrap().score, clamp_min);
        assert_eq!(outcome.best_piecewise.unwrap().score, piecewise_min);
    }

    #[test]
    fn test_evaluation_records_preserve_enumeration_order() {
        let grid = Array2::<f32>::from_elem((2, 2), 7.0);

        let outcome = sweep(
            grid.view(),
            grid.view(),
            Statistic::Mean,
            &[1.0, 2.0],
            &[3.0],
        )
        .unwrap();

        let order: Vec<(Family, f32, Option<f32>)> = outcome
            .evaluations
            .iter()
            .map(|e| (e.family, e.beta, e.delta))
            .collect();

        assert_eq!(
            order,
            vec![
                (Family::Clamp, 1.0, None),
                (Family::Piecewise, 1.0, Some(3.0)),
                (Family::Clamp, 2.0, None),
                (Family::Piecewise, 2.0, Some(3.0)),
            ]
        );
    }

    #[test]
    fn test_zero_delta_candidate_propagates() {
        let grid = Array2::<f32>::from_elem((2, 2), 7.0);

        let err = sweep(grid.view(), grid.view(), Statistic::Mean, &[1.0], &[0.0]).unwrap_err();

        assert_eq!(err, FilterError::ZeroDelta);
    }

    #[test]
    fn test_shape_mismatch_fails_before_any_evaluation() {
        let a = Array2::<f32>::zeros((2, 2));
        let b = Array2::<f32>::zeros((2, 3));

        let err = sweep(a.view(), b.view(), Statistic::Mean, &[1.0], &[1.0]).unwrap_err();

        assert_eq!(
            err,
            FilterError::ShapeMismatch {
                left: (2, 2),
                right: (2, 3)
            }
        );
    }

    #[test]
    fn test_single_cell_grid_sweep() {
        let original = array![[10.0]];
        let noisy = array![[60.0]];

        // One cell: the only neighbor statistic is the cell itself, so
        // every filter is the identity there and all scores equal 50
        let outcome = sweep(
            original.view(),
            noisy.view(),
            Statistic::Median,
            &[1.0, 2.0],
            &[1.0],
        )
        .unwrap();

        assert_eq!(outcome.best_clamp.unwrap().beta, 1.0);
        assert_eq!(outcome.best_piecewise.unwrap().beta, 1.0);
        for eval in &outcome.evaluations {
            assert_eq!(eval.score, 50.0);
        }
    }
}
