//! Restoration scoring: mean absolute per-pixel difference.
//!
//! This is the sole fitness metric the parameter search ranks by. Lower
//! is better. Shapes must match exactly; a mismatch is a caller contract
//! violation, never silently coerced.

use ndarray::ArrayView2;

use crate::error::FilterError;

/// Mean of `|a - b|` over all cells of two equal-shaped grids.
///
/// Accumulates in f64 so large images do not lose precision in the
/// metric the search compares.
///
/// # Errors
/// [`FilterError::ShapeMismatch`] when the grids differ in shape.
pub fn mean_abs_diff(a: ArrayView2<f32>, b: ArrayView2<f32>) -> Result<f64, FilterError> {
    if a.dim() != b.dim() {
        return Err(FilterError::ShapeMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }

    let total: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64 - y as f64).abs())
        .sum();

    Ok(total / a.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_identical_grids_score_zero() {
        let grid = array![[3.0, 7.0], [11.0, 200.0]];

        assert_eq!(mean_abs_diff(grid.view(), grid.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = array![[10.0, 20.0], [30.0, 40.0]];
        let b = array![[12.0, 15.0], [35.0, 40.0]];

        let ab = mean_abs_diff(a.view(), b.view()).unwrap();
        let ba = mean_abs_diff(b.view(), a.view()).unwrap();

        assert_eq!(ab, ba);
        assert_eq!(ab, (2.0 + 5.0 + 5.0 + 0.0) / 4.0);
    }

    #[test]
    fn test_shape_mismatch_fails_fast() {
        let a = Array2::<f32>::zeros((2, 3));
        let b = Array2::<f32>::zeros((3, 2));

        let err = mean_abs_diff(a.view(), b.view()).unwrap_err();

        assert_eq!(
            err,
            FilterError::ShapeMismatch {
                left: (2, 3),
                right: (3, 2)
            }
        );
    }
}
