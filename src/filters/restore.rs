//! Restoration filters: clamp, piecewise-linear, median.
//!
//! All three operators read an input grid, compute a neighbor statistic
//! per cell against that same pre-filter grid (never a partially-updated
//! output), and produce a fresh grid with every cell clamped to [0, 255].
//!
//! The clamp and piecewise filters can run against either neighbor
//! statistic; selection is a [`Statistic`] parameter, not a fixed
//! default, so the same sweep can compare mean-backed and median-backed
//! restorations.

use ndarray::{Array2, ArrayView2};

use crate::error::FilterError;
use crate::filters::stats::{neighbor_mean, neighbor_median};

/// Which neighbor statistic backs a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
}

impl Statistic {
    /// Evaluate the statistic at one cell of the pre-filter grid.
    pub fn eval(self, grid: ArrayView2<f32>, row: usize, col: usize) -> f32 {
        match self {
            Statistic::Mean => neighbor_mean(grid, row, col),
            Statistic::Median => neighbor_median(grid, row, col),
        }
    }
}

/// Clamp a raw filter output into [0, 255], counting range anomalies.
///
/// Pre-clamp escapes are expected at extreme parameter values; the count
/// is surfaced once per pass through tracing.
fn clamp_intensity(value: f32, escaped: &mut usize) -> f32 {
    if !(0.0..=255.0).contains(&value) {
        *escaped += 1;
    }
    value.clamp(0.0, 255.0)
}

fn report_escapes(filter: &str, escaped: usize) {
    if escaped > 0 {
        tracing::debug!(filter, cells = escaped, "clamped out-of-range filter outputs");
    }
}

// ============================================================================
// Clamp filter
// ============================================================================

/// Rudimentary clamp filter.
///
/// Each cell is pulled back to within `beta` of its neighbor statistic
/// `m`: values above `m + beta` snap to `m + beta`, values below
/// `m - beta` snap to `m - beta`, values in between pass through.
///
/// # Arguments
/// * `input` - Intensity grid (height, width)
/// * `stat` - Neighbor statistic backing the filter
/// * `beta` - Non-negative spread bound
///
/// # Returns
/// New grid, every cell clamped to [0, 255]
pub fn clamp_filter(input: ArrayView2<f32>, stat: Statistic, beta: f32) -> Array2<f32> {
    let (height, width) = input.dim();
    let mut output = Array2::<f32>::zeros((height, width));
    let mut escaped = 0usize;

    for y in 0..height {
        for x in 0..width {
            let m = stat.eval(input, y, x);
            let value = input[[y, x]];

            let snapped = if value > m + beta {
                m + beta
            } else if value < m - beta {
                m - beta
            } else {
                value
            };

            output[[y, x]] = clamp_intensity(snapped, &mut escaped);
        }
    }

    report_escapes("clamp", escaped);
    output
}

// ============================================================================
// Piecewise-linear filter
// ============================================================================

/// Piecewise-linear soft-clipping filter.
///
/// For each cell with value `x` and neighbor statistic `m`:
///
/// ```text
/// f(x) = m - k*|m+beta-x| + k*|m-beta-x| - h*|m-beta-delta-x| + h*|m+beta+delta-x|
/// k = (beta + delta) / (2 * delta)
/// h = beta / (2 * delta)
/// ```
///
/// The four-term combination is the contract; it is the identity for
/// deviations up to `beta`, decays linearly across the `delta`-wide
/// transition, and returns exactly `m` beyond `beta + delta`. It is NOT
/// replaced by an equivalent-looking simplification; the boundary and
/// rounding behavior depends on this exact form.
///
/// # Arguments
/// * `input` - Intensity grid (height, width)
/// * `stat` - Neighbor statistic backing the filter
/// * `beta` - Non-negative spread bound
/// * `delta` - Transition width, must be nonzero
///
/// # Errors
/// [`FilterError::ZeroDelta`] when `delta == 0` (division by delta).
pub fn piecewise_filter(
    input: ArrayView2<f32>,
    stat: Statistic,
    beta: f32,
    delta: f32,
) -> Result<Array2<f32>, FilterError> {
    if delta == 0.0 {
        return Err(FilterError::ZeroDelta);
    }

    let k = (beta + delta) / (2.0 * delta);
    let h = beta / (2.0 * delta);

    let (height, width) = input.dim();
    let mut output = Array2::<f32>::zeros((height, width));
    let mut escaped = 0usize;

    for y in 0..height {
        for x in 0..width {
            let m = stat.eval(input, y, x);
            let value = input[[y, x]];

            let filtered = m - k * (m + beta - value).abs() + k * (m - beta - value).abs()
                - h * (m - beta - delta - value).abs()
                + h * (m + beta + delta - value).abs();

            output[[y, x]] = clamp_intensity(filtered, &mut escaped);
        }
    }

    report_escapes("piecewise", escaped);
    Ok(output)
}

// ============================================================================
// Median filter
// ============================================================================

/// Median-only baseline: every cell replaced by its neighborhood median.
///
/// # Arguments
/// * `input` - Intensity grid (height, width)
///
/// # Returns
/// New grid, every cell clamped to [0, 255]
pub fn median_filter(input: ArrayView2<f32>) -> Array2<f32> {
    let (height, width) = input.dim();
    let mut output = Array2::<f32>::zeros((height, width));
    let mut escaped = 0usize;

    for y in 0..height {
        for x in 0..width {
            let m = neighbor_median(input, y, x);
            output[[y, x]] = clamp_intensity(m, &mut escaped);
        }
    }

    report_escapes("median", escaped);
    output
}
