//! Boundary-aware neighborhood statistics.
//!
//! Every statistic is computed over the multiset formed by a cell itself
//! plus its in-bounds 8-connected neighbors. Out-of-bounds neighbors are
//! excluded outright (no edge clamping, padding, or wraparound), so the
//! neighborhood size ranges from 4 at a corner (3 neighbors + self) to 9
//! in the interior.
//!
//! These are pure functions of `(grid, row, col)`; the restoration
//! filters re-invoke them per pixel against the pre-filter grid.

use ndarray::ArrayView2;

/// Collect the cell and its in-bounds 8-connected neighbors.
fn neighborhood(grid: ArrayView2<f32>, row: usize, col: usize) -> Vec<f32> {
    let (height, width) = grid.dim();
    let mut values = Vec::with_capacity(9);

    for dy in -1isize..=1 {
        let sy = row as isize + dy;
        if sy < 0 || sy >= height as isize {
            continue;
        }

        for dx in -1isize..=1 {
            let sx = col as isize + dx;
            if sx < 0 || sx >= width as isize {
                continue;
            }

            values.push(grid[[sy as usize, sx as usize]]);
        }
    }

    values
}

/// Mean of a cell and its in-bounds 8-connected neighbors.
///
/// # Arguments
/// * `grid` - Intensity grid (height, width)
/// * `row` / `col` - Cell coordinates
///
/// # Returns
/// Arithmetic mean over 4 to 9 values depending on boundary position
pub fn neighbor_mean(grid: ArrayView2<f32>, row: usize, col: usize) -> f32 {
    let values = neighborhood(grid, row, col);
    values.iter().sum::<f32>() / values.len() as f32
}

/// Median of a cell and its in-bounds 8-connected neighbors.
///
/// The result is the element at index `count / 2` of the ascending-sorted
/// neighborhood. For even counts this is NOT the average of the two
/// middle elements; the deviation from a textbook median is a preserved
/// behavioral contract.
///
/// # Arguments
/// * `grid` - Intensity grid (height, width)
/// * `row` / `col` - Cell coordinates
///
/// # Returns
/// Median over 4 to 9 values depending on boundary position
pub fn neighbor_median(grid: ArrayView2<f32>, row: usize, col: usize) -> f32 {
    let mut values = neighborhood(grid, row, col);
    values.sort_by(f32::total_cmp);
    values[values.len() / 2]
}
