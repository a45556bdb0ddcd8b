//! desalt: impulsive-noise denoising experiment harness.
//!
//! Salts grayscale intensity grids with synthetic impulsive noise,
//! restores them with a family of neighbor-statistic filters, and
//! grid-searches filter parameters by mean absolute difference against
//! the clean original.
//!
//! ## Grid Format
//!
//! The core works on `ndarray::Array2<f32>` intensity grids of shape
//! `(height, width)`, values 0-255. Image files enter and leave only
//! through the [`io`] boundary adapter (channel 0 in, grayscale-as-RGB
//! out).
//!
//! ## Filter Family
//!
//! - **Clamp** - pulls each cell to within `beta` of its neighbor
//!   statistic.
//! - **Piecewise** - soft-clipping four-term absolute-value form with a
//!   `delta`-wide transition.
//! - **Median** - parameterless neighborhood-median baseline.
//!
//! The neighbor statistic (mean or median) backing the parameterized
//! filters is chosen per run, and [`search::sweep`] ranks every
//! configuration by [`score::mean_abs_diff`].

pub mod error;
pub mod filters;
pub mod io;
pub mod score;
pub mod search;

// Re-export commonly used items
pub use error::{FilterError, IoError};
pub use filters::noise::{add_impulsive_noise, MinstdRng, UniformSource};
pub use filters::restore::{clamp_filter, median_filter, piecewise_filter, Statistic};
pub use filters::stats::{neighbor_mean, neighbor_median};
pub use score::mean_abs_diff;
pub use search::{sweep, BestClamp, BestPiecewise, Evaluation, Family, SweepOutcome};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::noise::{add_impulsive_noise as add_impulsive_noise_impl, MinstdRng};
    use crate::filters::restore::{
        clamp_filter as clamp_filter_impl, median_filter as median_filter_impl,
        piecewise_filter as piecewise_filter_impl, Statistic,
    };
    use crate::score::mean_abs_diff as mean_abs_diff_impl;
    use crate::search::sweep as sweep_impl;

    fn parse_stat(stat: &str) -> PyResult<Statistic> {
        match stat {
            "mean" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            other => Err(PyValueError::new_err(format!(
                "unknown statistic {other:?}, expected \"mean\" or \"median\""
            ))),
        }
    }

    /// Salt a grid with impulsive noise using a seeded MINSTD source.
    ///
    /// Affected cells become `(value + amplitude) mod 255`.
    #[pyfunction]
    pub fn add_impulsive_noise<'py>(
        py: Python<'py>,
        grid: PyReadonlyArray2<'py, f32>,
        amplitude: i32,
        probability: f32,
        seed: u64,
    ) -> Bound<'py, PyArray2<f32>> {
        let mut rng = MinstdRng::new(seed);
        let result = add_impulsive_noise_impl(grid.as_array(), amplitude, probability, &mut rng);
        result.into_pyarray(py)
    }

    /// Clamp filter: pull each cell to within `beta` of its neighbor
    /// statistic ("mean" or "median").
    #[pyfunction]
    pub fn clamp_filter<'py>(
        py: Python<'py>,
        grid: PyReadonlyArray2<'py, f32>,
        stat: &str,
        beta: f32,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let stat = parse_stat(stat)?;
        let result = clamp_filter_impl(grid.as_array(), stat, beta);
        Ok(result.into_pyarray(py))
    }

    /// Piecewise-linear soft-clipping filter. `delta` must be nonzero.
    #[pyfunction]
    pub fn piecewise_filter<'py>(
        py: Python<'py>,
        grid: PyReadonlyArray2<'py, f32>,
        stat: &str,
        beta: f32,
        delta: f32,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let stat = parse_stat(stat)?;
        let result = piecewise_filter_impl(grid.as_array(), stat, beta, delta)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(result.into_pyarray(py))
    }

    /// Neighborhood-median baseline filter.
    #[pyfunction]
    pub fn median_filter<'py>(
        py: Python<'py>,
        grid: PyReadonlyArray2<'py, f32>,
    ) -> Bound<'py, PyArray2<f32>> {
        median_filter_impl(grid.as_array()).into_pyarray(py)
    }

    /// Mean absolute per-pixel difference between two equal-shaped grids.
    #[pyfunction]
    pub fn mean_abs_diff(
        a: PyReadonlyArray2<'_, f32>,
        b: PyReadonlyArray2<'_, f32>,
    ) -> PyResult<f64> {
        mean_abs_diff_impl(a.as_array(), b.as_array())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Exhaustive parameter sweep.
    ///
    /// Returns `(best_clamp, best_piecewise)` where `best_clamp` is
    /// `(beta, score)` and `best_piecewise` is `(beta, delta, score)`,
    /// either of which is `None` for an empty candidate grid.
    #[pyfunction]
    #[allow(clippy::type_complexity)]
    pub fn sweep(
        original: PyReadonlyArray2<'_, f32>,
        noisy: PyReadonlyArray2<'_, f32>,
        stat: &str,
        betas: Vec<f32>,
        deltas: Vec<f32>,
    ) -> PyResult<(Option<(f32, f64)>, Option<(f32, f32, f64)>)> {
        let stat = parse_stat(stat)?;
        let outcome = sweep_impl(original.as_array(), noisy.as_array(), stat, &betas, &deltas)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok((
            outcome.best_clamp.map(|b| (b.beta, b.score)),
            outcome.best_piecewise.map(|b| (b.beta, b.delta, b.score)),
        ))
    }

    /// desalt Python extension module
    #[pymodule]
    pub fn desalt(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(add_impulsive_noise, m)?)?;
        m.add_function(wrap_pyfunction!(clamp_filter, m)?)?;
        m.add_function(wrap_pyfunction!(piecewise_filter, m)?)?;
        m.add_function(wrap_pyfunction!(median_filter, m)?)?;
        m.add_function(wrap_pyfunction!(mean_abs_diff, m)?)?;
        m.add_function(wrap_pyfunction!(sweep, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::desalt;
