//! Toolpath comparison utility.
//!
//! Measures how far an actual toolpath strays from an expected one,
//! point by point. Shares no state with the conversion pipeline; both
//! inputs are plain coordinate lists so callers can compare toolpaths
//! from any source.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationError {
    #[error("toolpaths differ in length: expected {expected} points, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("toolpaths are empty")]
    Empty,
}

/// Per-point Euclidean deviations and their mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation {
    pub mean: f64,
    pub per_point: Vec<f64>,
}

/// Compare two equal-length toolpaths point by point.
pub fn toolpath_deviation(
    expected: &[(f64, f64)],
    actual: &[(f64, f64)],
) -> Result<Deviation, DeviationError> {
    if expected.len() != actual.len() {
        return Err(DeviationError::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    if expected.is_empty() {
        return Err(DeviationError::Empty);
    }

    let per_point: Vec<f64> = expected
        .iter()
        .zip(actual)
        .map(|(&(ex, ey), &(ax, ay))| ((ax - ex).powi(2) + (ay - ey).powi(2)).sqrt())
        .collect();
    let mean = per_point.iter().sum::<f64>() / per_point.len() as f64;
    Ok(Deviation { mean, per_point })
}
