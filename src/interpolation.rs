//! Lagrange interpolation over bulletin samples.
//!
//! Every continuous quantity of the crate is produced here: the record locator gathers a
//! window of `(time, value)` [`Sample`]s and [`lagrange_interp`] evaluates the unique
//! polynomial of degree `n - 1` passing through them at the query time.
//!
//! The windows are small (ten samples with the default half-width), so the direct
//! `O(n²)` form is used and terms are accumulated in index order.
use itertools::Itertools;

use crate::iers_errors::IersError;

/// One `(x, y)` point of an interpolation dataset.
///
/// `x` is a time coordinate (JD or MJD depending on the bulletin), `y` the bulletin value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Sample { x, y }
    }
}

/// Interpolate the value of `y` at `x` through the given samples.
///
/// Arguments
/// ---------
/// * `x`: abscissa to evaluate
/// * `samples`: at least two samples with pairwise distinct `x`
///
/// Return
/// ------
/// * `Σ_i y_i · Π_{j≠i} (x - x_j) / (x_i - x_j)`
/// * [`IersError::MalformedDataset`] when fewer than two samples are given or two samples
///   share the same abscissa. A correct window never triggers it.
pub fn lagrange_interp(x: f64, samples: &[Sample]) -> Result<f64, IersError> {
    if samples.len() < 2 {
        return Err(IersError::MalformedDataset(format!(
            "{} sample(s), at least 2 required",
            samples.len()
        )));
    }

    if let Some((a, _)) = samples
        .iter()
        .tuple_combinations()
        .find(|(a, b)| a.x == b.x)
    {
        return Err(IersError::MalformedDataset(format!(
            "duplicate abscissa {}",
            a.x
        )));
    }

    let mut sum = 0.0;
    for (i, si) in samples.iter().enumerate() {
        let mut prod = 1.0;
        for (j, sj) in samples.iter().enumerate() {
            if i != j {
                prod *= (x - sj.x) / (si.x - sj.x);
            }
        }
        sum += si.y * prod;
    }

    Ok(sum)
}
