//! Probability grids and INB curve evaluation.

use inb_math::{FormulaError, Strategy};
use thiserror::Error;
use tracing::debug;

/// Default number of sweep points when a scenario does not choose one.
pub const DEFAULT_GRID_POINTS: usize = 100;

/// Errors from grid construction and sweep evaluation.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("grid bounds [{min}, {max}] must be ordered within [0, 1]")]
    InvalidBounds { min: f64, max: f64 },

    #[error("grid needs at least two points, got {points}")]
    TooFewPoints { points: usize },

    #[error("formula error: {0}")]
    Formula(#[from] FormulaError),
}

/// Evenly spaced illness probabilities over a sub-range of [0, 1].
///
/// Only constructible through [`linspace`](Self::linspace), so the points
/// are always ordered and inside the unit interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityGrid {
    points: Vec<f64>,
}

impl ProbabilityGrid {
    /// Build `points` evenly spaced values from `min` to `max` inclusive.
    pub fn linspace(min: f64, max: f64, points: usize) -> Result<Self, SweepError> {
        if !(min >= 0.0 && max <= 1.0 && min <= max) {
            return Err(SweepError::InvalidBounds { min, max });
        }
        if points < 2 {
            return Err(SweepError::TooFewPoints { points });
        }
        let span = max - min;
        let last = points - 1;
        let mut values: Vec<f64> = (0..points)
            .map(|i| min + span * i as f64 / last as f64)
            .collect();
        // pin the endpoint so rounding drift cannot push it past max
        values[last] = max;
        Ok(Self { points: values })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Evaluate a strategy's INB across the grid.
///
/// Fails fast on the first domain error; no partial sequences are returned.
pub fn evaluate(
    strategy: &Strategy,
    p_rx: f64,
    grid: &ProbabilityGrid,
) -> Result<Vec<f64>, SweepError> {
    let mut curve = Vec::with_capacity(grid.len());
    for &p in grid.points() {
        curve.push(strategy.inb(p, p_rx)?);
    }
    debug!(
        mode = strategy.mode.name(),
        points = curve.len(),
        "evaluated INB curve"
    );
    Ok(curve)
}
