//! Pointwise-maximum envelope across INB curves.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from envelope construction.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("envelope needs at least one curve")]
    NoCurves,

    #[error("curve {index} has {actual} points, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// One renderable point of an INB curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub p: f64,
    pub inb: f64,
}

/// Pointwise maximum across curves: the best achievable INB when the
/// strategy can be chosen freely at each probability level.
///
/// Computed over raw values; apply [`display_points`] afterwards for
/// rendering.
pub fn hull(curves: &[&[f64]]) -> Result<Vec<f64>, EnvelopeError> {
    let first = curves.first().ok_or(EnvelopeError::NoCurves)?;
    let expected = first.len();
    for (index, curve) in curves.iter().enumerate().skip(1) {
        if curve.len() != expected {
            return Err(EnvelopeError::LengthMismatch {
                index,
                expected,
                actual: curve.len(),
            });
        }
    }

    let mut best = first.to_vec();
    for curve in &curves[1..] {
        for (slot, &value) in best.iter_mut().zip(curve.iter()) {
            if value > *slot {
                *slot = value;
            }
        }
    }
    Ok(best)
}

/// Pair grid points with INB values, dropping negative points.
///
/// A strategy with negative INB is dominated by not testing at all, so
/// renderers conventionally omit those stretches of the curve. Inputs must
/// have equal length.
pub fn display_points(grid: &[f64], values: &[f64]) -> Vec<CurvePoint> {
    grid.iter()
        .zip(values)
        .filter(|(_, &inb)| inb >= 0.0)
        .map(|(&p, &inb)| CurvePoint { p, inb })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hull ───────────────────────────────────────────────────────

    #[test]
    fn hull_is_pointwise_maximum() {
        let s1 = [0.1, -0.2, 0.3];
        let s2 = [-0.1, 0.4, 0.2];
        let hull = hull(&[&s1, &s2]).unwrap();
        assert_eq!(hull, vec![0.1, 0.4, 0.3]);
    }

    #[test]
    fn hull_of_one_curve_is_the_curve() {
        let s = [0.5, -0.1, 0.0];
        assert_eq!(hull(&[&s]).unwrap(), s.to_vec());
    }

    #[test]
    fn hull_of_three_curves() {
        let s1 = [0.0, 0.0, 0.9];
        let s2 = [0.5, -1.0, 0.0];
        let s3 = [-0.5, 0.2, 0.1];
        assert_eq!(hull(&[&s1, &s2, &s3]).unwrap(), vec![0.5, 0.2, 0.9]);
    }

    #[test]
    fn hull_keeps_raw_negatives() {
        let s1 = [-0.3, -0.2];
        let s2 = [-0.4, -0.1];
        // the envelope itself is computed before any display filtering
        assert_eq!(hull(&[&s1, &s2]).unwrap(), vec![-0.3, -0.1]);
    }

    #[test]
    fn hull_rejects_zero_curves() {
        let err = hull(&[]).unwrap_err();
        assert!(matches!(err, EnvelopeError::NoCurves));
    }

    #[test]
    fn hull_rejects_ragged_curves() {
        let s1 = [0.1, 0.2, 0.3];
        let s2 = [0.1];
        let err = hull(&[&s1, &s2]).unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::LengthMismatch {
                index: 1,
                expected: 3,
                actual: 1,
            }
        ));
    }

    // ── display filter ─────────────────────────────────────────────

    #[test]
    fn display_drops_negative_points() {
        let grid = [0.0, 0.25, 0.5, 0.75];
        let values = [-0.3, 0.1, -0.05, 0.2];
        let points = display_points(&grid, &values);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], CurvePoint { p: 0.25, inb: 0.1 });
        assert_eq!(points[1], CurvePoint { p: 0.75, inb: 0.2 });
    }

    #[test]
    fn display_keeps_zero() {
        let points = display_points(&[0.5], &[0.0]);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn display_of_all_negative_curve_is_empty() {
        assert!(display_points(&[0.1, 0.9], &[-1.0, -0.5]).is_empty());
    }
}
