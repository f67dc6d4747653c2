//! Least-squares line fit for scatter-chart regression overlays.
//!
//! The problem is tiny (two columns: intercept and slope) but real channel
//! data is badly scaled — view counts in the billions against upload counts
//! in the hundreds — so we solve via SVD rather than normal equations.
//! (Nalgebra's `QR::solve` is intended for square systems and will panic
//! for non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// Fit `y = intercept + slope * x` to the given points.
///
/// Returns `None` when fewer than two points are supplied or the system is
/// too ill-conditioned to solve robustly (e.g. all x values identical).
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len();
    let mut design = Vec::with_capacity(n * 2);
    let mut y = Vec::with_capacity(n);
    for &(px, py) in points {
        design.push(1.0);
        design.push(px);
        y.push(py);
    }

    let x = DMatrix::from_row_slice(n, 2, &design);
    let y = DVector::from_row_slice(&y);

    let svd = x.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(&y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some((beta[0], beta[1]));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_a_simple_line() {
        // y = 2 + 3x
        let points = [(0.0, 2.0), (1.0, 5.0), (2.0, 8.0)];
        let (intercept, slope) = linear_fit(&points).unwrap();
        assert!((intercept - 2.0).abs() < 1e-10);
        assert!((slope - 3.0).abs() < 1e-10);
    }

    #[test]
    fn too_few_points_is_none() {
        assert!(linear_fit(&[(1.0, 1.0)]).is_none());
        assert!(linear_fit(&[]).is_none());
    }
}
