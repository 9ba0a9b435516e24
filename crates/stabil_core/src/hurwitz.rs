use crate::analysis::StabilityVerdict;
use crate::polynomial::Polynomial;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HurwitzAnalysis {
    /// Row-major `n x n` Hurwitz matrix.
    pub matrix: Vec<f64>,
    pub size: usize,
    /// Leading principal minors `Δ1 .. Δn`.
    pub minors: Vec<f64>,
    pub verdict: StabilityVerdict,
}

/// Builds the Hurwitz matrix: entry `(i, j)` holds `a[2i - j + 1]` when that
/// index exists and zero otherwise (0-indexed rows and columns).
pub fn hurwitz_matrix(poly: &Polynomial) -> DMatrix<f64> {
    let coeffs = poly.coefficients();
    let n = poly.degree();
    DMatrix::from_fn(n, n, |i, j| {
        let idx = 2 * i as isize - j as isize + 1;
        if idx >= 0 && (idx as usize) < coeffs.len() {
            coeffs[idx as usize]
        } else {
            0.0
        }
    })
}

/// Determinants of the top-left `k x k` blocks for `k = 1..=n`.
pub fn leading_minors(matrix: &DMatrix<f64>) -> Vec<f64> {
    (1..=matrix.nrows())
        .map(|k| {
            matrix
                .view((0, 0), (k, k))
                .clone_owned()
                .lu()
                .determinant()
        })
        .collect()
}

pub fn hurwitz_analysis(poly: &Polynomial) -> HurwitzAnalysis {
    let matrix = hurwitz_matrix(poly);
    let minors = leading_minors(&matrix);
    let stable = minors.iter().all(|&delta| delta > 0.0);
    tracing::debug!(?minors, stable, "Hurwitz criterion evaluated");

    let size = matrix.nrows();
    let mut row_major = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            row_major.push(matrix[(i, j)]);
        }
    }

    HurwitzAnalysis {
        matrix: row_major,
        size,
        minors,
        verdict: StabilityVerdict::from_stable(stable),
    }
}
