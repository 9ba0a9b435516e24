use crate::analysis::StabilityVerdict;
use crate::polynomial::Polynomial;
use nalgebra::DMatrix;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootAnalysis {
    pub roots: Vec<Complex<f64>>,
    pub tolerance: f64,
    pub verdict: StabilityVerdict,
}

impl RootAnalysis {
    pub fn max_real_part(&self) -> Option<f64> {
        self.roots.iter().map(|r| r.re).reduce(f64::max)
    }
}

/// Frobenius companion matrix of the monic version of `poly`.
pub fn companion_matrix(poly: &Polynomial) -> DMatrix<f64> {
    let monic = poly.normalized();
    let coeffs = monic.coefficients();
    let n = monic.degree();
    DMatrix::from_fn(n, n, |i, j| {
        if i == 0 {
            -coeffs[j + 1]
        } else if i == j + 1 {
            1.0
        } else {
            0.0
        }
    })
}

/// Roots as eigenvalues of the companion matrix, sorted by descending real
/// part and then descending imaginary part.
pub fn find_roots(poly: &Polynomial) -> Vec<Complex<f64>> {
    if poly.degree() == 0 {
        return Vec::new();
    }
    let mut roots: Vec<Complex<f64>> = companion_matrix(poly)
        .complex_eigenvalues()
        .iter()
        .cloned()
        .collect();
    roots.sort_by(|a, b| {
        b.re.partial_cmp(&a.re)
            .unwrap_or(Ordering::Equal)
            .then(b.im.partial_cmp(&a.im).unwrap_or(Ordering::Equal))
    });
    roots
}

/// Stable iff no root has a real part above `tolerance`.
pub fn root_analysis(poly: &Polynomial, tolerance: f64) -> RootAnalysis {
    let roots = find_roots(poly);
    let stable = roots.iter().all(|r| r.re <= tolerance);
    tracing::debug!(count = roots.len(), stable, "characteristic roots computed");
    RootAnalysis {
        roots,
        tolerance,
        verdict: StabilityVerdict::from_stable(stable),
    }
}
