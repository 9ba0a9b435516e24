//! Real-coefficient polynomials in descending-power order.
//!
//! A [`Polynomial`] stores `[a0, a1, ..., an]` for
//! `a0*s^n + a1*s^(n-1) + ... + an`. The leading coefficient is never zero,
//! so the degree is always `len - 1`.

use num_complex::Complex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a coefficient sequence cannot form a [`Polynomial`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolynomialError {
    #[error("Polynomial has no coefficients")]
    Empty,

    #[error("Leading coefficient is zero; degree would silently drop from {degree}")]
    ZeroLeadingCoefficient { degree: usize },

    #[error("Coefficient {index} is not finite ({value})")]
    NonFiniteCoefficient { index: usize, value: f64 },

    #[error("Numerator has {numerator} coefficients but the denominator only {denominator}")]
    NumeratorTooLong { numerator: usize, denominator: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Result<Self, PolynomialError> {
        let Some(&leading) = coeffs.first() else {
            return Err(PolynomialError::Empty);
        };
        if let Some((index, &value)) = coeffs.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(PolynomialError::NonFiniteCoefficient { index, value });
        }
        if leading == 0.0 {
            return Err(PolynomialError::ZeroLeadingCoefficient {
                degree: coeffs.len() - 1,
            });
        }
        Ok(Self { coeffs })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    pub fn constant_term(&self) -> f64 {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Divides every coefficient by the leading one so the result is monic.
    pub fn normalized(&self) -> Self {
        let leading = self.leading();
        Self {
            coeffs: self.coeffs.iter().map(|c| c / leading).collect(),
        }
    }

    /// Horner evaluation at an arbitrary complex point.
    pub fn evaluate(&self, s: Complex<f64>) -> Complex<f64> {
        self.coeffs
            .iter()
            .fold(Complex::new(0.0, 0.0), |acc, &c| acc * s + c)
    }

    /// Evaluates the polynomial at `s = jω`.
    pub fn evaluate_at_frequency(&self, omega: f64) -> Complex<f64> {
        self.evaluate(Complex::new(0.0, omega))
    }

    /// Subtracts `other` after zero-padding it on the left so the trailing
    /// coefficients line up. Fails if `other` is longer than `self` or if the
    /// difference loses its leading term.
    pub fn sub_aligned(&self, other: &Polynomial) -> Result<Self, PolynomialError> {
        let len = self.coeffs.len();
        let other_len = other.coeffs.len();
        if other_len > len {
            return Err(PolynomialError::NumeratorTooLong {
                numerator: other_len,
                denominator: len,
            });
        }
        let pad = len - other_len;
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| if i < pad { c } else { c - other.coeffs[i - pad] })
            .collect();
        Self::new(coeffs)
    }
}

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = PolynomialError;

    fn try_from(coeffs: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(coeffs)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(poly: Polynomial) -> Self {
        poly.coeffs
    }
}

#[cfg(test)]
mod tests {
    use super::{Polynomial, PolynomialError};
    use num_complex::Complex;

    #[test]
    fn new_rejects_malformed_coefficients() {
        assert_eq!(Polynomial::new(Vec::new()), Err(PolynomialError::Empty));
        assert_eq!(
            Polynomial::new(vec![0.0, 1.0, 2.0]),
            Err(PolynomialError::ZeroLeadingCoefficient { degree: 2 })
        );
        assert!(matches!(
            Polynomial::new(vec![1.0, f64::NAN]),
            Err(PolynomialError::NonFiniteCoefficient { index: 1, .. })
        ));
    }

    #[test]
    fn zero_leading_error_message_is_descriptive() {
        let err = Polynomial::new(vec![0.0, 3.0]).expect_err("should fail");
        assert!(format!("{err}").contains("Leading coefficient is zero"));
    }

    #[test]
    fn normalized_has_unit_leading_coefficient() {
        let poly = Polynomial::new(vec![2e-6, 1e-4, -0.02, 2.0]).expect("valid polynomial");
        let normalized = poly.normalized();
        let expected = [1.0, 50.0, -10_000.0, 1e6];
        assert_eq!(normalized.degree(), 3);
        for (got, want) in normalized.coefficients().iter().zip(expected) {
            assert!((got - want).abs() <= 1e-9 * want.abs().max(1.0));
        }
    }

    #[test]
    fn evaluate_matches_direct_expansion() {
        let poly = Polynomial::new(vec![1.0, 0.0, 1.0]).expect("valid polynomial");
        assert_eq!(poly.evaluate_at_frequency(1.0), Complex::new(0.0, 0.0));
        let value = poly.evaluate(Complex::new(1.0, 2.0));
        // (1 + 2j)^2 + 1 = -2 + 4j
        assert!((value - Complex::new(-2.0, 4.0)).norm() < 1e-12);
    }

    #[test]
    fn sub_aligned_pads_on_the_left() {
        let den = Polynomial::new(vec![2e-6, 1e-4, -0.02, 2.0]).expect("valid polynomial");
        let num = Polynomial::new(vec![1.0]).expect("valid polynomial");
        let diff = den.sub_aligned(&num).expect("subtraction should succeed");
        assert_eq!(diff.coefficients(), &[2e-6, 1e-4, -0.02, 1.0]);

        assert_eq!(
            num.sub_aligned(&den),
            Err(PolynomialError::NumeratorTooLong {
                numerator: 4,
                denominator: 1
            })
        );
    }

    #[test]
    fn sub_aligned_fails_fast_when_leading_term_cancels() {
        let a = Polynomial::new(vec![1.0, 2.0]).expect("valid polynomial");
        let b = Polynomial::new(vec![1.0, 1.0]).expect("valid polynomial");
        assert!(matches!(
            a.sub_aligned(&b),
            Err(PolynomialError::ZeroLeadingCoefficient { .. })
        ));
    }
}
