//! The unity-feedback loop under analysis.

use crate::polynomial::{Polynomial, PolynomialError};
use crate::traits::FrequencyResponse;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Physical constants of the loop, in descending-power order.
///
/// The open-loop denominator is not stored: it is derived as
/// `closed_loop_denominator - pad(open_loop_numerator)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantConfig {
    pub open_loop_numerator: Vec<f64>,
    pub closed_loop_denominator: Vec<f64>,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            open_loop_numerator: vec![1.0],
            closed_loop_denominator: vec![2e-6, 1e-4, -0.02, 2.0],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackSystem {
    numerator: Polynomial,
    open_denominator: Polynomial,
    closed_denominator: Polynomial,
    characteristic: Polynomial,
}

impl FeedbackSystem {
    pub fn new(config: &PlantConfig) -> Result<Self, PolynomialError> {
        let numerator = Polynomial::new(config.open_loop_numerator.clone())?;
        let closed_denominator = Polynomial::new(config.closed_loop_denominator.clone())?;
        let open_denominator = closed_denominator.sub_aligned(&numerator)?;
        let characteristic = closed_denominator.normalized();
        Ok(Self {
            numerator,
            open_denominator,
            closed_denominator,
            characteristic,
        })
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn open_denominator(&self) -> &Polynomial {
        &self.open_denominator
    }

    pub fn closed_denominator(&self) -> &Polynomial {
        &self.closed_denominator
    }

    /// Monic characteristic polynomial handed to the stability criteria.
    pub fn characteristic(&self) -> &Polynomial {
        &self.characteristic
    }

    /// `W_open(jω) = N(jω) / D_open(jω)`. Non-finite where `D_open` vanishes.
    pub fn evaluate_open(&self, omega: f64) -> Complex<f64> {
        self.numerator.evaluate_at_frequency(omega)
            / self.open_denominator.evaluate_at_frequency(omega)
    }

    /// Raw closed-loop denominator at `jω`.
    pub fn evaluate_closed(&self, omega: f64) -> Complex<f64> {
        self.closed_denominator.evaluate_at_frequency(omega)
    }

    pub fn open_loop(&self) -> OpenLoopResponse<'_> {
        OpenLoopResponse { system: self }
    }

    pub fn characteristic_response(&self) -> CharacteristicResponse<'_> {
        CharacteristicResponse { system: self }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OpenLoopResponse<'a> {
    system: &'a FeedbackSystem,
}

impl FrequencyResponse for OpenLoopResponse<'_> {
    fn response(&self, omega: f64) -> Complex<f64> {
        self.system.evaluate_open(omega)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CharacteristicResponse<'a> {
    system: &'a FeedbackSystem,
}

impl FrequencyResponse for CharacteristicResponse<'_> {
    fn response(&self, omega: f64) -> Complex<f64> {
        self.system.evaluate_closed(omega)
    }
}
