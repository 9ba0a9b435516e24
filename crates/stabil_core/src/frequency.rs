//! Frequency sweeps and the sampled curves used for graphical inspection.
//!
//! The Mikhailov curve is the characteristic polynomial traced along `s = jω`;
//! the Nyquist curve is the open-loop transfer function over a logarithmic
//! sweep. Samples with a non-finite component are dropped, the rest keep their
//! frequency order.

use crate::plant::FeedbackSystem;
use crate::traits::FrequencyResponse;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "spacing", rename_all = "snake_case")]
pub enum FrequencySweep {
    Linear { min: f64, max: f64, points: usize },
    Logarithmic { min: f64, max: f64, points: usize },
}

impl FrequencySweep {
    pub fn frequencies(&self) -> Result<Vec<f64>> {
        match *self {
            FrequencySweep::Linear { min, max, points } => {
                validate_bounds(min, max, points)?;
                Ok(linspace(min, max, points))
            }
            FrequencySweep::Logarithmic { min, max, points } => {
                validate_bounds(min, max, points)?;
                if min <= 0.0 {
                    bail!("Logarithmic sweep requires a positive lower bound (got {}).", min);
                }
                Ok(linspace(min.log10(), max.log10(), points)
                    .into_iter()
                    .map(|exp| 10f64.powf(exp))
                    .collect())
            }
        }
    }
}

fn validate_bounds(min: f64, max: f64, points: usize) -> Result<()> {
    if points == 0 {
        bail!("Frequency sweep needs at least one point.");
    }
    if !min.is_finite() || !max.is_finite() {
        bail!("Frequency sweep bounds must be finite.");
    }
    if min > max {
        bail!("Frequency sweep bounds are inverted ({} > {}).", min, max);
    }
    Ok(())
}

/// Evenly spaced values with both endpoints included.
fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    if points == 1 {
        return vec![start];
    }
    let step = (stop - start) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            if i == points - 1 {
                stop
            } else {
                start + step * i as f64
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub omega: f64,
    pub re: f64,
    pub im: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyCurve {
    pub points: Vec<CurvePoint>,
    /// Number of samples dropped because a component was NaN or infinite.
    pub discarded: usize,
}

impl FrequencyCurve {
    pub fn xy(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|p| (p.re, p.im))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSettings {
    pub mikhailov: FrequencySweep,
    pub nyquist: FrequencySweep,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            mikhailov: FrequencySweep::Linear {
                min: 0.0,
                max: 500.0,
                points: 2000,
            },
            nyquist: FrequencySweep::Logarithmic {
                min: 1e-2,
                max: 1e3,
                points: 1500,
            },
        }
    }
}

pub fn sample_curve(response: &impl FrequencyResponse, sweep: &FrequencySweep) -> Result<FrequencyCurve> {
    let omegas = sweep.frequencies()?;
    let mut points = Vec::with_capacity(omegas.len());
    let mut discarded = 0usize;
    for omega in omegas {
        let value = response.response(omega);
        if value.re.is_finite() && value.im.is_finite() {
            points.push(CurvePoint {
                omega,
                re: value.re,
                im: value.im,
            });
        } else {
            discarded += 1;
        }
    }
    if discarded > 0 {
        tracing::debug!(discarded, kept = points.len(), "dropped non-finite samples");
    }
    Ok(FrequencyCurve { points, discarded })
}

pub fn mikhailov_curve(system: &FeedbackSystem, sweep: &FrequencySweep) -> Result<FrequencyCurve> {
    sample_curve(&system.characteristic_response(), sweep)
}

pub fn nyquist_curve(system: &FeedbackSystem, sweep: &FrequencySweep) -> Result<FrequencyCurve> {
    sample_curve(&system.open_loop(), sweep)
}
