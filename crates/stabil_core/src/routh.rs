//! Routh array construction and the Routh stability criterion.
//!
//! Rows are built top to bottom from the two seed rows holding the even- and
//! odd-indexed coefficients. Two numerical workarounds are applied:
//!
//! - A pivot with magnitude below [`RouthSettings::pivot_epsilon`] is replaced by
//!   the epsilon in the denominator only. This is a known approximation: for a
//!   marginal system it can yield the wrong verdict, and the affected row is
//!   flagged with [`RouthRow::pivot_substituted`].
//! - A row that comes out entirely zero is rebuilt from the row above it with
//!   the auxiliary-derivative rule and tagged [`RowKind::AuxiliaryDerived`].

use crate::analysis::StabilityVerdict;
use crate::polynomial::Polynomial;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouthSettings {
    pub pivot_epsilon: f64,
    pub zero_row_tolerance: f64,
}

impl Default for RouthSettings {
    fn default() -> Self {
        Self {
            pivot_epsilon: 1e-12,
            zero_row_tolerance: 1e-8,
        }
    }
}

/// How a row of the table was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Seed row or the usual cross-multiplication of the two rows above.
    Normal,
    /// The cross-multiplication vanished and the row was rebuilt from the
    /// derivative of the auxiliary polynomial.
    AuxiliaryDerived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouthRow {
    /// Power of `s` labelling the row.
    pub power: usize,
    pub values: Vec<f64>,
    pub kind: RowKind,
    pub pivot_substituted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouthTable {
    pub columns: usize,
    pub rows: Vec<RouthRow>,
}

impl RouthTable {
    /// Builds the `(n+1) x ceil((n+1)/2)` Routh array for `poly`.
    pub fn build(poly: &Polynomial, settings: &RouthSettings) -> Self {
        let coeffs = poly.coefficients();
        let n = poly.degree();
        let columns = (coeffs.len() + 1) / 2;

        let mut rows = Vec::with_capacity(n + 1);
        rows.push(seed_row(coeffs, 0, columns, n));
        if n >= 1 {
            rows.push(seed_row(coeffs, 1, columns, n));
        }

        for i in 2..=n {
            let above = &rows[i - 1].values;
            let above2 = &rows[i - 2].values;
            let lead = above[0];
            let lead2 = above2[0];

            let pivot_substituted = lead.abs() < settings.pivot_epsilon;
            let pivot = if pivot_substituted {
                tracing::warn!(
                    row = i,
                    pivot = lead,
                    epsilon = settings.pivot_epsilon,
                    "Routh pivot is numerically zero; substituting epsilon"
                );
                settings.pivot_epsilon
            } else {
                lead
            };

            let mut values = vec![0.0; columns];
            for j in 0..columns.saturating_sub(1) {
                values[j] = (lead * above2[j + 1] - lead2 * above[j + 1]) / pivot;
            }

            let mut kind = RowKind::Normal;
            if values.iter().all(|v| v.abs() <= settings.zero_row_tolerance) {
                let order = n as f64 - i as f64;
                for (k, value) in values.iter_mut().enumerate() {
                    *value = above[k] * (order - 2.0 * k as f64);
                }
                kind = RowKind::AuxiliaryDerived;
                tracing::debug!(row = i, order, "Routh row vanished; using auxiliary derivative");
            }

            rows.push(RouthRow {
                power: n - i,
                values,
                kind,
                pivot_substituted,
            });
        }

        Self { columns, rows }
    }

    pub fn first_column(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.values[0]).collect()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row].values[col]
    }

    pub fn has_approximations(&self) -> bool {
        self.rows.iter().any(|row| row.pivot_substituted)
    }
}

fn seed_row(coeffs: &[f64], offset: usize, columns: usize, degree: usize) -> RouthRow {
    let mut values = vec![0.0; columns];
    for (slot, &c) in values.iter_mut().zip(coeffs.iter().skip(offset).step_by(2)) {
        *slot = c;
    }
    RouthRow {
        power: degree - offset,
        values,
        kind: RowKind::Normal,
        pivot_substituted: false,
    }
}

/// Counts strict sign changes between consecutive entries.
pub fn count_sign_changes(values: &[f64]) -> usize {
    values.windows(2).filter(|w| w[0] * w[1] < 0.0).count()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouthAnalysis {
    pub table: RouthTable,
    pub first_column: Vec<f64>,
    pub sign_changes: usize,
    pub verdict: StabilityVerdict,
}

pub fn routh_analysis(poly: &Polynomial, settings: &RouthSettings) -> RouthAnalysis {
    let table = RouthTable::build(poly, settings);
    let first_column = table.first_column();
    let sign_changes = count_sign_changes(&first_column);
    let stable = sign_changes == 0 && first_column.iter().all(|&v| v > 0.0);
    tracing::debug!(sign_changes, stable, "Routh criterion evaluated");
    RouthAnalysis {
        table,
        first_column,
        sign_changes,
        verdict: StabilityVerdict::from_stable(stable),
    }
}
