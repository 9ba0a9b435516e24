use crate::hurwitz::{hurwitz_analysis, HurwitzAnalysis};
use crate::plant::FeedbackSystem;
use crate::polynomial::Polynomial;
use crate::roots::{root_analysis, RootAnalysis};
use crate::routh::{routh_analysis, RouthAnalysis, RouthSettings};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityVerdict {
    Stable,
    Unstable,
}

impl StabilityVerdict {
    pub fn from_stable(stable: bool) -> Self {
        if stable {
            StabilityVerdict::Stable
        } else {
            StabilityVerdict::Unstable
        }
    }

    pub fn is_stable(self) -> bool {
        self == StabilityVerdict::Stable
    }
}

impl fmt::Display for StabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilityVerdict::Stable => f.write_str("stable"),
            StabilityVerdict::Unstable => f.write_str("unstable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub routh: RouthSettings,
    /// Largest root real part still counted as stable.
    pub root_tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            routh: RouthSettings::default(),
            root_tolerance: 1e-9,
        }
    }
}

/// Outcome of all three criteria. The verdicts are computed independently and
/// are not reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub polynomial: Polynomial,
    pub routh: RouthAnalysis,
    pub hurwitz: HurwitzAnalysis,
    pub roots: RootAnalysis,
}

impl StabilityReport {
    pub fn verdicts(&self) -> [StabilityVerdict; 3] {
        [self.routh.verdict, self.hurwitz.verdict, self.roots.verdict]
    }

    pub fn verdicts_agree(&self) -> bool {
        let [routh, hurwitz, roots] = self.verdicts();
        routh == hurwitz && hurwitz == roots
    }
}

/// Runs the Routh, Hurwitz and root criteria, in that order, on `poly`.
pub fn analyze_polynomial(poly: &Polynomial, settings: &AnalysisSettings) -> StabilityReport {
    let routh = routh_analysis(poly, &settings.routh);
    let hurwitz = hurwitz_analysis(poly);
    let roots = root_analysis(poly, settings.root_tolerance);
    let report = StabilityReport {
        polynomial: poly.clone(),
        routh,
        hurwitz,
        roots,
    };
    if !report.verdicts_agree() {
        tracing::warn!(verdicts = ?report.verdicts(), "stability criteria disagree");
    }
    report
}

/// Analyses the characteristic polynomial of `system`.
pub fn analyze(system: &FeedbackSystem, settings: &AnalysisSettings) -> StabilityReport {
    analyze_polynomial(system.characteristic(), settings)
}

#[cfg(test)]
mod tests {
    use super::{analyze, analyze_polynomial, AnalysisSettings, StabilityVerdict};
    use crate::hurwitz::hurwitz_analysis;
    use crate::plant::{FeedbackSystem, PlantConfig};
    use crate::polynomial::Polynomial;
    use crate::routh::{routh_analysis, RouthSettings, RowKind};
    use proptest::prelude::*;

    #[test]
    fn default_system_criteria_agree_on_instability() {
        let system = FeedbackSystem::new(&PlantConfig::default()).expect("default plant is valid");
        let report = analyze(&system, &AnalysisSettings::default());
        assert!(report.verdicts_agree());
        assert_eq!(report.routh.verdict, StabilityVerdict::Unstable);
        assert_eq!(report.polynomial.leading(), 1.0);
    }

    #[test]
    fn stable_polynomial_criteria_agree() {
        let poly = Polynomial::new(vec![1.0, 6.0, 11.0, 6.0]).expect("valid polynomial");
        let report = analyze_polynomial(&poly, &AnalysisSettings::default());
        assert!(report.verdicts_agree());
        assert_eq!(report.verdicts(), [StabilityVerdict::Stable; 3]);
    }

    #[test]
    fn verdict_display_is_lowercase() {
        assert_eq!(StabilityVerdict::Stable.to_string(), "stable");
        assert_eq!(StabilityVerdict::Unstable.to_string(), "unstable");
        assert!(StabilityVerdict::from_stable(true).is_stable());
    }

    proptest! {
        #[test]
        fn routh_and_hurwitz_agree_for_positive_coefficients(
            tail in prop::collection::vec(0.1f64..10.0, 1..=5)
        ) {
            let mut coeffs = vec![1.0];
            coeffs.extend(tail);
            let poly = Polynomial::new(coeffs).expect("valid polynomial");

            let hurwitz = hurwitz_analysis(&poly);
            prop_assume!(hurwitz.minors.iter().all(|d| d.abs() > 1e-9));

            let routh = routh_analysis(&poly, &RouthSettings::default());
            prop_assume!(!routh.table.has_approximations());
            prop_assume!(routh.table.rows.iter().all(|row| row.kind == RowKind::Normal));
            prop_assert_eq!(routh.verdict, hurwitz.verdict);
        }
    }
}
