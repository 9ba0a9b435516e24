pub mod analysis;
pub mod frequency;
pub mod hurwitz;
pub mod plant;
pub mod polynomial;
pub mod report;
pub mod roots;
pub mod routh;
/// The `stabil_core` crate provides the numerical engine for the Stabil CLI.
/// It analyses the stability of a linear feedback loop from the coefficients of
/// its characteristic polynomial.
///
/// Key components:
/// - **Traits**: `FrequencyResponse` (anything that can be evaluated along the imaginary axis).
/// - **Plant**: `PlantConfig` constants and the `FeedbackSystem` built from them.
/// - **Criteria**: Routh table, Hurwitz minors and direct root computation, each yielding an
///   independent `StabilityVerdict`.
/// - **Frequency**: sampled Mikhailov and Nyquist curves for graphical inspection.
pub mod traits;

pub use analysis::{analyze, AnalysisSettings, StabilityReport, StabilityVerdict};
pub use plant::{FeedbackSystem, PlantConfig};
pub use polynomial::{Polynomial, PolynomialError};
