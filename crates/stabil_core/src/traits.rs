use num_complex::Complex;

/// A linear system that can be evaluated along the imaginary axis.
pub trait FrequencyResponse {
    /// Evaluates the response at `s = jω`.
    /// omega: angular frequency in rad/s
    fn response(&self, omega: f64) -> Complex<f64>;
}

impl<F> FrequencyResponse for F
where
    F: Fn(f64) -> Complex<f64>,
{
    fn response(&self, omega: f64) -> Complex<f64> {
        self(omega)
    }
}
