use crate::error::{Result, SigError};
use crate::processing::Processor;
use std::f64::consts::PI;

/// Window shapes for spectral shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowShape {
    Rectangular,
    Hamming,
    Hann,
    Blackman,
}

/// Element-wise window function
///
/// Multiplies a buffer by a fixed factor vector, sample by sample. Unlike
/// the filters a window carries no state across calls, so it is a plain
/// [`Processor`]; `process` requires the buffer length to equal the window
/// length exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    factors: Vec<f64>,
}

impl Window {
    /// Create a rectangular window of the given length.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if `len` is 0.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SigError::InvalidInput(
                "window needs at least one point".into(),
            ));
        }
        let mut window = Self {
            factors: vec![0.0; len],
        };
        window.setup(WindowShape::Rectangular);
        Ok(window)
    }

    /// Create a window of the given length and shape.
    pub fn with_shape(len: usize, shape: WindowShape) -> Result<Self> {
        let mut window = Self::new(len)?;
        window.setup(shape);
        Ok(window)
    }

    /// Recompute the whole factor vector for the given shape.
    ///
    /// The cosine shapes divide by `len - 1`, so for a window of one point
    /// they leave the previous factors in place; rectangular always fills.
    pub fn setup(&mut self, shape: WindowShape) {
        let len = self.factors.len();
        match shape {
            WindowShape::Rectangular => self.factors.fill(1.0),
            _ if len <= 1 => {}
            WindowShape::Hamming => self.fill_cosine(|phase| 0.54 - 0.46 * phase.cos()),
            WindowShape::Hann => self.fill_cosine(|phase| 0.5 * (1.0 - phase.cos())),
            WindowShape::Blackman => {
                self.fill_cosine(|phase| 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos())
            }
        }
    }

    fn fill_cosine<F: Fn(f64) -> f64>(&mut self, formula: F) {
        let span = (self.factors.len() - 1) as f64;
        for (i, factor) in self.factors.iter_mut().enumerate() {
            *factor = formula(2.0 * PI * i as f64 / span);
        }
    }

    /// Window length.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Processor for Window {
    fn coefficients(&self) -> &[f64] {
        &self.factors
    }

    fn set_coefficients(&mut self, coefficients: &[f64]) -> Result<()> {
        if coefficients.len() != self.factors.len() {
            return Err(SigError::InvalidInput(format!(
                "expected {} factors, got {}",
                self.factors.len(),
                coefficients.len()
            )));
        }
        self.factors.copy_from_slice(coefficients);
        Ok(())
    }

    /// Multiply each sample by the factor at the same index.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` unless `buffer.len()` equals the
    /// window length exactly.
    fn process(&mut self, buffer: &mut [f64]) -> Result<()> {
        if buffer.len() != self.factors.len() {
            return Err(SigError::InvalidInput(format!(
                "window of length {} requires a buffer of the same length, got {}",
                self.factors.len(),
                buffer.len()
            )));
        }
        for (sample, factor) in buffer.iter_mut().zip(&self.factors) {
            *sample *= factor;
        }
        Ok(())
    }
}
