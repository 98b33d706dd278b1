use crate::error::{Result, SigError};
use crate::processing::{Filter, Processor};

/// Infinite impulse response (IIR) filter
///
/// Direct-form difference equation with separate feed-forward (input) and
/// feedback (output) histories, each kept as a shift register with the
/// newest sample at index 0. The coefficient vector stores the feed-forward
/// segment first, then the feedback segment; the leading feedback
/// coefficient is fixed at 1 and never stored.
///
/// No stability check is performed: feedback coefficients that place a pole
/// outside the unit circle make the output diverge silently. Supplying
/// stable coefficients is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct IirFilter {
    /// Layout: `[b0 .. b(num_b-1), a1 .. a(num_a)]`.
    coefficients: Vec<f64>,
    input_history: Vec<f64>,
    output_history: Vec<f64>,
    num_b: usize,
    num_a: usize,
}

impl IirFilter {
    /// Create a filter with `num_b` feed-forward and `num_a` feedback taps,
    /// all zeroed.
    ///
    /// `num_a` may be 0, which degenerates to a pure feed-forward stage.
    /// Coefficients must be supplied through [`IirFilter::set_ba`] or
    /// [`Processor::set_coefficients`] before the filter produces nonzero
    /// output.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if `num_b` is 0.
    pub fn new(num_b: usize, num_a: usize) -> Result<Self> {
        if num_b == 0 {
            return Err(SigError::InvalidInput(
                "filter needs at least one feed-forward coefficient".into(),
            ));
        }
        Ok(Self {
            coefficients: vec![0.0; num_b + num_a],
            input_history: vec![0.0; num_b],
            output_history: vec![0.0; num_a],
            num_b,
            num_a,
        })
    }

    /// Set the feed-forward (`b`) and feedback (`a`) coefficients.
    ///
    /// `a` holds `[a1, a2, ..]`; the leading `a0` is assumed to be 1 and is
    /// not supplied. Slice lengths must match the counts given at
    /// construction.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` on a length mismatch.
    pub fn set_ba(&mut self, b: &[f64], a: &[f64]) -> Result<()> {
        if b.len() != self.num_b || a.len() != self.num_a {
            return Err(SigError::InvalidInput(format!(
                "expected {} feed-forward and {} feedback coefficients, got {} and {}",
                self.num_b,
                self.num_a,
                b.len(),
                a.len()
            )));
        }
        self.coefficients[..self.num_b].copy_from_slice(b);
        self.coefficients[self.num_b..].copy_from_slice(a);
        Ok(())
    }

    /// Number of feed-forward taps.
    pub fn num_feedforward(&self) -> usize {
        self.num_b
    }

    /// Number of feedback taps.
    pub fn num_feedback(&self) -> usize {
        self.num_a
    }
}

impl Processor for IirFilter {
    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Replace the combined coefficient vector: feed-forward taps first,
    /// feedback taps after them.
    fn set_coefficients(&mut self, coefficients: &[f64]) -> Result<()> {
        if coefficients.len() != self.coefficients.len() {
            return Err(SigError::InvalidInput(format!(
                "expected {} coefficients, got {}",
                self.coefficients.len(),
                coefficients.len()
            )));
        }
        self.coefficients.copy_from_slice(coefficients);
        Ok(())
    }

    fn process(&mut self, buffer: &mut [f64]) -> Result<()> {
        self.process_buffer(buffer)
    }
}

impl Filter for IirFilter {
    /// Clear both histories and the coefficient vector.
    ///
    /// This deliberately diverges from the FIR reset, which keeps its
    /// coefficients: an IIR filter must be given coefficients again with
    /// [`IirFilter::set_ba`] before reuse, and processing right after a
    /// reset yields all-zero output.
    fn reset(&mut self) {
        self.input_history.fill(0.0);
        self.output_history.fill(0.0);
        self.coefficients.fill(0.0);
    }

    fn process_sample(&mut self, input: f64) -> f64 {
        self.input_history.rotate_right(1);
        self.input_history[0] = input;

        let (b, a) = self.coefficients.split_at(self.num_b);
        let feedforward: f64 = b
            .iter()
            .zip(&self.input_history)
            .map(|(coeff, x)| coeff * x)
            .sum();
        let feedback: f64 = a
            .iter()
            .zip(&self.output_history)
            .map(|(coeff, y)| coeff * y)
            .sum();
        let output = feedforward - feedback;

        if self.num_a > 0 {
            self.output_history.rotate_right(1);
            self.output_history[0] = output;
        }
        output
    }
}
