use crate::error::{Result, SigError};

/// Common trait for coefficient-driven signal processors
///
/// Implemented by FirFilter, IirFilter, and Window. A processor owns a
/// coefficient vector whose length is fixed at construction; the vector is
/// replaced wholesale through [`Processor::set_coefficients`] and never
/// mutated element-by-element from outside.
pub trait Processor {
    /// Read access to the coefficient vector.
    ///
    /// The returned borrow is immutable; callers that need an owned copy
    /// call `.to_vec()`.
    fn coefficients(&self) -> &[f64];

    /// Replace the coefficient vector wholesale.
    ///
    /// The slice length must match the processor's coefficient count. No
    /// validation is performed on the values themselves (finiteness,
    /// normalization); that is the caller's responsibility.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` on a length mismatch.
    fn set_coefficients(&mut self, coefficients: &[f64]) -> Result<()>;

    /// Number of coefficients the processor was constructed with.
    fn num_coefficients(&self) -> usize {
        self.coefficients().len()
    }

    /// Process a buffer of samples in-place.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if the buffer is empty, or if its
    /// length does not match what the concrete processor requires (a Window
    /// requires exactly its own length; filters accept any nonzero length).
    fn process(&mut self, buffer: &mut [f64]) -> Result<()>;
}

/// Trait for processors that carry history state across samples
///
/// Extends [`Processor`] with a per-sample step and a reset back to the
/// initial (silent) condition. Implemented by FirFilter and IirFilter; a
/// Window has no temporal state and is a plain Processor.
pub trait Filter: Processor {
    /// Restore the history state to the filter's initial condition.
    ///
    /// What "initial" means is filter-specific; see the concrete types.
    fn reset(&mut self);

    /// Process a single sample through the filter.
    ///
    /// Consumes one input value, updates the internal history, and produces
    /// one output value. State persists across calls, so feeding the same
    /// samples one at a time or as a buffer produces identical output.
    fn process_sample(&mut self, input: f64) -> f64;

    /// Process any ordered container of samples in-place.
    ///
    /// Applies [`Filter::process_sample`] to each element in sequence order.
    /// Produces the same output as [`Filter::process_buffer`] given the same
    /// input order.
    fn process_iter<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = &'a mut f64>,
        Self: Sized,
    {
        for sample in samples {
            *sample = self.process_sample(*sample);
        }
    }

    /// Process a sample buffer in-place.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if the buffer is empty.
    fn process_buffer(&mut self, buffer: &mut [f64]) -> Result<()> {
        if buffer.is_empty() {
            return Err(SigError::InvalidInput("empty sample buffer".into()));
        }
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::FirFilter;

    #[test]
    fn test_iter_and_buffer_processing_agree() {
        let mut by_iter = FirFilter::new(4).unwrap();
        by_iter
            .set_coefficients(&[0.25, 0.5, -0.125, 0.0625])
            .unwrap();
        let mut by_buffer = by_iter.clone();

        let mut samples_iter: Vec<f64> = vec![1.0, -2.0, 3.5, 0.0, 0.5, -1.25, 2.0];
        let mut samples_buffer = samples_iter.clone();

        by_iter.process_iter(samples_iter.iter_mut());
        by_buffer.process_buffer(&mut samples_buffer).unwrap();

        assert_eq!(samples_iter, samples_buffer);
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let mut filter = FirFilter::new(3).unwrap();
        let mut empty: [f64; 0] = [];
        let result = filter.process_buffer(&mut empty);
        assert!(matches!(result, Err(SigError::InvalidInput(_))));
    }

    #[test]
    fn test_process_routes_through_per_sample_step() {
        let mut streamed = FirFilter::new(3).unwrap();
        streamed.set_coefficients(&[0.5, 0.3, 0.2]).unwrap();
        let mut batched = streamed.clone();

        let input = [1.0, 2.0, -1.0, 0.25, 4.0];
        let streamed_out: Vec<f64> = input.iter().map(|&x| streamed.process_sample(x)).collect();

        let mut batched_out = input;
        batched.process(&mut batched_out).unwrap();

        assert_eq!(streamed_out, batched_out.to_vec());
    }
}
