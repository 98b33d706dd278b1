use crate::constants::{CENTER_TAP_EPSILON, MAX_NORMALIZED_FREQ, MIN_NORMALIZED_FREQ};
use crate::error::{Result, SigError};
use crate::processing::{Filter, Processor};
use std::f64::consts::PI;

/// Finite impulse response (FIR) filter
///
/// Convolves the input with the tap coefficients using a circular delay
/// line, so each call costs one write plus one pass over the taps. The
/// filter is always stable: its output depends only on the last `num_taps`
/// inputs. Coefficients can be designed in place as low-pass (windowed
/// sinc), high-pass (spectral inversion), or band-pass (subtraction of two
/// low-pass responses), or supplied directly through
/// [`Processor::set_coefficients`].
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilter {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    head: usize,
}

/// Check that a cutoff lies strictly inside the normalized range.
fn validate_cutoff(cutoff: f64) -> Result<()> {
    if cutoff <= MIN_NORMALIZED_FREQ || cutoff >= MAX_NORMALIZED_FREQ {
        return Err(SigError::FilterDesign(format!(
            "cutoff {} outside the normalized range ({}, {})",
            cutoff, MIN_NORMALIZED_FREQ, MAX_NORMALIZED_FREQ
        )));
    }
    Ok(())
}

impl FirFilter {
    /// Create a filter with `num_taps` zeroed coefficients and a silent
    /// delay line.
    ///
    /// The filter must be configured with one of the `setup_*` methods or
    /// [`Processor::set_coefficients`] before it produces nonzero output.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if `num_taps` is 0.
    pub fn new(num_taps: usize) -> Result<Self> {
        if num_taps == 0 {
            return Err(SigError::InvalidInput(
                "filter needs at least one tap".into(),
            ));
        }
        Ok(Self {
            taps: vec![0.0; num_taps],
            delay_line: vec![0.0; num_taps],
            head: 0,
        })
    }

    /// Design low-pass coefficients with the windowed-sinc method.
    ///
    /// Samples the ideal sinc impulse response around the filter center and
    /// normalizes the taps to unity gain at DC (the taps sum to 1).
    ///
    /// # Arguments
    /// * `cutoff` - Normalized cutoff frequency in (0.0, 0.5).
    ///   Example: 0.1 means 0.1 * (sample_rate / 2) when 0.5 is Nyquist.
    ///
    /// # Errors
    /// Returns `SigError::FilterDesign` if `cutoff` is outside (0.0, 0.5).
    pub fn setup_low_pass(&mut self, cutoff: f64) -> Result<()> {
        validate_cutoff(cutoff)?;

        let center = (self.taps.len() as f64 - 1.0) / 2.0;
        let mut sum = 0.0;

        for (i, tap) in self.taps.iter_mut().enumerate() {
            let offset = i as f64 - center;
            let h = if offset.abs() < CENTER_TAP_EPSILON {
                2.0 * cutoff
            } else {
                (2.0 * PI * cutoff * offset).sin() / (PI * offset)
            };
            *tap = h;
            sum += h;
        }

        for tap in self.taps.iter_mut() {
            *tap /= sum;
        }

        log::debug!(
            "designed low-pass: {} taps, cutoff {}",
            self.taps.len(),
            cutoff
        );
        Ok(())
    }

    /// Design high-pass coefficients by spectral inversion.
    ///
    /// Designs a low-pass filter at the same cutoff, negates every tap, and
    /// adds 1 to the center tap, which flips the frequency response around
    /// the quarter sample rate.
    ///
    /// # Errors
    /// Returns `SigError::FilterDesign` if `cutoff` is outside (0.0, 0.5).
    pub fn setup_high_pass(&mut self, cutoff: f64) -> Result<()> {
        self.setup_low_pass(cutoff)?;

        for tap in self.taps.iter_mut() {
            *tap = -*tap;
        }
        let center = (self.taps.len() - 1) / 2;
        self.taps[center] += 1.0;
        Ok(())
    }

    /// Design band-pass coefficients by subtracting two low-pass responses.
    ///
    /// Designs a low-pass filter at `high`, another at `low`, and keeps the
    /// elementwise difference, which passes the band between the two
    /// cutoffs. Both intermediate coefficient states are private to this
    /// call; `&mut self` keeps them unobservable.
    ///
    /// # Errors
    /// Returns `SigError::FilterDesign` if either cutoff is outside
    /// (0.0, 0.5) or `low >= high`. The coefficients are untouched on error.
    pub fn setup_band_pass(&mut self, low: f64, high: f64) -> Result<()> {
        validate_cutoff(low)?;
        validate_cutoff(high)?;
        if low >= high {
            return Err(SigError::FilterDesign(format!(
                "low cutoff {} must be below high cutoff {}",
                low, high
            )));
        }

        self.setup_low_pass(high)?;
        let high_taps = self.taps.clone();
        self.setup_low_pass(low)?;

        for (tap, high_tap) in self.taps.iter_mut().zip(&high_taps) {
            *tap = high_tap - *tap;
        }
        Ok(())
    }

    /// Get the number of taps (filter length).
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get the group delay in samples (half the filter length; exact for
    /// the symmetric designs produced by the `setup_*` methods).
    pub fn group_delay_samples(&self) -> usize {
        (self.taps.len() - 1) / 2
    }
}

impl Processor for FirFilter {
    fn coefficients(&self) -> &[f64] {
        &self.taps
    }

    fn set_coefficients(&mut self, coefficients: &[f64]) -> Result<()> {
        if coefficients.len() != self.taps.len() {
            return Err(SigError::InvalidInput(format!(
                "expected {} coefficients, got {}",
                self.taps.len(),
                coefficients.len()
            )));
        }
        self.taps.copy_from_slice(coefficients);
        Ok(())
    }

    fn process(&mut self, buffer: &mut [f64]) -> Result<()> {
        self.process_buffer(buffer)
    }
}

impl Filter for FirFilter {
    /// Clear the delay line and rewind the head.
    ///
    /// Coefficients are not affected; only the sample history resets.
    fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.head = 0;
    }

    fn process_sample(&mut self, input: f64) -> f64 {
        self.delay_line[self.head] = input;

        let n = self.taps.len();
        let mut output = 0.0;

        // Walk the ring in two contiguous reverse ranges to keep modulo
        // arithmetic out of the inner convolution loop. tap 0 weighs the
        // newest sample, tap n-1 the oldest.
        let mut tap_i = 0usize;
        for delay_idx in (0..=self.head).rev() {
            output += self.taps[tap_i] * self.delay_line[delay_idx];
            tap_i += 1;
        }
        for delay_idx in ((self.head + 1)..n).rev() {
            output += self.taps[tap_i] * self.delay_line[delay_idx];
            tap_i += 1;
        }
        debug_assert_eq!(tap_i, n);

        self.head += 1;
        if self.head == n {
            self.head = 0;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_low_pass_has_unity_dc_gain() {
        for &cutoff in &[0.05, 0.1, 0.25, 0.4, 0.49] {
            let mut filter = FirFilter::new(31).unwrap();
            filter.setup_low_pass(cutoff).unwrap();
            let sum: f64 = filter.coefficients().iter().sum();
            assert_relative_eq!(sum, 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_low_pass_even_length_has_unity_dc_gain() {
        // Even lengths put the center between taps, so no tap takes the
        // singular value; normalization must still hold.
        let mut filter = FirFilter::new(4).unwrap();
        filter.setup_low_pass(0.2).unwrap();
        let sum: f64 = filter.coefficients().iter().sum();
        assert_relative_eq!(sum, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_low_pass_rejects_out_of_range_cutoffs() {
        let mut filter = FirFilter::new(15).unwrap();
        for &bad in &[0.0, -0.1, 0.5, 0.7] {
            let result = filter.setup_low_pass(bad);
            assert!(
                matches!(result, Err(SigError::FilterDesign(_))),
                "cutoff {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_high_pass_is_spectral_inversion_of_low_pass() {
        let cutoff = 0.15;
        let mut low = FirFilter::new(21).unwrap();
        low.setup_low_pass(cutoff).unwrap();
        let mut high = FirFilter::new(21).unwrap();
        high.setup_high_pass(cutoff).unwrap();

        let center = (21 - 1) / 2;
        for (i, (hp, lp)) in high
            .coefficients()
            .iter()
            .zip(low.coefficients())
            .enumerate()
        {
            if i == center {
                assert_abs_diff_eq!(*hp, 1.0 - lp, epsilon = 1e-15);
            } else {
                assert_abs_diff_eq!(*hp, -lp, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_band_pass_is_difference_of_low_passes() {
        let mut low = FirFilter::new(33).unwrap();
        low.setup_low_pass(0.1).unwrap();
        let mut high = FirFilter::new(33).unwrap();
        high.setup_low_pass(0.3).unwrap();
        let mut band = FirFilter::new(33).unwrap();
        band.setup_band_pass(0.1, 0.3).unwrap();

        for ((bp, hi), lo) in band
            .coefficients()
            .iter()
            .zip(high.coefficients())
            .zip(low.coefficients())
        {
            assert_abs_diff_eq!(*bp, hi - lo, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_band_pass_rejects_inverted_cutoffs() {
        let mut filter = FirFilter::new(15).unwrap();
        let result = filter.setup_band_pass(0.3, 0.1);
        assert!(matches!(result, Err(SigError::FilterDesign(_))));
        let result = filter.setup_band_pass(0.2, 0.2);
        assert!(matches!(result, Err(SigError::FilterDesign(_))));
    }

    #[test]
    fn test_band_pass_leaves_coefficients_untouched_on_error() {
        let mut filter = FirFilter::new(15).unwrap();
        filter.setup_low_pass(0.2).unwrap();
        let before = filter.coefficients().to_vec();

        // Second cutoff is out of range; nothing may change.
        assert!(filter.setup_band_pass(0.1, 0.6).is_err());
        assert_eq!(filter.coefficients(), before.as_slice());
    }

    #[test]
    fn test_impulse_response_reproduces_taps() {
        let taps = [0.4, -0.3, 0.2, -0.1, 0.05];
        let mut filter = FirFilter::new(taps.len()).unwrap();
        filter.set_coefficients(&taps).unwrap();

        let mut impulse = [0.0; 12];
        impulse[0] = 1.0;
        filter.process(&mut impulse).unwrap();

        for (i, &tap) in taps.iter().enumerate() {
            assert_abs_diff_eq!(impulse[i], tap, epsilon = 1e-15);
        }
        for &rest in &impulse[taps.len()..] {
            assert_abs_diff_eq!(rest, 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_low_pass_impulse_scenario() {
        // FIR(5) low-pass at 0.1 fed a 15-sample impulse: the first 5
        // outputs are the designed taps in order, the rest are zero.
        let mut filter = FirFilter::new(5).unwrap();
        filter.setup_low_pass(0.1).unwrap();
        let taps = filter.coefficients().to_vec();

        let mut impulse = [0.0; 15];
        impulse[0] = 1.0;
        filter.process(&mut impulse).unwrap();

        for i in 0..5 {
            assert_abs_diff_eq!(impulse[i], taps[i], epsilon = 1e-15);
        }
        for &rest in &impulse[5..] {
            assert_abs_diff_eq!(rest, 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_reset_clears_history_and_keeps_taps() {
        let mut filter = FirFilter::new(7).unwrap();
        filter.setup_low_pass(0.2).unwrap();
        let taps = filter.coefficients().to_vec();

        let mut noise = [0.7, -1.3, 2.1, 0.4, -0.9];
        filter.process(&mut noise).unwrap();
        filter.reset();

        assert_eq!(filter.coefficients(), taps.as_slice());

        // After reset the filter behaves exactly like a fresh one.
        let mut fresh = FirFilter::new(7).unwrap();
        fresh.setup_low_pass(0.2).unwrap();
        let mut impulse_a = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut impulse_b = impulse_a;
        filter.process(&mut impulse_a).unwrap();
        fresh.process(&mut impulse_b).unwrap();
        assert_eq!(impulse_a, impulse_b);
    }

    #[test]
    fn test_state_persists_across_buffers() {
        let mut split = FirFilter::new(6).unwrap();
        split.setup_low_pass(0.15).unwrap();
        let mut whole = split.clone();

        let input: Vec<f64> = (0..20).map(|i| (i as f64 * 0.7).sin()).collect();
        let mut all = input.clone();
        whole.process(&mut all).unwrap();

        let (mut first, mut second) = (input[..9].to_vec(), input[9..].to_vec());
        split.process(&mut first).unwrap();
        split.process(&mut second).unwrap();

        first.extend(second);
        assert_eq!(all, first);
    }

    #[test]
    fn test_zero_taps_rejected() {
        assert!(matches!(
            FirFilter::new(0),
            Err(SigError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_set_coefficients_length_mismatch_rejected() {
        let mut filter = FirFilter::new(5).unwrap();
        assert!(filter.set_coefficients(&[1.0, 2.0]).is_err());
        assert!(filter.set_coefficients(&[0.0; 6]).is_err());
        assert!(filter.set_coefficients(&[0.0; 5]).is_ok());
    }
}
