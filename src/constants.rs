//! Numeric constants for filter design
//!
//! These constants define the valid parameter ranges and epsilon values
//! used by the coefficient design routines.

/// Lower bound (exclusive) for normalized cutoff frequencies.
pub const MIN_NORMALIZED_FREQ: f64 = 0.0;

/// Upper bound (exclusive) for normalized cutoff frequencies.
/// The Nyquist frequency (half the sample rate) maps to 0.5.
pub const MAX_NORMALIZED_FREQ: f64 = 0.5;

/// Epsilon for detecting the center tap in the windowed-sinc design.
/// The sinc expression is singular at the center; taps within this distance
/// of it take the analytic limit instead.
pub const CENTER_TAP_EPSILON: f64 = 1e-9;
