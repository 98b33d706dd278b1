//! Small digital signal processing toolkit.
//!
//! Fixed-length [`Signal`] containers, coefficient-driven processors behind
//! the [`Processor`] and [`Filter`] traits, streaming [`FirFilter`] and
//! [`IirFilter`] engines, and [`Window`] functions for spectral shaping.

pub mod constants;
pub mod error;
pub mod processing;
pub mod signal;
pub mod wav;

pub use error::{Result, SigError};
pub use processing::{Filter, FirFilter, IirFilter, Processor, Window, WindowShape};
pub use signal::Signal;
pub use wav::save_wav;
