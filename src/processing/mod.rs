pub mod fir;
pub mod iir;
pub mod processor;
pub mod window;

pub use fir::FirFilter;
pub use iir::IirFilter;
pub use processor::{Filter, Processor};
pub use window::{Window, WindowShape};
