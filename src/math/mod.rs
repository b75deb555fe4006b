//! Mathematical utilities: weighted least squares.

pub mod wls;

pub use wls::*;
