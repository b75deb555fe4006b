//! Arrhenius fitting: linearization, the fitted session, and MSD slope fits.

pub mod arrhenius;
pub mod linearize;
pub mod msd;

pub use arrhenius::ArrheniusFit;
pub use linearize::linearize;
pub use msd::{MsdFit, MsdWindow, diffusion_from_msd};
