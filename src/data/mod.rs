//! Synthetic data generation for the demo pipeline.

pub mod sample;

pub use sample::{DemoSpec, generate_arrhenius_sample};
