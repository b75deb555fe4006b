//! Linearization of the Arrhenius relation.
//!
//! `D = D0·exp(-E/(k·T))` becomes a line under `x = 1/T`, `y = ln D`:
//!
//! ```text
//! ln D = slope·(1/T) + intercept,   slope = -E/k,   intercept = ln D0
//! ```
//!
//! Uncertainties propagate to first order through each transform:
//!
//! - `σx = σT · |d(1/T)/dT| = σT / T²`
//! - `σy = σD · |d(ln D)/dD| = σD / D`

use crate::domain::{LinearSeries, SampleSet, YUncertainty};

/// Compute the linearized view of a sample set.
///
/// Domain validation (positive temperatures and coefficients, positive
/// `σD`) already happened in [`SampleSet::new`], so both transforms are
/// total here and the output uncertainties are finite and positive.
pub fn linearize(sample: &SampleSet) -> LinearSeries {
    let x: Vec<f64> = sample.temperatures().iter().map(|t| 1.0 / t).collect();
    let y: Vec<f64> = sample.dcoeffs().iter().map(|d| d.ln()).collect();

    let x_err = sample.temp_err().map(|sigmas| {
        sigmas
            .iter()
            .zip(sample.temperatures())
            .map(|(s, t)| s / (t * t))
            .collect()
    });

    let y_err = match sample.dcoeff_err() {
        None => YUncertainty::PointEstimateOnly,
        Some(sigmas) => YUncertainty::WithUncertainty(
            sigmas
                .iter()
                .zip(sample.dcoeffs())
                .map(|(s, d)| s / d)
                .collect(),
        ),
    };

    LinearSeries { x, y, x_err, y_err }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleSet;

    #[test]
    fn transforms_to_inverse_temperature_and_log_space() {
        let sample =
            SampleSet::new(vec![500.0, 1000.0], vec![1e-8, 1e-6], None, None).unwrap();
        let series = linearize(&sample);

        assert!((series.x[0] - 2e-3).abs() < 1e-18);
        assert!((series.x[1] - 1e-3).abs() < 1e-18);
        assert!((series.y[0] - (1e-8f64).ln()).abs() < 1e-12);
        assert!((series.y[1] - (1e-6f64).ln()).abs() < 1e-12);
        assert_eq!(series.y_err, YUncertainty::PointEstimateOnly);
        assert!(series.x_err.is_none());
    }

    #[test]
    fn propagates_first_order_uncertainties() {
        let sample = SampleSet::new(
            vec![100.0, 200.0],
            vec![2.0, 4.0],
            Some(vec![0.2, 1.0]),
            Some(vec![1.0, 4.0]),
        )
        .unwrap();
        let series = linearize(&sample);

        // σy = σD / D
        let y_err = series.y_err.as_slice().unwrap();
        assert!((y_err[0] - 0.1).abs() < 1e-15);
        assert!((y_err[1] - 0.25).abs() < 1e-15);

        // σx = σT / T²
        let x_err = series.x_err.unwrap();
        assert!((x_err[0] - 1e-4).abs() < 1e-18);
        assert!((x_err[1] - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn absent_uncertainties_stay_structurally_absent() {
        let sample = SampleSet::new(
            vec![300.0, 400.0, 500.0],
            vec![1e-9, 1e-8, 1e-7],
            None,
            Some(vec![1.0, 1.0, 1.0]),
        )
        .unwrap();
        let series = linearize(&sample);

        // σT alone gives x error bars, but never a y-weighting channel.
        assert!(series.x_err.is_some());
        assert!(!series.y_err.is_present());
    }
}
