//! Shared fit pipeline used by the `fit` and `demo` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! sample set -> linearize -> weighted fit -> {activation energy, extrapolation}
//!
//! The command handlers then focus on presentation (printing vs exporting).

use crate::domain::{ActivationEnergy, Extrapolation, OutputConfig, SampleSet};
use crate::error::AppError;
use crate::fit::ArrheniusFit;

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub fit: ArrheniusFit,
    pub activation_energy: ActivationEnergy,
    pub extrapolation: Extrapolation,
}

/// Fit a sample set and derive activation energy and extrapolation.
pub fn run_with_sample(sample: &SampleSet, config: &OutputConfig) -> Result<RunOutput, AppError> {
    let fit = ArrheniusFit::fit(sample)?;

    let k = config.units.energy.boltzmann_constant();

    // A 2-point set with uncertainties pins the line exactly but leaves no
    // residual degrees of freedom for an error estimate; degrade those runs
    // to point estimates so the exact fit is still reported.
    let activation_energy = match fit.activation_energy(k) {
        Err(AppError::IllConditioned(_)) => ActivationEnergy {
            value: -fit.slope() * k,
            error: None,
        },
        other => other?,
    };
    let extrapolation = match fit.extrapolate(config.t_ref) {
        Err(AppError::IllConditioned(_)) => Extrapolation {
            temperature: config.t_ref,
            dcoeff: (fit.slope() / config.t_ref + fit.intercept()).exp(),
            dcoeff_err: None,
        },
        other => other?,
    };

    Ok(RunOutput {
        fit,
        activation_energy,
        extrapolation,
    })
}
