//! Export fit results to CSV and JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON is the "portable" representation of a fit (parameters,
//! derived quantities, and a precomputed grid for re-plotting).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ActivationEnergy, Extrapolation, FitStdErrors};
use crate::error::AppError;
use crate::fit::ArrheniusFit;
use crate::report::fmt_sci;
use crate::units::UnitSystem;

/// A saved fit file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub units: UnitSystem,
    pub slope: f64,
    pub intercept: f64,
    pub std_errors: Option<FitStdErrors>,
    pub activation_energy: ActivationEnergy,
    pub extrapolation: Extrapolation,
    pub grid: FitGrid,
}

/// Fitted line evaluated on an even inverse-temperature grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitGrid {
    pub temperature_inv: Vec<f64>,
    pub ln_dcoeff: Vec<f64>,
}

/// Write the linearized data plus the fitted line to a CSV file.
///
/// The first line is a `#` comment stating the fitted equation and the
/// reference-temperature extrapolation, to 6 significant digits in
/// scientific notation.
pub fn write_arrhenius_csv(
    path: &Path,
    fit: &ArrheniusFit,
    extrapolation: &Extrapolation,
    units: &UnitSystem,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    let series = fit.series();
    let predicted = fit.predict_ln_x(&series.x);
    let y_err = series.y_err.as_slice();
    let x_err = series.x_err.as_deref();

    writeln!(file, "# {}", equation_line(fit, extrapolation, units))
        .map_err(|e| AppError::input(format!("failed to write export CSV header: {e}")))?;

    let mut columns = vec![
        "temperature-inverse",
        "log-diffusion",
        "log-diffusion-extrapolated",
    ];
    if y_err.is_some() {
        columns.push("log-diffusion-error");
    }
    if x_err.is_some() {
        columns.push("temperature-inverse-error");
    }
    writeln!(file, "{}", columns.join(","))
        .map_err(|e| AppError::input(format!("failed to write export CSV header: {e}")))?;

    for i in 0..series.len() {
        let mut fields = vec![
            fmt_sci(series.x[i]),
            fmt_sci(series.y[i]),
            fmt_sci(predicted[i]),
        ];
        if let Some(errs) = y_err {
            fields.push(fmt_sci(errs[i]));
        }
        if let Some(errs) = x_err {
            fields.push(fmt_sci(errs[i]));
        }
        writeln!(file, "{}", fields.join(","))
            .map_err(|e| AppError::input(format!("failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a fit JSON file.
pub fn write_fit_json(
    path: &Path,
    fit: &ArrheniusFit,
    activation_energy: &ActivationEnergy,
    extrapolation: &Extrapolation,
    units: &UnitSystem,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "failed to create fit JSON '{}': {e}",
            path.display()
        ))
    })?;

    let (temperature_inv, ln_dcoeff) = build_grid(fit, 101);
    let fit_file = FitFile {
        tool: "arrfit".to_string(),
        units: *units,
        slope: fit.slope(),
        intercept: fit.intercept(),
        // A refused error estimate is recorded as absent so degraded runs
        // can still be exported.
        std_errors: fit.standard_errors().unwrap_or(None),
        activation_energy: *activation_energy,
        extrapolation: *extrapolation,
        grid: FitGrid {
            temperature_inv,
            ln_dcoeff,
        },
    };

    serde_json::to_writer_pretty(file, &fit_file)
        .map_err(|e| AppError::input(format!("failed to write fit JSON: {e}")))?;

    Ok(())
}

/// The human-readable equation/extrapolation summary used as the CSV header
/// comment.
pub fn equation_line(
    fit: &ArrheniusFit,
    extrapolation: &Extrapolation,
    units: &UnitSystem,
) -> String {
    let base = format!(
        "ln D = {} / T + {}; D({} K) = {}",
        fmt_sci(fit.slope()),
        fmt_sci(fit.intercept()),
        extrapolation.temperature,
        fmt_sci(extrapolation.dcoeff),
    );
    match extrapolation.dcoeff_err {
        Some(err) => format!("{base} +/- {} {}", fmt_sci(err), units.dcoeff_label()),
        None => format!("{base} {}", units.dcoeff_label()),
    }
}

fn build_grid(fit: &ArrheniusFit, n: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n.max(2);
    let series = fit.series();
    let x0 = series.x.iter().cloned().fold(f64::INFINITY, f64::min);
    let x1 = series.x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut xs = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        xs.push(x0 + u * (x1 - x0));
    }
    let ys = fit.predict_ln_x(&xs);
    (xs, ys)
}
