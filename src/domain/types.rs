//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::units::UnitSystem;

/// Optional per-point log-space uncertainty, threaded through the whole
/// pipeline as a tagged variant.
///
/// Downstream code branches on the variant instead of null-checking a
/// side-channel array, so "no uncertainty supplied" stays a structural fact
/// from ingest to export: the extrapolation error is absent, never zero.
#[derive(Debug, Clone, PartialEq)]
pub enum YUncertainty {
    /// No uncertainties were supplied with the sample set.
    PointEstimateOnly,
    /// One `σy_i > 0` per point.
    WithUncertainty(Vec<f64>),
}

impl YUncertainty {
    pub fn as_slice(&self) -> Option<&[f64]> {
        match self {
            YUncertainty::PointEstimateOnly => None,
            YUncertainty::WithUncertainty(sigmas) => Some(sigmas),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, YUncertainty::WithUncertainty(_))
    }
}

/// A validated set of (temperature, diffusion-coefficient) observations in
/// canonical units (kelvin, cm²/s).
///
/// All domain invariants are enforced at construction, before any fitting:
///
/// - at least two observations, parallel array lengths
/// - temperatures finite, positive, and pairwise distinct
/// - diffusion coefficients finite and positive
/// - `σD_i` finite and strictly positive when supplied (a zero y-uncertainty
///   would produce an undefined regression weight)
/// - `σT_i` finite and non-negative when supplied
///
/// Fields are private so a `SampleSet` in hand is always safe to linearize.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    temperatures: Vec<f64>,
    dcoeffs: Vec<f64>,
    dcoeff_err: Option<Vec<f64>>,
    temp_err: Option<Vec<f64>>,
}

impl SampleSet {
    pub fn new(
        temperatures: Vec<f64>,
        dcoeffs: Vec<f64>,
        dcoeff_err: Option<Vec<f64>>,
        temp_err: Option<Vec<f64>>,
    ) -> Result<Self, AppError> {
        let n = temperatures.len();
        if dcoeffs.len() != n {
            return Err(AppError::input(format!(
                "temperature and diffusion-coefficient arrays differ in length ({n} vs {})",
                dcoeffs.len()
            )));
        }
        if n < 2 {
            return Err(AppError::insufficient_data(format!(
                "a line fit needs at least 2 observations, got {n}"
            )));
        }

        for (i, &t) in temperatures.iter().enumerate() {
            if !t.is_finite() || t <= 0.0 {
                return Err(AppError::domain(format!(
                    "temperature must be finite and > 0 K, got {t} at index {i}"
                )));
            }
        }
        for (i, &d) in dcoeffs.iter().enumerate() {
            if !d.is_finite() || d <= 0.0 {
                return Err(AppError::domain(format!(
                    "diffusion coefficient must be finite and > 0, got {d} at index {i}"
                )));
            }
        }

        // Duplicate temperatures make the linearized design degenerate
        // (two identical x rows fighting over one line).
        for i in 0..n {
            for j in (i + 1)..n {
                if temperatures[i] == temperatures[j] {
                    return Err(AppError::domain(format!(
                        "temperatures must be pairwise distinct, {t} K appears at indices {i} and {j}",
                        t = temperatures[i]
                    )));
                }
            }
        }

        if let Some(errs) = &dcoeff_err {
            if errs.len() != n {
                return Err(AppError::input(format!(
                    "diffusion-coefficient uncertainty array has length {} for {n} observations",
                    errs.len()
                )));
            }
            for (i, &e) in errs.iter().enumerate() {
                if !e.is_finite() || e <= 0.0 {
                    return Err(AppError::domain(format!(
                        "diffusion-coefficient uncertainty must be finite and > 0, got {e} at index {i}"
                    )));
                }
            }
        }
        if let Some(errs) = &temp_err {
            if errs.len() != n {
                return Err(AppError::input(format!(
                    "temperature uncertainty array has length {} for {n} observations",
                    errs.len()
                )));
            }
            for (i, &e) in errs.iter().enumerate() {
                if !e.is_finite() || e < 0.0 {
                    return Err(AppError::domain(format!(
                        "temperature uncertainty must be finite and >= 0, got {e} at index {i}"
                    )));
                }
            }
        }

        Ok(Self {
            temperatures,
            dcoeffs,
            dcoeff_err,
            temp_err,
        })
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn dcoeffs(&self) -> &[f64] {
        &self.dcoeffs
    }

    pub fn dcoeff_err(&self) -> Option<&[f64]> {
        self.dcoeff_err.as_deref()
    }

    pub fn temp_err(&self) -> Option<&[f64]> {
        self.temp_err.as_deref()
    }
}

/// The linearized view of a sample set: `x = 1/T`, `y = ln D`, with
/// first-order propagated uncertainties. Recomputed from the sample set,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// `σx_i = σT_i / T_i²`, present only when temperature uncertainties were
    /// supplied. Display-only: it never enters the weighting or propagation.
    pub x_err: Option<Vec<f64>>,
    /// `σy_i = σD_i / D_i`, driving both the fit weights and the closed-form
    /// standard errors.
    pub y_err: YUncertainty,
}

impl LinearSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Fitted line in log space: `ln D = slope·(1/T) + intercept`.
///
/// The slope carries kelvin units; the intercept is dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Closed-form standard errors of the weighted fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStdErrors {
    pub slope: f64,
    pub intercept: f64,
}

/// Extrapolated diffusion coefficient at a reference temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrapolation {
    /// Reference temperature (K).
    pub temperature: f64,
    /// `D(T_ref)` in cm²/s.
    pub dcoeff: f64,
    /// Delta-method error; `None` when the sample set carried no
    /// uncertainties.
    pub dcoeff_err: Option<f64>,
}

/// Activation energy recovered from the slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationEnergy {
    /// `E = -slope · k`, in the configured energy unit.
    pub value: f64,
    /// `σE = σ_slope · k`; `None` without input uncertainties.
    pub error: Option<f64>,
}

/// Output options shared by the `fit` and `demo` commands.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub units: UnitSystem,
    /// Extrapolation target (K).
    pub t_ref: f64,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub plot_svg: Option<PathBuf>,
    pub plot_width: u32,
    pub plot_height: u32,
}
