//! Diffusion coefficient from a mean-square-displacement trace.
//!
//! For normal diffusion in `ndim` dimensions the Einstein relation gives
//!
//! ```text
//! MSD(t) = 2·ndim·D·t + c
//! ```
//!
//! so `D` is the OLS slope of MSD vs time divided by `2·ndim`. Early ballistic
//! frames and the noisy tail are excluded with an index window.

use crate::error::AppError;
use crate::math::fit_weighted_line;

/// Index window and dimensionality for an MSD slope fit.
#[derive(Debug, Clone, Copy)]
pub struct MsdWindow {
    /// First frame index included in the fit.
    pub start: usize,
    /// One past the last frame index; `None` means the end of the trace.
    pub stop: Option<usize>,
    /// Spatial dimensionality of the trajectory.
    pub ndim: usize,
}

impl Default for MsdWindow {
    fn default() -> Self {
        Self {
            start: 0,
            stop: None,
            ndim: 3,
        }
    }
}

/// Result of an MSD slope fit, in the units of the inputs.
#[derive(Debug, Clone, Copy)]
pub struct MsdFit {
    /// `slope / (2·ndim)`.
    pub dcoeff: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Number of frames inside the fit window.
    pub n_used: usize,
}

/// Fit the diffusion coefficient from parallel time/MSD arrays.
pub fn diffusion_from_msd(
    time: &[f64],
    msd: &[f64],
    window: &MsdWindow,
) -> Result<MsdFit, AppError> {
    if time.len() != msd.len() {
        return Err(AppError::input(format!(
            "time and MSD arrays differ in length ({} vs {})",
            time.len(),
            msd.len()
        )));
    }
    if window.ndim == 0 {
        return Err(AppError::input("MSD dimensionality must be >= 1"));
    }

    let stop = window.stop.unwrap_or(time.len());
    if stop > time.len() || window.start >= stop {
        return Err(AppError::input(format!(
            "MSD fit window [{}, {stop}) is out of range for a trace of {} frames",
            window.start,
            time.len()
        )));
    }

    let t = &time[window.start..stop];
    let y = &msd[window.start..stop];
    if t.len() < 2 {
        return Err(AppError::insufficient_data(format!(
            "MSD fit window holds {} frame(s), need at least 2",
            t.len()
        )));
    }
    for (i, &ti) in t.iter().enumerate() {
        if !ti.is_finite() {
            return Err(AppError::domain(format!(
                "non-finite time value {ti} at frame {}",
                window.start + i
            )));
        }
    }
    for (i, &mi) in y.iter().enumerate() {
        if !mi.is_finite() || mi < 0.0 {
            return Err(AppError::domain(format!(
                "MSD must be finite and >= 0, got {mi} at frame {}",
                window.start + i
            )));
        }
    }

    let weights = vec![1.0; t.len()];
    let line = fit_weighted_line(t, y, &weights)?;

    Ok(MsdFit {
        dcoeff: line.slope / (2.0 * window.ndim as f64),
        slope: line.slope,
        intercept: line.intercept,
        n_used: t.len(),
    })
}
