//! The fitted Arrhenius session.
//!
//! The lifecycle is a two-state machine made unrepresentable-by-construction:
//! an unfitted dataset is just a [`SampleSet`]; calling [`ArrheniusFit::fit`]
//! consumes nothing and returns the fitted value, which alone exposes
//! extrapolation, activation-energy and prediction queries. There is no way
//! to ask a question of a fit that has not happened.

use crate::domain::{
    ActivationEnergy, Extrapolation, FitLine, FitStdErrors, LinearSeries, SampleSet, YUncertainty,
};
use crate::error::AppError;
use crate::fit::linearize;
use crate::math::fit_weighted_line;

/// A completed weighted fit of `ln D = slope·(1/T) + intercept`.
///
/// Immutable once constructed; refitting the same sample set yields an
/// identical value.
#[derive(Debug, Clone)]
pub struct ArrheniusFit {
    series: LinearSeries,
    line: FitLine,
}

impl ArrheniusFit {
    /// Linearize and fit a sample set.
    ///
    /// Weighting convention: when uncertainties are supplied, the i-th
    /// squared residual is weighted by `σy_i = σD_i/D_i` itself (not its
    /// inverse). Inverse-variance weighting is the textbook choice, but the
    /// published regressions of the reference datasets this tool is
    /// validated against (Fuller 1953 tracer diffusion in germanium, among
    /// others) were produced with the raw uncertainty as the sample weight,
    /// so we follow that convention. Without uncertainties the weights are
    /// uniform.
    pub fn fit(sample: &SampleSet) -> Result<Self, AppError> {
        let series = linearize(sample);

        let weights = match &series.y_err {
            YUncertainty::PointEstimateOnly => vec![1.0; series.len()],
            YUncertainty::WithUncertainty(sigmas) => sigmas.clone(),
        };

        let line = fit_weighted_line(&series.x, &series.y, &weights)?;
        Ok(Self { series, line })
    }

    pub fn line(&self) -> FitLine {
        self.line
    }

    /// Fitted slope in kelvin.
    pub fn slope(&self) -> f64 {
        self.line.slope
    }

    /// Fitted intercept (dimensionless, `ln D0`).
    pub fn intercept(&self) -> f64 {
        self.line.intercept
    }

    /// The linearized data the fit was computed from.
    pub fn series(&self) -> &LinearSeries {
        &self.series
    }

    /// Closed-form standard errors of slope and intercept under weighted
    /// least squares, or `None` when the sample set carried no
    /// uncertainties.
    ///
    /// With weights `1/σy_i²`:
    ///
    /// ```text
    /// S1  = Σ 1/σy_i²       Sxx = Σ (x_i/σy_i)²     Sx1 = Σ x_i/σy_i²
    /// Δ   = S1·Sxx − Sx1²
    /// σ_slope = sqrt(S1/Δ)   σ_intercept = sqrt(Sxx/Δ)
    /// ```
    ///
    /// Two points pin the line exactly and leave no residual degrees of
    /// freedom, so an error estimate is refused for n < 3 even though Δ is
    /// formally positive there.
    pub fn standard_errors(&self) -> Result<Option<FitStdErrors>, AppError> {
        let Some(sigmas) = self.series.y_err.as_slice() else {
            return Ok(None);
        };

        let n = self.series.len();
        if n < 3 {
            return Err(AppError::ill_conditioned(format!(
                "standard errors need at least 3 points (no residual degrees of freedom with {n})"
            )));
        }

        let mut s1 = 0.0;
        let mut sxx = 0.0;
        let mut sx1 = 0.0;
        for (xi, si) in self.series.x.iter().zip(sigmas) {
            let inv_var = 1.0 / (si * si);
            s1 += inv_var;
            sxx += (xi / si) * (xi / si);
            sx1 += xi * inv_var;
        }

        let delta = s1 * sxx - sx1 * sx1;
        if !delta.is_finite() || delta <= 0.0 {
            return Err(AppError::ill_conditioned(format!(
                "weighted normal equations are degenerate (delta = {delta:e})"
            )));
        }

        Ok(Some(FitStdErrors {
            slope: (s1 / delta).sqrt(),
            intercept: (sxx / delta).sqrt(),
        }))
    }

    /// Extrapolate the diffusion coefficient to a reference temperature.
    ///
    /// `D(T_ref) = exp(slope/T_ref + intercept)`, with the delta-method
    /// error
    ///
    /// ```text
    /// σ_D = D · sqrt((σ_slope/T_ref)² + σ_intercept²)
    /// ```
    ///
    /// treating slope and intercept as independent. Their cross-covariance
    /// is deliberately neglected; this is a documented first-order
    /// simplification, not an oversight.
    pub fn extrapolate(&self, t_ref: f64) -> Result<Extrapolation, AppError> {
        if !t_ref.is_finite() || t_ref <= 0.0 {
            return Err(AppError::domain(format!(
                "reference temperature must be finite and > 0 K, got {t_ref}"
            )));
        }

        let dcoeff = (self.line.slope / t_ref + self.line.intercept).exp();
        let dcoeff_err = self
            .standard_errors()?
            .map(|se| dcoeff * ((se.slope / t_ref).powi(2) + se.intercept.powi(2)).sqrt());

        Ok(Extrapolation {
            temperature: t_ref,
            dcoeff,
            dcoeff_err,
        })
    }

    /// Activation energy `E = -slope · k`, where `k` is the Boltzmann or gas
    /// constant in the caller's energy unit per kelvin.
    pub fn activation_energy(&self, k: f64) -> Result<ActivationEnergy, AppError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(AppError::domain(format!(
                "Boltzmann/gas constant must be finite and > 0, got {k}"
            )));
        }

        let error = self.standard_errors()?.map(|se| se.slope * k);
        Ok(ActivationEnergy {
            value: -self.line.slope * k,
            error,
        })
    }

    /// Predicted `ln D` at each temperature: `intercept + slope/T`.
    ///
    /// Pure affine evaluation with no propagation; used to draw fitted lines
    /// over the sample range. Temperatures must be finite and positive, same
    /// as for [`ArrheniusFit::extrapolate`].
    pub fn predict_ln(&self, temperatures: &[f64]) -> Result<Vec<f64>, AppError> {
        for &t in temperatures {
            if !t.is_finite() || t <= 0.0 {
                return Err(AppError::domain(format!(
                    "prediction temperature must be finite and > 0 K, got {t}"
                )));
            }
        }
        Ok(temperatures
            .iter()
            .map(|t| self.line.intercept + self.line.slope / t)
            .collect())
    }

    /// Predicted `ln D` at each inverse temperature: `intercept + slope·x`.
    pub fn predict_ln_x(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .map(|xi| self.line.intercept + self.line.slope * xi)
            .collect()
    }
}
