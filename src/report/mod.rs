//! Reporting utilities: formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{ActivationEnergy, Extrapolation, SampleSet};
use crate::fit::{ArrheniusFit, MsdFit};
use crate::units::UnitSystem;

/// Format a value to 6 significant digits in scientific notation, with a
/// signed two-digit exponent (`2.91321e-15`, `-8.51387e+03`).
pub fn fmt_sci(value: f64) -> String {
    let raw = format!("{value:.5e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}

/// Format an optional-error quantity as `value` or `value +/- error`.
pub fn fmt_with_error(value: f64, error: Option<f64>) -> String {
    match error {
        Some(err) => format!("{} +/- {}", fmt_sci(value), fmt_sci(err)),
        None => fmt_sci(value),
    }
}

/// Format the full run summary (dataset stats + fit + derived quantities).
pub fn format_run_summary(
    sample: &SampleSet,
    fit: &ArrheniusFit,
    activation_energy: &ActivationEnergy,
    extrapolation: &Extrapolation,
    units: &UnitSystem,
) -> String {
    let mut out = String::new();

    let t_min = sample
        .temperatures()
        .iter()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let t_max = sample
        .temperatures()
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    out.push_str("=== arrfit - Arrhenius fit ===\n");
    out.push_str(&format!(
        "Points: n={} | T=[{t_min:.2}, {t_max:.2}] K\n",
        sample.len()
    ));
    out.push_str(&format!(
        "Weighting: {}\n",
        if sample.dcoeff_err().is_some() {
            "log-space uncertainties"
        } else {
            "uniform (no uncertainties supplied)"
        }
    ));

    out.push_str("\nFit: ln D = slope/T + intercept\n");
    // A refused error estimate (no residual degrees of freedom) downgrades
    // to point-estimate formatting; the exact fit still prints.
    let std_errors = fit.standard_errors().unwrap_or(None);
    out.push_str(&format!(
        "- slope: {} K\n",
        fmt_with_error(fit.slope(), std_errors.map(|se| se.slope))
    ));
    out.push_str(&format!(
        "- intercept: {}\n",
        fmt_with_error(fit.intercept(), std_errors.map(|se| se.intercept))
    ));

    out.push_str(&format!(
        "\nActivation energy: {} {}\n",
        fmt_with_error(activation_energy.value, activation_energy.error),
        units.energy.label()
    ));
    out.push_str(&format!(
        "Extrapolation: D({} K) = {} {}\n",
        extrapolation.temperature,
        fmt_with_error(extrapolation.dcoeff, extrapolation.dcoeff_err),
        units.dcoeff_label()
    ));

    out
}

/// Format per-trace MSD fit results.
pub fn format_msd_summary(results: &[(String, MsdFit)], units: &UnitSystem) -> String {
    let mut out = String::new();
    out.push_str("=== arrfit - MSD diffusion coefficients ===\n");
    for (label, fit) in results {
        out.push_str(&format!(
            "{label}: D = {} {} (slope {}, n={})\n",
            fmt_sci(fit.dcoeff),
            units.dcoeff_label(),
            fmt_sci(fit.slope),
            fit.n_used
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::BOLTZMANN_EV_PER_K;

    #[test]
    fn fmt_sci_keeps_six_significant_digits() {
        assert_eq!(fmt_sci(2.9132136270468383e-15), "2.91321e-15");
        assert_eq!(fmt_sci(-8513.869191), "-8.51387e+03");
        assert_eq!(fmt_sci(0.7336685), "7.33668e-01");
    }

    #[test]
    fn fmt_with_error_branches_on_presence() {
        assert_eq!(fmt_with_error(1.5, None), "1.50000e+00");
        assert_eq!(
            fmt_with_error(1.5, Some(0.25)),
            "1.50000e+00 +/- 2.50000e-01"
        );
    }

    #[test]
    fn run_summary_mentions_all_derived_quantities() {
        let sample = SampleSet::new(
            vec![900.0, 1000.0, 1100.0, 1200.0],
            vec![1e-10, 1e-9, 1e-8, 1e-7],
            None,
            None,
        )
        .unwrap();
        let fit = ArrheniusFit::fit(&sample).unwrap();
        let ea = fit.activation_energy(BOLTZMANN_EV_PER_K).unwrap();
        let ex = fit.extrapolate(300.0).unwrap();

        let summary = format_run_summary(&sample, &fit, &ea, &ex, &UnitSystem::default());
        assert!(summary.contains("Points: n=4"));
        assert!(summary.contains("uniform"));
        assert!(summary.contains("Activation energy:"));
        assert!(summary.contains("D(300 K) ="));
        assert!(summary.contains("eV"));
    }

    #[test]
    fn two_point_summary_still_prints_the_exact_fit() {
        let sample = SampleSet::new(
            vec![800.0, 1200.0],
            vec![1e-9, 1e-7],
            Some(vec![1e-10, 1e-8]),
            None,
        )
        .unwrap();
        let fit = ArrheniusFit::fit(&sample).unwrap();
        let ea = ActivationEnergy {
            value: -fit.slope() * BOLTZMANN_EV_PER_K,
            error: None,
        };
        let ex = Extrapolation {
            temperature: 300.0,
            dcoeff: (fit.slope() / 300.0 + fit.intercept()).exp(),
            dcoeff_err: None,
        };

        let summary = format_run_summary(&sample, &fit, &ea, &ex, &UnitSystem::default());
        assert!(summary.contains(&format!("- slope: {} K", fmt_sci(fit.slope()))));
        assert!(!summary.contains("+/-"));
    }
}
