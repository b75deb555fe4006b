//! Unit-system configuration and canonical conversions.
//!
//! All fitting happens in a canonical system (kelvin, centimeter, second,
//! electron-volt). Inputs are converted once at the ingest boundary; derived
//! quantities are reported back in the configured units.
//!
//! The configuration is an explicit struct with named fields and
//! compile-time defaults rather than a string-keyed registry, so an
//! unsupported unit is a parse error at the CLI, not a runtime lookup
//! failure mid-fit.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Boltzmann constant in eV/K (CODATA 2018).
pub const BOLTZMANN_EV_PER_K: f64 = 8.617333262e-5;

/// Molar gas constant in J/(mol·K) (CODATA 2018, exact).
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.31446261815324;

/// Standard room temperature (K), the default extrapolation target.
pub const ROOM_TEMPERATURE_K: f64 = 300.0;

/// Temperature unit of the input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
}

impl TemperatureUnit {
    /// Convert a temperature reading to kelvin.
    pub fn to_kelvin(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Kelvin => value,
            TemperatureUnit::Celsius => value + 273.15,
        }
    }

    /// Convert a temperature *uncertainty* to kelvin.
    ///
    /// Both supported scales are kelvin-sized, so uncertainties pass through
    /// unchanged; only absolute readings get the Celsius offset.
    pub fn sigma_to_kelvin(self, sigma: f64) -> f64 {
        sigma
    }
}

/// Distance unit of the MSD / diffusion-coefficient data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Centimeter,
    Meter,
    Angstrom,
    Nanometer,
}

impl DistanceUnit {
    /// Scale factor to centimeters.
    pub fn to_centimeters(self) -> f64 {
        match self {
            DistanceUnit::Centimeter => 1.0,
            DistanceUnit::Meter => 1e2,
            DistanceUnit::Angstrom => 1e-8,
            DistanceUnit::Nanometer => 1e-7,
        }
    }
}

/// Time unit of the MSD / diffusion-coefficient data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Millisecond,
    Nanosecond,
    Picosecond,
    Femtosecond,
}

impl TimeUnit {
    /// Scale factor to seconds.
    pub fn to_seconds(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Millisecond => 1e-3,
            TimeUnit::Nanosecond => 1e-9,
            TimeUnit::Picosecond => 1e-12,
            TimeUnit::Femtosecond => 1e-15,
        }
    }
}

/// Energy unit for the reported activation energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    #[serde(rename = "eV")]
    #[value(name = "ev")]
    ElectronVolt,
    #[serde(rename = "J/mol")]
    #[value(name = "j-mol")]
    JoulePerMole,
    #[serde(rename = "kJ/mol")]
    #[value(name = "kj-mol")]
    KilojoulePerMole,
    #[serde(rename = "kcal/mol")]
    #[value(name = "kcal-mol")]
    KilocaloriePerMole,
}

impl EnergyUnit {
    /// The Boltzmann (per-particle) or gas (per-mole) constant expressed in
    /// this energy unit per kelvin. `E = -slope * k` then lands directly in
    /// the configured unit.
    pub fn boltzmann_constant(self) -> f64 {
        match self {
            EnergyUnit::ElectronVolt => BOLTZMANN_EV_PER_K,
            EnergyUnit::JoulePerMole => GAS_CONSTANT_J_PER_MOL_K,
            EnergyUnit::KilojoulePerMole => GAS_CONSTANT_J_PER_MOL_K * 1e-3,
            EnergyUnit::KilocaloriePerMole => GAS_CONSTANT_J_PER_MOL_K / 4184.0,
        }
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            EnergyUnit::ElectronVolt => "eV",
            EnergyUnit::JoulePerMole => "J/mol",
            EnergyUnit::KilojoulePerMole => "kJ/mol",
            EnergyUnit::KilocaloriePerMole => "kcal/mol",
        }
    }
}

/// The full unit system for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub temperature: TemperatureUnit,
    pub distance: DistanceUnit,
    pub time: TimeUnit,
    pub energy: EnergyUnit,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Kelvin,
            distance: DistanceUnit::Centimeter,
            time: TimeUnit::Second,
            energy: EnergyUnit::ElectronVolt,
        }
    }
}

impl UnitSystem {
    /// Scale factor from input diffusion-coefficient units
    /// (distance²/time) to the canonical cm²/s.
    pub fn dcoeff_to_canonical(&self) -> f64 {
        let d = self.distance.to_centimeters();
        d * d / self.time.to_seconds()
    }

    /// Label for diffusion-coefficient values in reports (canonical units).
    pub fn dcoeff_label(&self) -> &'static str {
        "cm^2/s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_system_is_canonical() {
        let units = UnitSystem::default();
        assert_eq!(units.temperature, TemperatureUnit::Kelvin);
        assert!((units.dcoeff_to_canonical() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn celsius_offsets_values_but_not_sigmas() {
        let celsius = TemperatureUnit::Celsius;
        assert!((celsius.to_kelvin(25.0) - 298.15).abs() < 1e-12);
        assert!((celsius.sigma_to_kelvin(2.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn angstrom_picosecond_dcoeff_factor() {
        let units = UnitSystem {
            distance: DistanceUnit::Angstrom,
            time: TimeUnit::Picosecond,
            ..UnitSystem::default()
        };
        // 1 A^2/ps = 1e-16 cm^2 / 1e-12 s = 1e-4 cm^2/s.
        assert!((units.dcoeff_to_canonical() - 1e-4).abs() < 1e-18);
    }

    #[test]
    fn boltzmann_constants_match_codata() {
        assert!((EnergyUnit::ElectronVolt.boltzmann_constant() - 8.617333262e-5).abs() < 1e-15);
        assert!(
            (EnergyUnit::KilojoulePerMole.boltzmann_constant() - 8.31446261815324e-3).abs()
                < 1e-15
        );
    }
}
