//! Command-line parsing for the Arrhenius fitting tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::units::{
    DistanceUnit, EnergyUnit, ROOM_TEMPERATURE_K, TemperatureUnit, TimeUnit, UnitSystem,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "arrfit",
    version,
    about = "Arrhenius fitting and extrapolation of diffusion coefficients"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit temperature/diffusion-coefficient pairs from a CSV, print the
    /// summary, and optionally plot/export.
    Fit(FitArgs),
    /// Extract diffusion coefficients from one or more MSD trace CSVs.
    Msd(MsdArgs),
    /// Run the full pipeline on a seeded synthetic dataset (no input files).
    Demo(DemoArgs),
}

/// Input unit options, shared by all subcommands.
#[derive(Debug, Args, Clone)]
pub struct UnitArgs {
    /// Temperature unit of the input data.
    #[arg(long, value_enum, default_value_t = TemperatureUnit::Kelvin)]
    pub temperature_unit: TemperatureUnit,

    /// Distance unit of the input data.
    #[arg(long, value_enum, default_value_t = DistanceUnit::Centimeter)]
    pub distance_unit: DistanceUnit,

    /// Time unit of the input data.
    #[arg(long, value_enum, default_value_t = TimeUnit::Second)]
    pub time_unit: TimeUnit,

    /// Energy unit for the reported activation energy.
    #[arg(long, value_enum, default_value_t = EnergyUnit::ElectronVolt)]
    pub energy_unit: EnergyUnit,
}

impl UnitArgs {
    pub fn to_system(&self) -> UnitSystem {
        UnitSystem {
            temperature: self.temperature_unit,
            distance: self.distance_unit,
            time: self.time_unit,
            energy: self.energy_unit,
        }
    }
}

/// Output options shared by `fit` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Extrapolation target temperature (K).
    #[arg(long, default_value_t = ROOM_TEMPERATURE_K)]
    pub tref: f64,

    /// Export the linearized data and fitted line to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export fit parameters, derived quantities and a fitted grid to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Render an SVG Arrhenius plot.
    #[arg(long, value_name = "SVG")]
    pub plot: Option<PathBuf>,

    /// Plot width (pixels).
    #[arg(long, default_value_t = 800)]
    pub plot_width: u32,

    /// Plot height (pixels).
    #[arg(long, default_value_t = 600)]
    pub plot_height: u32,
}

/// Options for fitting a CSV of temperature/diffusion-coefficient pairs.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with columns `temperature, dcoeff[, dcoeff_err][, temp_err]`.
    pub csv: PathBuf,

    #[command(flatten)]
    pub units: UnitArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for MSD trace fitting.
#[derive(Debug, Parser, Clone)]
pub struct MsdArgs {
    /// MSD trace CSVs with columns `time, msd` (fitted independently).
    #[arg(required = true)]
    pub traces: Vec<PathBuf>,

    /// First frame index included in each fit.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// One past the last frame index (default: end of trace).
    #[arg(long)]
    pub stop: Option<usize>,

    /// Spatial dimensionality of the trajectories.
    #[arg(long, default_value_t = 3)]
    pub ndim: usize,

    #[command(flatten)]
    pub units: UnitArgs,
}

/// Options for the synthetic demo run.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of synthetic (T, D) points.
    #[arg(long, default_value_t = 8)]
    pub points: usize,

    /// Lower end of the temperature grid (K).
    #[arg(long, default_value_t = 600.0)]
    pub t_min: f64,

    /// Upper end of the temperature grid (K).
    #[arg(long, default_value_t = 1300.0)]
    pub t_max: f64,

    /// Pre-exponential factor (cm²/s).
    #[arg(long, default_value_t = 1e-5)]
    pub d0: f64,

    /// Activation energy (eV).
    #[arg(long, default_value_t = 0.6)]
    pub ea: f64,

    /// Log-space noise standard deviation.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Relative uncertainty attached to each point (0 omits the column).
    #[arg(long, default_value_t = 0.1)]
    pub rel_err: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub units: UnitArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_fit_command() {
        let cli = Cli::try_parse_from(["arrfit", "fit", "data.csv"]).unwrap();
        match cli.command {
            Command::Fit(args) => {
                assert_eq!(args.csv, PathBuf::from("data.csv"));
                assert!((args.output.tref - 300.0).abs() < 1e-12);
                assert!(args.output.export.is_none());
            }
            _ => panic!("expected fit subcommand"),
        }
    }

    #[test]
    fn parses_unit_overrides() {
        let cli = Cli::try_parse_from([
            "arrfit",
            "fit",
            "data.csv",
            "--distance-unit",
            "angstrom",
            "--time-unit",
            "picosecond",
            "--energy-unit",
            "kj-mol",
        ])
        .unwrap();
        match cli.command {
            Command::Fit(args) => {
                let units = args.units.to_system();
                assert_eq!(units.distance, DistanceUnit::Angstrom);
                assert_eq!(units.time, TimeUnit::Picosecond);
                assert_eq!(units.energy, EnergyUnit::KilojoulePerMole);
            }
            _ => panic!("expected fit subcommand"),
        }
    }

    #[test]
    fn msd_requires_at_least_one_trace() {
        assert!(Cli::try_parse_from(["arrfit", "msd"]).is_err());
    }
}
