//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates input data
//! - runs the fit pipeline
//! - prints reports
//! - writes optional exports and plots

use clap::Parser;
use rayon::prelude::*;

use crate::cli::{Command, DemoArgs, FitArgs, MsdArgs, OutputArgs};
use crate::data::{DemoSpec, generate_arrhenius_sample};
use crate::domain::{OutputConfig, SampleSet};
use crate::error::AppError;
use crate::fit::{MsdWindow, diffusion_from_msd};
use crate::units::UnitSystem;

pub mod pipeline;

/// Entry point for the `arrfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Msd(args) => handle_msd(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let units = args.units.to_system();
    let sample = crate::io::ingest::load_sample_csv(&args.csv, &units)?;
    finish_run(&sample, &output_config(units, &args.output))
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let units = args.units.to_system();
    let spec = DemoSpec {
        n_points: args.points,
        t_min: args.t_min,
        t_max: args.t_max,
        d0: args.d0,
        activation_energy: args.ea,
        noise: args.noise,
        rel_err: args.rel_err,
        seed: args.seed,
    };
    let sample = generate_arrhenius_sample(&spec)?;
    finish_run(&sample, &output_config(units, &args.output))
}

fn handle_msd(args: MsdArgs) -> Result<(), AppError> {
    let units = args.units.to_system();
    let window = MsdWindow {
        start: args.start,
        stop: args.stop,
        ndim: args.ndim,
    };

    // Traces are independent, so fit them in parallel. Results keep the
    // input order.
    let results: Vec<(String, crate::fit::MsdFit)> = args
        .traces
        .par_iter()
        .map(|path| {
            let trace = crate::io::ingest::load_msd_csv(path, &units)?;
            let fit = diffusion_from_msd(&trace.time, &trace.msd, &window)?;
            Ok((path.display().to_string(), fit))
        })
        .collect::<Result<_, AppError>>()?;

    print!("{}", crate::report::format_msd_summary(&results, &units));
    Ok(())
}

/// Run the shared pipeline and emit terminal output, exports and plots.
fn finish_run(sample: &SampleSet, config: &OutputConfig) -> Result<(), AppError> {
    let run = pipeline::run_with_sample(sample, config)?;

    print!(
        "{}",
        crate::report::format_run_summary(
            sample,
            &run.fit,
            &run.activation_energy,
            &run.extrapolation,
            &config.units,
        )
    );

    if let Some(path) = &config.export_csv {
        crate::io::export::write_arrhenius_csv(path, &run.fit, &run.extrapolation, &config.units)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_fit_json(
            path,
            &run.fit,
            &run.activation_energy,
            &run.extrapolation,
            &config.units,
        )?;
    }
    if let Some(path) = &config.plot_svg {
        crate::plot::render_arrhenius_svg(path, &run.fit, config.plot_width, config.plot_height)?;
    }

    Ok(())
}

fn output_config(units: UnitSystem, args: &OutputArgs) -> OutputConfig {
    OutputConfig {
        units,
        t_ref: args.tref,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
        plot_svg: args.plot.clone(),
        plot_width: args.plot_width,
        plot_height: args.plot_height,
    }
}
