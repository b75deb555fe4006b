//! CSV ingest and normalization.
//!
//! This module turns input CSVs into validated, canonical-unit data:
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** with 1-based line numbers in messages
//! - **Unit conversion at the boundary**: everything downstream is kelvin,
//!   centimeters, seconds
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::SampleSet;
use crate::error::AppError;
use crate::units::UnitSystem;

/// A raw MSD trace in canonical units (seconds, cm²).
#[derive(Debug, Clone)]
pub struct MsdTrace {
    pub time: Vec<f64>,
    pub msd: Vec<f64>,
}

const TEMPERATURE_ALIASES: &[&str] = &["temperature", "temp", "t"];
const DCOEFF_ALIASES: &[&str] = &["dcoeff", "d", "diffusion", "diffusion_coefficient"];
const DCOEFF_ERR_ALIASES: &[&str] = &["dcoeff_err", "d_err", "differr", "sigma_d"];
const TEMP_ERR_ALIASES: &[&str] = &["temp_err", "t_err", "temperr", "sigma_t"];
const TIME_ALIASES: &[&str] = &["time", "t"];
const MSD_ALIASES: &[&str] = &["msd", "mean_square_displacement"];

/// Load a `(temperature, dcoeff[, dcoeff_err][, temp_err])` CSV as a
/// validated sample set in canonical units.
pub fn load_sample_csv(path: &Path, units: &UnitSystem) -> Result<SampleSet, AppError> {
    let mut reader = open_csv(path)?;
    let header_map = build_header_map(&headers(&mut reader, path)?);

    let t_col = require_column(&header_map, TEMPERATURE_ALIASES, "temperature", path)?;
    let d_col = require_column(&header_map, DCOEFF_ALIASES, "dcoeff", path)?;
    let d_err_col = find_column(&header_map, DCOEFF_ERR_ALIASES);
    let t_err_col = find_column(&header_map, TEMP_ERR_ALIASES);

    let d_factor = units.dcoeff_to_canonical();

    let mut temperatures = Vec::new();
    let mut dcoeffs = Vec::new();
    let mut dcoeff_err = d_err_col.map(|_| Vec::new());
    let mut temp_err = t_err_col.map(|_| Vec::new());

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, and CSV line numbers
        // are 1-based.
        let line = idx + 2;
        let record = read_record(result, line, path)?;

        let t = parse_field(&record, t_col, "temperature", line, path)?;
        let d = parse_field(&record, d_col, "dcoeff", line, path)?;
        temperatures.push(units.temperature.to_kelvin(t));
        dcoeffs.push(d * d_factor);

        if let (Some(col), Some(out)) = (d_err_col, dcoeff_err.as_mut()) {
            let e = parse_field(&record, col, "dcoeff_err", line, path)?;
            out.push(e * d_factor);
        }
        if let (Some(col), Some(out)) = (t_err_col, temp_err.as_mut()) {
            let e = parse_field(&record, col, "temp_err", line, path)?;
            out.push(units.temperature.sigma_to_kelvin(e));
        }
    }

    SampleSet::new(temperatures, dcoeffs, dcoeff_err, temp_err)
}

/// Load a `(time, msd)` CSV as a canonical-unit trace.
pub fn load_msd_csv(path: &Path, units: &UnitSystem) -> Result<MsdTrace, AppError> {
    let mut reader = open_csv(path)?;
    let header_map = build_header_map(&headers(&mut reader, path)?);

    let time_col = require_column(&header_map, TIME_ALIASES, "time", path)?;
    let msd_col = require_column(&header_map, MSD_ALIASES, "msd", path)?;

    let time_factor = units.time.to_seconds();
    let dist = units.distance.to_centimeters();
    let msd_factor = dist * dist;

    let mut time = Vec::new();
    let mut msd = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = read_record(result, line, path)?;
        time.push(parse_field(&record, time_col, "time", line, path)? * time_factor);
        msd.push(parse_field(&record, msd_col, "msd", line, path)? * msd_factor);
    }

    if time.is_empty() {
        return Err(AppError::input(format!(
            "'{}' contains no data rows",
            path.display()
        )));
    }

    Ok(MsdTrace { time, msd })
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("failed to open CSV '{}': {e}", path.display())))?;
    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn headers(reader: &mut csv::Reader<File>, path: &Path) -> Result<StringRecord, AppError> {
    reader
        .headers()
        .map_err(|e| {
            AppError::input(format!(
                "failed to read CSV headers from '{}': {e}",
                path.display()
            ))
        })
        .cloned()
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase().replace('-', "_"), i))
        .collect()
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|a| header_map.get(*a).copied())
}

fn require_column(
    header_map: &HashMap<String, usize>,
    aliases: &[&str],
    name: &str,
    path: &Path,
) -> Result<usize, AppError> {
    find_column(header_map, aliases).ok_or_else(|| {
        AppError::input(format!(
            "'{}' is missing a '{name}' column (accepted: {})",
            path.display(),
            aliases.join(", ")
        ))
    })
}

fn read_record(
    result: Result<StringRecord, csv::Error>,
    line: usize,
    path: &Path,
) -> Result<StringRecord, AppError> {
    result.map_err(|e| {
        AppError::input(format!(
            "failed to read '{}' line {line}: {e}",
            path.display()
        ))
    })
}

fn parse_field(
    record: &StringRecord,
    col: usize,
    name: &str,
    line: usize,
    path: &Path,
) -> Result<f64, AppError> {
    let raw = record.get(col).unwrap_or("");
    if raw.is_empty() {
        return Err(AppError::input(format!(
            "'{}' line {line}: empty '{name}' field",
            path.display()
        )));
    }
    raw.parse::<f64>().map_err(|_| {
        AppError::input(format!(
            "'{}' line {line}: cannot parse '{name}' value '{raw}' as a number",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DistanceUnit, TimeUnit};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("arrfit-ingest-{name}-{}", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_plain_sample_csv() {
        let path = write_temp(
            "plain.csv",
            "temperature,dcoeff\n900,1e-10\n1000,1e-9\n1100,1e-8\n",
        );
        let sample = load_sample_csv(&path, &UnitSystem::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(sample.len(), 3);
        assert!((sample.temperatures()[0] - 900.0).abs() < 1e-12);
        assert!(sample.dcoeff_err().is_none());
    }

    #[test]
    fn loads_uncertainty_columns_with_aliases() {
        let path = write_temp(
            "alias.csv",
            "temp,d,sigma_d,sigma_t\n900,1e-10,1e-11,5\n1000,1e-9,1e-10,5\n1100,1e-8,1e-9,5\n",
        );
        let sample = load_sample_csv(&path, &UnitSystem::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert!((sample.dcoeff_err().unwrap()[1] - 1e-10).abs() < 1e-22);
        assert!((sample.temp_err().unwrap()[2] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn converts_units_at_the_boundary() {
        let units = UnitSystem {
            distance: DistanceUnit::Angstrom,
            time: TimeUnit::Picosecond,
            ..UnitSystem::default()
        };
        let path = write_temp("units.csv", "temperature,dcoeff\n900,1.0\n1000,2.0\n");
        let sample = load_sample_csv(&path, &units).unwrap();
        std::fs::remove_file(&path).ok();

        // 1 A^2/ps = 1e-4 cm^2/s.
        assert!((sample.dcoeffs()[0] - 1e-4).abs() < 1e-16);
    }

    #[test]
    fn reports_the_failing_line() {
        let path = write_temp(
            "badrow.csv",
            "temperature,dcoeff\n900,1e-10\nnot-a-number,1e-9\n",
        );
        let err = load_sample_csv(&path, &UnitSystem::default()).unwrap_err();
        std::fs::remove_file(&path).ok();

        let message = err.to_string();
        assert!(matches!(err, AppError::Input(_)));
        assert!(message.contains("line 3"), "got: {message}");
    }

    #[test]
    fn missing_required_column_is_an_input_error() {
        let path = write_temp("nocol.csv", "temperature,foo\n900,1\n1000,2\n");
        let err = load_sample_csv(&path, &UnitSystem::default()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn loads_an_msd_trace() {
        let path = write_temp("msd.csv", "time,msd\n0.0,0.0\n1.0,6.0\n2.0,12.0\n");
        let trace = load_msd_csv(&path, &UnitSystem::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(trace.time.len(), 3);
        assert!((trace.msd[2] - 12.0).abs() < 1e-12);
    }
}
