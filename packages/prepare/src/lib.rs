#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Preparation step for the energy risk dashboard.
//!
//! Reads the raw OWID energy CSV, keeps the 2022 rows that carry an ISO
//! code, projects them to the fixed column list, derives the demand /
//! generation ratio and the four risk ratings, and writes the processed
//! table the dashboard loads at startup.
//!
//! Output is fully buffered and moved into place with a rename, so a run
//! that fails part way never leaves a truncated processed file behind.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use energy_risk_models::{DERIVED_COLUMNS, ProcessedRecord, RAW_COLUMNS, RawRecord, paths};
use thiserror::Error;

/// Errors from the preparation step.
///
/// A missing input file is not an error; see [`PrepareOutcome::InputNotFound`].
#[derive(Debug, Error)]
pub enum PrepareError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input header lacks one or more projected columns.
    #[error("Input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Input and output locations for a preparation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareConfig {
    /// Raw OWID energy CSV.
    pub input: PathBuf,
    /// Processed CSV to write.
    pub output: PathBuf,
}

impl PrepareConfig {
    /// Builds a config from the canonical paths, honouring the
    /// `ENERGY_RISK_RAW_CSV` and `ENERGY_RISK_PROCESSED_CSV` overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            input: paths::raw_csv_path(),
            output: paths::processed_csv_path(),
        }
    }
}

/// Row counts from a single transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    /// Data rows read from the input.
    pub rows_read: u64,
    /// Rows written to the processed table.
    pub rows_written: u64,
    /// Qualifying rows dropped because their ISO code was already written.
    pub duplicates_skipped: u64,
}

/// Result of a preparation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// The processed table was written.
    Written {
        /// Where the table was written.
        path: PathBuf,
        /// Row counts.
        summary: PrepareSummary,
    },
    /// The raw input does not exist. Nothing was written.
    InputNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
}

/// Runs the preparation step from `config.input` to `config.output`.
///
/// # Errors
///
/// Returns [`PrepareError`] if the input cannot be parsed, lacks required
/// columns, or the output cannot be written. A missing input file is
/// reported as [`PrepareOutcome::InputNotFound`] instead.
pub fn prepare(config: &PrepareConfig) -> Result<PrepareOutcome, PrepareError> {
    log::info!("Input path: {}", config.input.display());
    log::info!("Output path: {}", config.output.display());

    let file = match std::fs::File::open(&config.input) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Input file not found at: {}", config.input.display());
            return Ok(PrepareOutcome::InputNotFound {
                path: config.input.clone(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut buffer = Vec::new();
    let summary = prepare_records(std::io::BufReader::new(file), &mut buffer)?;

    write_atomically(&config.output, &buffer)?;

    log::info!(
        "Wrote {} rows ({} read, {} duplicate ISO codes skipped)",
        summary.rows_written,
        summary.rows_read,
        summary.duplicates_skipped
    );

    Ok(PrepareOutcome::Written {
        path: config.output.clone(),
        summary,
    })
}

/// Transforms a raw CSV stream into the processed CSV stream.
///
/// The header row is always written, even if no input row qualifies. Row
/// order follows the input. When an ISO code appears more than once, the
/// first qualifying row wins.
///
/// # Errors
///
/// Returns [`PrepareError::MissingColumns`] if the input header lacks a
/// projected column, or [`PrepareError::Csv`] on a malformed row.
pub fn prepare_records<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> Result<PrepareSummary, PrepareError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = RAW_COLUMNS
        .iter()
        .filter(|&&col| !headers.iter().any(|h| h == col))
        .map(|col| (*col).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PrepareError::MissingColumns(missing));
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(RAW_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()))?;

    let mut summary = PrepareSummary::default();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for result in reader.deserialize::<RawRecord>() {
        let raw = result?;
        summary.rows_read += 1;

        let Some(record) = ProcessedRecord::from_raw(raw) else {
            continue;
        };

        if !seen.insert(record.iso_code.clone()) {
            log::warn!(
                "Skipping duplicate row for ISO code {} ({})",
                record.iso_code,
                record.country
            );
            summary.duplicates_skipped += 1;
            continue;
        }

        writer.serialize(&record)?;
        summary.rows_written += 1;
    }

    writer.flush()?;

    log::debug!(
        "Transformed {} raw rows into {} processed rows",
        summary.rows_read,
        summary.rows_written
    );

    Ok(summary)
}

/// Writes `bytes` to a sibling temp file and renames it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        paths::ensure_dir(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, bytes)?;
    std::fs::rename(&tmp_path, path).inspect_err(|_| {
        std::fs::remove_file(&tmp_path).ok();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> String {
        RAW_COLUMNS.join(",")
    }

    /// Builds a raw CSV row with the given identity and metric values, all
    /// other columns empty.
    fn row(country: &str, year: i32, iso: &str, metrics: &[(&str, &str)]) -> String {
        RAW_COLUMNS
            .iter()
            .map(|col| match *col {
                "country" => country.to_string(),
                "year" => year.to_string(),
                "iso_code" => iso.to_string(),
                other => metrics
                    .iter()
                    .find(|(k, _)| *k == other)
                    .map(|(_, v)| (*v).to_string())
                    .unwrap_or_default(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    fn run(input: &str) -> (PrepareSummary, Vec<ProcessedRecord>) {
        let mut out = Vec::new();
        let summary = prepare_records(input.as_bytes(), &mut out).unwrap();
        let records = csv::Reader::from_reader(out.as_slice())
            .deserialize::<ProcessedRecord>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        (summary, records)
    }

    const METRICS: &[(&str, &str)] = &[
        ("population", "1000"),
        ("electricity_demand", "120"),
        ("electricity_generation", "100"),
        ("per_capita_electricity", "5000"),
        ("nuclear_electricity", "0"),
        ("net_elec_imports_share_demand", "-1.5"),
    ];

    #[test]
    fn three_row_input_keeps_only_2022_with_code() {
        let input = [
            header(),
            row("Alpha", 2022, "ALP", METRICS),
            row("Alpha", 2021, "ALP", METRICS),
            row("Beta", 2022, "", METRICS),
        ]
        .join("\n");

        let (summary, records) = run(&input);
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.country, "Alpha");
        assert_eq!(rec.year, 2022);
        assert_eq!(rec.iso_code, "ALP");
        assert_eq!(rec.population, Some(1000.0));
        assert_eq!(rec.electricity_demand_generation_ratio, Some(1.2));
        assert_eq!(rec.electricity_demand_generation_ratio_rating, 5);
        assert_eq!(rec.per_capita_electricity_rating, 1);
        assert_eq!(rec.nuclear_electricity_rating, 1);
        assert_eq!(rec.net_elec_imports_share_demand_rating, 3);
        assert_eq!(rec.risk_sum, 10);
    }

    #[test]
    fn filters_mixed_years_and_missing_codes() {
        let input = [
            header(),
            row("A", 2020, "AAA", METRICS),
            row("B", 2022, "BBB", METRICS),
            row("World", 2022, "", METRICS),
            row("C", 2023, "CCC", METRICS),
            row("D", 2022, "DDD", METRICS),
            row("Europe", 2021, "", METRICS),
        ]
        .join("\n");

        let (_, records) = run(&input);
        let codes: Vec<&str> = records.iter().map(|r| r.iso_code.as_str()).collect();
        assert_eq!(codes, ["BBB", "DDD"]);
        assert!(records.iter().all(|r| r.year == 2022));
    }

    #[test]
    fn extra_input_columns_are_dropped() {
        let input = format!(
            "{},coal_share_elec\n{},42.0",
            header(),
            row("A", 2022, "AAA", METRICS)
        );
        let mut out = Vec::new();
        prepare_records(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert!(!first.contains("coal_share_elec"));
        assert!(first.ends_with("risk_sum"));
    }

    #[test]
    fn duplicate_iso_keeps_first_row() {
        let input = [
            header(),
            row("First", 2022, "DUP", METRICS),
            row("Second", 2022, "DUP", METRICS),
        ]
        .join("\n");

        let (summary, records) = run(&input);
        assert_eq!(summary.duplicates_skipped, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "First");
    }

    #[test]
    fn zero_generation_writes_empty_ratio() {
        let metrics = [("electricity_demand", "5"), ("electricity_generation", "0")];
        let input = [header(), row("A", 2022, "AAA", &metrics)].join("\n");

        let (_, records) = run(&input);
        assert_eq!(records[0].electricity_demand_generation_ratio, None);
        assert_eq!(records[0].electricity_demand_generation_ratio_rating, 0);
    }

    #[test]
    fn header_written_when_nothing_qualifies() {
        let input = [header(), row("A", 2019, "AAA", METRICS)].join("\n");
        let mut out = Vec::new();
        let summary = prepare_records(input.as_bytes(), &mut out).unwrap();
        assert_eq!(summary.rows_written, 0);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("country,year,iso_code"));
    }

    #[test]
    fn missing_columns_are_reported() {
        let input = "country,year,iso_code\nA,2022,AAA\n";
        let err = prepare_records(input.as_bytes(), Vec::new()).unwrap_err();
        match err {
            PrepareError::MissingColumns(cols) => {
                assert!(cols.contains(&"population".to_string()));
                assert!(cols.contains(&"wind_electricity".to_string()));
                assert!(!cols.contains(&"country".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("energy_risk_prepare_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = temp_dir();
        let config = PrepareConfig {
            input: dir.join("absent.csv"),
            output: dir.join("out").join("processed.csv"),
        };

        let outcome = prepare(&config).unwrap();
        assert_eq!(
            outcome,
            PrepareOutcome::InputNotFound {
                path: config.input.clone()
            }
        );
        assert!(!config.output.exists());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn rerun_produces_identical_output() {
        let dir = temp_dir();
        let input = [
            header(),
            row("A", 2022, "AAA", METRICS),
            row("B", 2022, "BBB", &[("gdp", "123456789.5"), ("nuclear_electricity", "7.25")]),
        ]
        .join("\n");
        let config = PrepareConfig {
            input: dir.join("raw.csv"),
            output: dir.join("processed").join("data_preparation.csv"),
        };
        std::fs::write(&config.input, input).unwrap();

        let first = prepare(&config).unwrap();
        let first_bytes = std::fs::read(&config.output).unwrap();
        let second = prepare(&config).unwrap();
        let second_bytes = std::fs::read(&config.output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
        assert!(matches!(
            first,
            PrepareOutcome::Written { summary: PrepareSummary { rows_written: 2, .. }, .. }
        ));

        std::fs::remove_dir_all(dir).ok();
    }
}
