//! Read-only in-memory copy of the processed energy table.
//!
//! Loaded once at startup and shared by every request. Nothing mutates a
//! [`Dataset`] after construction.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use energy_risk_models::ProcessedRecord;
use thiserror::Error;

/// Errors loading the processed table.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The processed CSV does not exist. Run the preparation step first.
    #[error("Processed data not found at {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The same ISO code appears on more than one row.
    #[error("Duplicate ISO code in processed data: {0}")]
    DuplicateIsoCode(String),
}

/// The processed table with an ISO code index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ProcessedRecord>,
    index: BTreeMap<String, usize>,
}

impl Dataset {
    /// Loads the processed CSV at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NotFound`] if the file is absent, or another
    /// [`DatasetError`] if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DatasetError::NotFound(path.to_path_buf())
            } else {
                DatasetError::Io(e)
            }
        })?;

        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        log::info!(
            "Loaded {} countries from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parses a processed CSV stream.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] on a malformed row or
    /// [`DatasetError::DuplicateIsoCode`] if an ISO code repeats.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let records = csv::Reader::from_reader(reader)
            .deserialize::<ProcessedRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    /// Builds a dataset from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateIsoCode`] if an ISO code repeats.
    pub fn from_records(records: Vec<ProcessedRecord>) -> Result<Self, DatasetError> {
        let mut index = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.iso_code.clone(), i).is_some() {
                return Err(DatasetError::DuplicateIsoCode(record.iso_code.clone()));
            }
        }
        Ok(Self { records, index })
    }

    /// Looks up a country by ISO code.
    #[must_use]
    pub fn get(&self, iso_code: &str) -> Option<&ProcessedRecord> {
        self.index.get(iso_code).map(|&i| &self.records[i])
    }

    /// All records, in file order.
    #[must_use]
    pub fn records(&self) -> &[ProcessedRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed minimum and maximum `risk_sum`, or `None` if empty.
    #[must_use]
    pub fn risk_range(&self) -> Option<(u8, u8)> {
        let min = self.records.iter().map(|r| r.risk_sum).min()?;
        let max = self.records.iter().map(|r| r.risk_sum).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use energy_risk_models::{RawRecord, TARGET_YEAR};

    use super::*;

    fn record(iso: &str, nuclear: f64) -> ProcessedRecord {
        ProcessedRecord::from_raw(RawRecord {
            country: format!("Country {iso}"),
            year: TARGET_YEAR,
            iso_code: Some(iso.to_string()),
            per_capita_electricity: Some(4_000.0),
            nuclear_electricity: Some(nuclear),
            net_elec_imports_share_demand: Some(1.0),
            ..RawRecord::default()
        })
        .unwrap()
    }

    #[test]
    fn lookup_by_iso_code() {
        let dataset = Dataset::from_records(vec![record("AAA", 0.0), record("BBB", 1.0)]).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("BBB").unwrap().country, "Country BBB");
        assert!(dataset.get("ZZZ").is_none());
    }

    #[test]
    fn risk_range_spans_observed_values() {
        let dataset = Dataset::from_records(vec![record("AAA", 0.0), record("BBB", 1.0)]).unwrap();
        assert_eq!(dataset.risk_range(), Some((2, 4)));
        assert!(!dataset.is_empty());
        assert_eq!(Dataset::default().risk_range(), None);
        assert!(Dataset::default().is_empty());
    }

    #[test]
    fn duplicate_iso_code_is_rejected() {
        let err = Dataset::from_records(vec![record("AAA", 0.0), record("AAA", 1.0)]).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateIsoCode(code) if code == "AAA"));
    }

    #[test]
    fn reads_processed_csv() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(record("AAA", 0.0)).unwrap();
        writer.serialize(record("BBB", 2.0)).unwrap();
        let bytes = writer.into_inner().unwrap();

        let dataset = Dataset::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(dataset.records()[1], record("BBB", 2.0));
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = std::env::temp_dir().join(format!("energy_risk_{}.csv", uuid::Uuid::new_v4()));
        let err = Dataset::load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(p) if p == path));
    }
}
