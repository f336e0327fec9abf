//! Historical yield records and the validated dataset that holds them.

use crate::error::ForecastError;
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Year and month a record was observed in. Display and grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Month,
}

impl Period {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

/// Explanatory attributes carried alongside a record.
///
/// These are shown next to the series but the blending step never reads them;
/// only the presence of a factor in the selection matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFeatures {
    pub fat_percent: f64,
    pub protein_percent: f64,
    pub somatic_cell_count: f64,
    pub herd_size: f64,
    /// Sine encoding of the month.
    pub season_sin: f64,
    /// Cosine encoding of the month.
    pub season_cos: f64,
}

impl RecordFeatures {
    fn values(&self) -> [(&'static str, f64); 6] {
        [
            ("fat_percent", self.fat_percent),
            ("protein_percent", self.protein_percent),
            ("somatic_cell_count", self.somatic_cell_count),
            ("herd_size", self.herd_size),
            ("season_sin", self.season_sin),
            ("season_cos", self.season_cos),
        ]
    }
}

/// One historical observation: measured yield vs. the reference model's yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub period: Period,
    pub measured_outcome: f64,
    pub reference_outcome: f64,
    pub features: RecordFeatures,
}

impl Record {
    fn validate(&self, index: usize) -> Result<(), ForecastError> {
        if !self.measured_outcome.is_finite() || self.measured_outcome <= 0.0 {
            return Err(ForecastError::dataset(format!(
                "record {index} ({}) has non-positive measured outcome {}",
                self.period, self.measured_outcome
            )));
        }
        if !self.reference_outcome.is_finite() || self.reference_outcome <= 0.0 {
            return Err(ForecastError::dataset(format!(
                "record {index} ({}) has non-positive reference outcome {}",
                self.period, self.reference_outcome
            )));
        }
        if let Some((name, value)) = self
            .features
            .values()
            .into_iter()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ForecastError::dataset(format!(
                "record {index} ({}) has non-finite feature {name} = {value}",
                self.period
            )));
        }
        Ok(())
    }
}

/// Validated, immutable collection of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Validate and wrap a set of records.
    ///
    /// Rejects an empty set and any record whose measured or reference outcome
    /// is not a positive finite number.
    pub fn new(records: Vec<Record>) -> Result<Self, ForecastError> {
        if records.is_empty() {
            return Err(ForecastError::dataset("dataset contains no records"));
        }
        for (index, record) in records.iter().enumerate() {
            if let Err(err) = record.validate(index) {
                tracing::warn!(index, error = %err, "Rejected dataset record");
                return Err(err);
            }
        }
        Ok(Self { records })
    }

    /// Wrap records that are known to be valid, such as the built-in sample.
    pub(crate) fn from_trusted(records: Vec<Record>) -> Self {
        debug_assert!(Self::new(records.clone()).is_ok());
        Self { records }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, ForecastError> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a JSON array of records from disk.
    pub fn from_json_path(path: &Path) -> Result<Self, ForecastError> {
        let content = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), records = dataset.len(), "Loaded dataset");
        Ok(dataset)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean of the measured outcomes.
    pub fn mean_measured(&self) -> f64 {
        let sum: f64 = self.records.iter().map(|r| r.measured_outcome).sum();
        sum / self.records.len() as f64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(year: i32, month: Month, measured: f64, reference: f64) -> Record {
        Record {
            period: Period::new(year, month),
            measured_outcome: measured,
            reference_outcome: reference,
            features: RecordFeatures {
                fat_percent: 4.1,
                protein_percent: 3.4,
                somatic_cell_count: 180.0,
                herd_size: 420.0,
                season_sin: 0.5,
                season_cos: 0.87,
            },
        }
    }

    #[test]
    fn test_valid_dataset() {
        let ds = Dataset::new(vec![
            record(2023, Month::January, 70000.0, 69000.0),
            record(2023, Month::February, 65000.0, 66000.0),
        ])
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert!((ds.mean_measured() - 67500.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_measured_outcome_rejected() {
        let err = Dataset::new(vec![
            record(2023, Month::January, 70000.0, 69000.0),
            record(2023, Month::February, 0.0, 66000.0),
        ])
        .unwrap_err();
        assert!(matches!(err, ForecastError::Dataset(_)));
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_negative_reference_rejected() {
        let err = Dataset::new(vec![record(2023, Month::March, 70000.0, -1.0)]).unwrap_err();
        assert!(matches!(err, ForecastError::Dataset(_)));
    }

    #[test]
    fn test_non_finite_feature_rejected() {
        let mut bad = record(2023, Month::April, 70000.0, 69000.0);
        bad.features.herd_size = f64::NAN;
        let err = Dataset::new(vec![bad]).unwrap_err();
        assert!(err.to_string().contains("herd_size"));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(Dataset::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[{
            "period": {"year": 2023, "month": "March"},
            "measured_outcome": 71388.0,
            "reference_outcome": 49541.0,
            "features": {
                "fat_percent": 4.2, "protein_percent": 3.3,
                "somatic_cell_count": 190.0, "herd_size": 410.0,
                "season_sin": 1.0, "season_cos": 0.0
            }
        }]"#;
        let ds = Dataset::from_json_str(json).unwrap();
        assert_eq!(ds.records()[0].period, Period::new(2023, Month::March));
        assert_eq!(ds.records()[0].period.to_string(), "March 2023");
    }

    #[test]
    fn test_from_json_rejects_zero_measured() {
        let json = r#"[{
            "period": {"year": 2023, "month": "May"},
            "measured_outcome": 0.0,
            "reference_outcome": 49541.0,
            "features": {
                "fat_percent": 4.2, "protein_percent": 3.3,
                "somatic_cell_count": 190.0, "herd_size": 410.0,
                "season_sin": 0.5, "season_cos": -0.87
            }
        }]"#;
        assert!(matches!(
            Dataset::from_json_str(json),
            Err(ForecastError::Dataset(_))
        ));
    }
}
