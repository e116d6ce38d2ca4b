use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ClassifierError;
use crate::storage::write_atomic;

/// One training example: `label` is `1` for fake, `0` for real.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledRow {
    pub text: String,
    pub label: u8,
}

impl LabeledRow {
    pub fn new(text: impl Into<String>, label: u8) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    text: String,
    label: String,
}

/// Tiny bootstrap corpus written when no training file exists yet.
pub fn seed_dataset() -> Vec<LabeledRow> {
    vec![
        LabeledRow::new("The government confirmed new policy today", 0),
        LabeledRow::new("Celebrity endorses miracle cure — click to buy!", 1),
        LabeledRow::new("Research shows improved results in trials", 0),
        LabeledRow::new("Shocking: vaccine causes instant harm!", 1),
    ]
}

/// Reads a `text,label` CSV. Labels must be exactly `0` or `1`.
pub fn read_training_csv(path: &Path) -> Result<Vec<LabeledRow>, ClassifierError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for (idx, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = record?;
        let label = match record.label.trim() {
            "0" => 0,
            "1" => 1,
            other => {
                return Err(ClassifierError::InvalidLabel {
                    row: idx + 1,
                    label: other.to_string(),
                });
            }
        };
        rows.push(LabeledRow::new(record.text, label));
    }

    info!(path = %path.display(), rows = rows.len(), "Loaded training data");
    Ok(rows)
}

/// Writes rows as a `text,label` CSV (atomically).
pub fn write_training_csv(path: &Path, rows: &[LabeledRow]) -> Result<(), ClassifierError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ClassifierError::Csv(e.into_error().into()))?;

    write_atomic(path, &bytes)?;
    Ok(())
}

/// Reads the training CSV, first writing the seed corpus if it is missing.
pub fn load_or_seed(path: &Path) -> Result<Vec<LabeledRow>, ClassifierError> {
    if !path.exists() {
        warn!(path = %path.display(), "Training data missing, writing seed dataset");
        write_training_csv(path, &seed_dataset())?;
    }
    read_training_csv(path)
}
