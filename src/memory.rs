use crate::error::{LoanError, Result};
use crate::loan::{AccrualRow, LoanInput};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    #[serde(flatten)]
    pub input: LoanInput,
    pub table_data: Vec<AccrualRow>,
}

// `None` keeps the current value
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LoanUpdate {
    pub loan_amount: Option<f64>,
    pub currency: Option<String>,
    pub base_rate: Option<f64>,
    pub margin_rate: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl LoanUpdate {
    fn apply(self, input: &mut LoanInput) {
        if let Some(v) = self.loan_amount {
            input.loan_amount = v;
        }
        if let Some(v) = self.currency {
            input.currency = v;
        }
        if let Some(v) = self.base_rate {
            input.base_rate = v;
        }
        if let Some(v) = self.margin_rate {
            input.margin_rate = v;
        }
        if let Some(v) = self.start_date {
            input.start_date = v;
        }
        if let Some(v) = self.end_date {
            input.end_date = v;
        }
    }
}

impl From<LoanInput> for LoanUpdate {
    fn from(input: LoanInput) -> Self {
        Self {
            loan_amount: Some(input.loan_amount),
            currency: Some(input.currency),
            base_rate: Some(input.base_rate),
            margin_rate: Some(input.margin_rate),
            start_date: Some(input.start_date),
            end_date: Some(input.end_date),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // missing, unreadable or unparsable files all read as an empty log
    pub fn read_all(&self) -> Vec<CalculationRecord> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no memory file at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Error reading memory file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(e) => {
                warn!("Error parsing memory file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    // no temp file and no lock: a crash mid-write can truncate the log
    pub fn write_all(&self, records: &[CalculationRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        debug!(
            "wrote {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn append(&self, record: CalculationRecord) -> Result<()> {
        let mut records = self.read_all();
        records.push(record);
        self.write_all(&records)
    }

    // the schedule is not recomputed
    pub fn update(&self, index: usize, update: LoanUpdate) -> Result<CalculationRecord> {
        let mut records = self.read_all();
        let record = records
            .get_mut(index)
            .ok_or(LoanError::RecordNotFound(index))?;
        update.apply(&mut record.input);
        let updated = record.clone();
        self.write_all(&records)?;
        info!("updated entry #{}: {}", index + 1, updated.input);
        Ok(updated)
    }

    pub fn clear(&self) -> Result<()> {
        self.write_all(&[])?;
        info!("cleared {}", self.path.display());
        Ok(())
    }
}
