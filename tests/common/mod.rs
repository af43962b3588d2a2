//! Shared fixtures for the store and command tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use loan_interest::prompt::LoanPrompter;
use loan_interest::{LoanInput, Result, Store};
use std::collections::VecDeque;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_input() -> LoanInput {
    LoanInput::new(100000., "USD", 5., 2., date(2024, 1, 1), date(2024, 1, 4))
}

/// A `Store` in a fresh temporary directory. Keep the `TempDir` alive for the test.
pub fn temp_store() -> (Store, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("memory.json"));
    (store, dir)
}

/// Replays canned answers and records the defaults it was offered.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub inputs: VecDeque<LoanInput>,
    pub selections: VecDeque<usize>,
    pub offered_defaults: Vec<Option<LoanInput>>,
    pub offered_labels: Vec<Vec<String>>,
}

impl LoanPrompter for ScriptedPrompter {
    fn loan_input(&mut self, defaults: Option<&LoanInput>) -> Result<LoanInput> {
        self.offered_defaults.push(defaults.cloned());
        Ok(self.inputs.pop_front().expect("no scripted loan input left"))
    }

    fn select_record(&mut self, labels: &[String]) -> Result<usize> {
        self.offered_labels.push(labels.to_vec());
        Ok(self.selections.pop_front().expect("no scripted selection left"))
    }
}
