use crate::error::{LoanError, Result};
use crate::loan;
use crate::memory::{CalculationRecord, LoanUpdate, Store};
use crate::prompt::LoanPrompter;
use crate::table::{record_label, render_table};
use std::io::Write;

const NO_ENTRIES: &str = "No entries found.";

fn labels(records: &[CalculationRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| record_label(i, r))
        .collect()
}

// the table is printed before the store is written so a write failure still shows it
pub fn calculate(
    store: &Store,
    prompter: &mut dyn LoanPrompter,
    out: &mut dyn Write,
) -> Result<()> {
    let input = prompter.loan_input(None)?;
    let record = loan::schedule(input)?;
    write!(out, "{}", render_table(&record.table_data))?;
    store.append(record)?;
    Ok(())
}

pub fn view(
    store: &Store,
    prompter: &mut dyn LoanPrompter,
    out: &mut dyn Write,
) -> Result<()> {
    let records = store.read_all();
    if records.is_empty() {
        writeln!(out, "{}", NO_ENTRIES)?;
        return Ok(());
    }

    let index = prompter.select_record(&labels(&records))?;
    let record = records.get(index).ok_or(LoanError::RecordNotFound(index))?;
    write!(out, "{}", render_table(&record.table_data))?;
    Ok(())
}

pub fn update(
    store: &Store,
    prompter: &mut dyn LoanPrompter,
    out: &mut dyn Write,
) -> Result<()> {
    let records = store.read_all();
    if records.is_empty() {
        writeln!(out, "{}", NO_ENTRIES)?;
        return Ok(());
    }

    let index = prompter.select_record(&labels(&records))?;
    let current = records.get(index).ok_or(LoanError::RecordNotFound(index))?;
    let input = prompter.loan_input(Some(&current.input))?;

    store.update(index, LoanUpdate::from(input))?;
    writeln!(out, "Entry updated successfully.")?;
    Ok(())
}

pub fn clear(store: &Store, out: &mut dyn Write) -> Result<()> {
    store.clear()?;
    writeln!(out, "Memory cleared successfully.")?;
    Ok(())
}
