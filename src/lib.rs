pub mod commands;
pub mod config;
pub mod error;
pub mod loan;
pub mod memory;
pub mod prompt;
pub mod table;

pub use error::{LoanError, Result};
pub use loan::{calculate, generate, AccrualRow, LoanInput};
pub use memory::{CalculationRecord, LoanUpdate, Store};
