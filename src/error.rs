use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum LoanError {
    #[error("End Date must be after Start Date. (start {start}, end {end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No calculation stored at entry #{}", .0 + 1)]
    RecordNotFound(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}

pub type Result<T> = std::result::Result<T, LoanError>;
