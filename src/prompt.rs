use crate::error::Result;
use crate::loan::{is_currency_code, LoanInput};
use chrono::NaiveDate;
use inquire::validator::Validation;
use inquire::{CustomType, Select, Text};

/// Source of user input for the commands. Returned values already pass field
/// validation; the date range is left to `generate`.
pub trait LoanPrompter {
    fn loan_input(&mut self, defaults: Option<&LoanInput>) -> Result<LoanInput>;

    fn select_record(&mut self, labels: &[String]) -> Result<usize>;
}

#[derive(Default)]
pub struct InquirePrompter;

impl LoanPrompter for InquirePrompter {
    fn loan_input(&mut self, defaults: Option<&LoanInput>) -> Result<LoanInput> {
        let (amount_msg, currency_msg, base_msg, margin_msg, start_msg, end_msg) = match defaults {
            Some(d) => (
                format!("Loan amount ({}):", d.loan_amount),
                format!("Currency ({}):", d.currency),
                format!("Base rate ({}):", d.base_rate),
                format!("Margin rate ({}):", d.margin_rate),
                format!("Start date ({}):", d.start_date),
                format!("End date ({}):", d.end_date),
            ),
            None => (
                "Enter the loan amount:".to_string(),
                "Enter the currency (e.g., USD, EUR):".to_string(),
                "Enter the annual interest rate (%):".to_string(),
                "Enter the margin rate (%):".to_string(),
                "Enter the start date (YYYY-MM-DD):".to_string(),
                "Enter the end date (YYYY-MM-DD):".to_string(),
            ),
        };

        let loan_amount = positive_number(
            &amount_msg,
            defaults.map(|d| d.loan_amount),
            "Loan amount must be a positive number.",
        )?;
        let currency = currency_code(&currency_msg, defaults.map(|d| d.currency.as_str()))?;
        let base_rate = positive_number(
            &base_msg,
            defaults.map(|d| d.base_rate),
            "Base rate must be a positive number.",
        )?;
        let margin_rate = positive_number(
            &margin_msg,
            defaults.map(|d| d.margin_rate),
            "Margin rate must be a positive number.",
        )?;
        let start_date = date(
            &start_msg,
            defaults.map(|d| d.start_date),
            "Start date must be a valid date in YYYY-MM-DD format.",
        )?;
        let end_date = date(
            &end_msg,
            defaults.map(|d| d.end_date),
            "End date must be a valid date in YYYY-MM-DD format.",
        )?;

        Ok(LoanInput {
            loan_amount,
            currency,
            base_rate,
            margin_rate,
            start_date,
            end_date,
        })
    }

    fn select_record(&mut self, labels: &[String]) -> Result<usize> {
        let choice = Select::new("Select an entry to view", labels.to_vec()).raw_prompt()?;
        Ok(choice.index)
    }
}

fn positive_number(message: &str, default: Option<f64>, error: &'static str) -> Result<f64> {
    let mut prompt = CustomType::<f64>::new(message)
        .with_error_message(error)
        .with_validator(move |v: &f64| {
            if v.is_finite() && *v > 0. {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(error.into()))
            }
        });
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }
    Ok(prompt.prompt()?)
}

fn currency_code(message: &str, default: Option<&str>) -> Result<String> {
    let mut prompt = Text::new(message).with_validator(|input: &str| {
        if is_currency_code(input) {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid(
                "Currency must be a valid 3-letter ISO code.".into(),
            ))
        }
    });
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }
    Ok(prompt.prompt()?)
}

fn date(message: &str, default: Option<NaiveDate>, error: &'static str) -> Result<NaiveDate> {
    let mut prompt = CustomType::<NaiveDate>::new(message)
        .with_placeholder("YYYY-MM-DD")
        .with_error_message(error);
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }
    Ok(prompt.prompt()?)
}
