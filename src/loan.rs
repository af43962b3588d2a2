use crate::error::{LoanError, Result};
use crate::memory::{CalculationRecord, Store};
use chrono::NaiveDate;
use log::{info, trace};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const DAYS_PER_YEAR: f64 = 365.;

// whole numbers are written without a fraction, e.g. `100000` rather than `100000.0`
fn whole_or_fraction<S: Serializer>(value: &f64, s: S) -> std::result::Result<S::Ok, S::Error> {
    if value.fract() == 0. && value.abs() < 9.0e15 {
        s.serialize_i64(*value as i64)
    } else {
        s.serialize_f64(*value)
    }
}

// rates are annual percentages, 5.0 = 5%
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    #[serde(serialize_with = "whole_or_fraction")]
    pub loan_amount: f64,
    pub currency: String,
    #[serde(serialize_with = "whole_or_fraction")]
    pub base_rate: f64,
    #[serde(serialize_with = "whole_or_fraction")]
    pub margin_rate: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanInput {
    pub fn new(
        loan_amount: f64,
        currency: &str,
        base_rate: f64,
        margin_rate: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            loan_amount,
            currency: currency.to_string(),
            base_rate,
            margin_rate,
            start_date,
            end_date,
        }
    }

    // the date range is checked by generate
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.loan_amount) {
            return Err(LoanError::Validation(
                "Loan amount must be a positive number.".to_string(),
            ));
        }
        if !is_currency_code(&self.currency) {
            return Err(LoanError::Validation(
                "Currency must be a valid 3-letter ISO code.".to_string(),
            ));
        }
        if !is_positive(self.base_rate) {
            return Err(LoanError::Validation(
                "Base rate must be a positive number.".to_string(),
            ));
        }
        if !is_positive(self.margin_rate) {
            return Err(LoanError::Validation(
                "Margin rate must be a positive number.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn daily_interest_no_margin(&self) -> f64 {
        (self.loan_amount * (self.base_rate / 100.)) / DAYS_PER_YEAR
    }

    pub fn daily_interest_total(&self) -> f64 {
        (self.loan_amount * ((self.base_rate + self.margin_rate) / 100.)) / DAYS_PER_YEAR
    }
}

impl fmt::Display for LoanInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}% + {}% margin, {} to {}",
            self.loan_amount,
            self.currency,
            self.base_rate,
            self.margin_rate,
            self.start_date,
            self.end_date
        )
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualRow {
    pub accrual_date: NaiveDate,
    pub days_elapsed: u32,
    #[serde(serialize_with = "whole_or_fraction")]
    pub daily_interest_no_margin: f64,
    #[serde(serialize_with = "whole_or_fraction")]
    pub daily_interest_total: f64,
    #[serde(serialize_with = "whole_or_fraction")]
    pub total_interest_accrued: f64,
}

impl fmt::Display for AccrualRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date {}, day {}, daily interest {:.2}, with margin {:.2}, accrued {:.2}",
            self.accrual_date,
            self.days_elapsed,
            self.daily_interest_no_margin,
            self.daily_interest_total,
            self.total_interest_accrued
        )
    }
}

pub fn whole_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Build the daily accrual schedule, one row per day in `[start_date, end_date)`.
///
/// Interest is simple actual/365: every row carries the same daily amounts and
/// `total_interest_accrued` is the daily total times the days elapsed.
pub fn generate(input: &LoanInput) -> Result<Vec<AccrualRow>> {
    if input.end_date <= input.start_date {
        return Err(LoanError::InvalidRange {
            start: input.start_date,
            end: input.end_date,
        });
    }

    let daily_no_margin = input.daily_interest_no_margin();
    let daily_total = input.daily_interest_total();
    let total_days = whole_days_between(input.start_date, input.end_date);

    let mut rows = Vec::with_capacity(total_days as usize);
    for (accrual_date, days_elapsed) in input
        .start_date
        .iter_days()
        .take(total_days as usize)
        .zip(1u32..)
    {
        let row = AccrualRow {
            accrual_date,
            days_elapsed,
            daily_interest_no_margin: daily_no_margin,
            daily_interest_total: daily_total,
            total_interest_accrued: daily_total * days_elapsed as f64,
        };
        trace!("{}", row);
        rows.push(row);
    }
    Ok(rows)
}

/// Generate the schedule for `input` and pair it with the inputs, without storing it.
pub fn schedule(input: LoanInput) -> Result<CalculationRecord> {
    let table_data = generate(&input)?;
    Ok(CalculationRecord { input, table_data })
}

pub fn calculate(store: &Store, input: LoanInput) -> Result<CalculationRecord> {
    let record = schedule(input)?;
    store.append(record.clone())?;
    info!(
        "stored calculation for {} ({} days)",
        record.input,
        record.table_data.len()
    );
    Ok(record)
}

pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.
}

#[cfg(test)]
mod tests {
    use super::{generate, is_currency_code, whole_days_between, LoanInput};
    use crate::error::LoanError;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use test_log::test;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_loan(start: NaiveDate, end: NaiveDate) -> LoanInput {
        LoanInput::new(100000., "USD", 5., 2., start, end)
    }

    #[test]
    fn test_three_day_schedule() {
        let rows = generate(&sample_loan(date(2024, 1, 1), date(2024, 1, 4))).unwrap();

        assert_eq!(rows.len(), 3);
        assert_relative_eq!(rows[0].daily_interest_no_margin, 13.698630136986301, max_relative = 1e-12);
        assert_relative_eq!(rows[0].daily_interest_total, 19.17808219178082, max_relative = 1e-12);

        let last = &rows[2];
        assert_eq!(last.accrual_date, date(2024, 1, 3));
        assert_eq!(last.days_elapsed, 3);
        assert_relative_eq!(last.total_interest_accrued, 57.534246575342465, max_relative = 1e-12);
        assert_eq!(
            last.to_string(),
            "date 2024-01-03, day 3, daily interest 13.70, with margin 19.18, accrued 57.53"
        );
    }

    #[test]
    fn test_rows_are_contiguous() {
        let start = date(2023, 12, 20);
        let end = date(2024, 3, 15);
        let rows = generate(&sample_loan(start, end)).unwrap();

        assert_eq!(rows.len() as i64, whole_days_between(start, end));
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.days_elapsed as usize, i + 1);
            assert_eq!(
                row.accrual_date,
                start.checked_add_days(chrono::Days::new(i as u64)).unwrap()
            );
            assert_eq!(row.daily_interest_no_margin, rows[0].daily_interest_no_margin);
            assert_eq!(row.daily_interest_total, rows[0].daily_interest_total);
            assert_eq!(
                row.total_interest_accrued,
                row.daily_interest_total * row.days_elapsed as f64
            );
        }
    }

    #[test]
    fn test_leap_day_is_a_row() {
        let rows = generate(&sample_loan(date(2024, 2, 28), date(2024, 3, 2))).unwrap();

        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.accrual_date).collect();
        assert_eq!(dates, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn test_dst_change_does_not_skew_day_count() {
        // US and EU clock changes fall inside these ranges
        assert_eq!(whole_days_between(date(2024, 3, 9), date(2024, 3, 12)), 3);
        assert_eq!(whole_days_between(date(2024, 10, 26), date(2024, 10, 28)), 2);
    }

    #[test]
    fn test_single_day() {
        let rows = generate(&sample_loan(date(2024, 5, 1), date(2024, 5, 2))).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].days_elapsed, 1);
        assert_eq!(rows[0].total_interest_accrued, rows[0].daily_interest_total);
    }

    #[test]
    fn test_invalid_range() {
        let same = generate(&sample_loan(date(2024, 1, 1), date(2024, 1, 1)));
        assert!(matches!(same, Err(LoanError::InvalidRange { .. })));

        let reversed = generate(&sample_loan(date(2024, 1, 4), date(2024, 1, 1)));
        match reversed {
            Err(LoanError::InvalidRange { start, end }) => {
                assert_eq!(start, date(2024, 1, 4));
                assert_eq!(end, date(2024, 1, 1));
            }
            other => panic!("expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_validate() {
        let good = sample_loan(date(2024, 1, 1), date(2024, 1, 4));
        assert!(good.validate().is_ok());

        let mut bad = good.clone();
        bad.loan_amount = 0.;
        assert!(matches!(bad.validate(), Err(LoanError::Validation(_))));

        let mut bad = good.clone();
        bad.currency = "usd".to_string();
        assert!(matches!(bad.validate(), Err(LoanError::Validation(_))));

        let mut bad = good.clone();
        bad.margin_rate = -1.;
        assert!(matches!(bad.validate(), Err(LoanError::Validation(_))));

        let mut bad = good;
        bad.base_rate = f64::NAN;
        assert!(matches!(bad.validate(), Err(LoanError::Validation(_))));
    }

    #[test]
    fn test_currency_code() {
        assert!(is_currency_code("EUR"));
        assert!(!is_currency_code("EU"));
        assert!(!is_currency_code("EURO"));
        assert!(!is_currency_code("Eur"));
        assert!(!is_currency_code("E1R"));
    }

    #[test]
    fn test_json_field_names() {
        let input = sample_loan(date(2024, 1, 1), date(2024, 1, 4));
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["loanAmount"], 100000.);
        assert_eq!(json["marginRate"], 2.);
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endDate"], "2024-01-04");
    }

    #[test]
    fn test_whole_numbers_written_without_fraction() {
        let input = sample_loan(date(2024, 1, 1), date(2024, 1, 4));
        let text = serde_json::to_string(&input).unwrap();
        assert!(text.contains(r#""loanAmount":100000,"#));
        assert!(text.contains(r#""baseRate":5,"#));

        let mut fractional = input;
        fractional.margin_rate = 2.25;
        let text = serde_json::to_string(&fractional).unwrap();
        assert!(text.contains(r#""marginRate":2.25,"#));
    }

    #[test]
    fn test_schedule_near_max_date() {
        let end = NaiveDate::MAX;
        let start = end.pred_opt().unwrap().pred_opt().unwrap();
        let rows = generate(&sample_loan(start, end)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].accrual_date, end.pred_opt().unwrap());
    }
}
