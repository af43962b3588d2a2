use crate::loan::AccrualRow;
use crate::memory::CalculationRecord;

pub const HEADERS: [&str; 5] = [
    "Accrual Date",
    "Days Elapsed",
    "Daily Interest (No Margin)",
    "Daily Interest (With Margin)",
    "Total Interest Accrued",
];

fn cells(row: &AccrualRow) -> [String; 5] {
    [
        row.accrual_date.to_string(),
        row.days_elapsed.to_string(),
        format!("{:.2}", row.daily_interest_no_margin),
        format!("{:.2}", row.daily_interest_total),
        format!("{:.2}", row.total_interest_accrued),
    ]
}

pub fn render_table(rows: &[AccrualRow]) -> String {
    let body: Vec<[String; 5]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(str::len);
    for line in &body {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:<w$}", h))
        .collect();
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for line in &body {
        // the date column is left aligned, numbers are right aligned
        let formatted: Vec<String> = line
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                if i == 0 {
                    format!("{:<w$}", cell)
                } else {
                    format!("{:>w$}", cell)
                }
            })
            .collect();
        out.push_str(&formatted.join(" | "));
        out.push('\n');
    }
    out
}

pub fn record_label(index: usize, record: &CalculationRecord) -> String {
    format!(
        "Entry #{}: {} {}",
        index + 1,
        record.input.loan_amount,
        record.input.currency
    )
}
