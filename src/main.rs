use clap::{Parser, Subcommand};
use loan_interest::commands;
use loan_interest::config;
use loan_interest::prompt::InquirePrompter;
use loan_interest::{LoanError, Store};
use log::debug;
use simple_logger::SimpleLogger;
use std::io;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "loan-interest-calculator", version, about = "Loan Interest Calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy, Debug)]
enum Command {
    /// Calculate the loan interest
    Calculate,
    /// View memory entries
    #[command(name = "memory:view")]
    MemoryView,
    /// Update a memory entry
    #[command(name = "memory:update")]
    MemoryUpdate,
    /// Clear all memory entries
    #[command(name = "memory:clear")]
    MemoryClear,
}

fn main() -> ExitCode {
    // RUST_LOG overrides the default level
    if let Err(e) = SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("could not start logger: {}", e);
    }

    let cli = Cli::parse();
    let store = Store::new(config::memory_path());
    debug!("using memory file {}", store.path().display());

    let mut prompter = InquirePrompter;
    let mut out = io::stdout();

    let result = match cli.command {
        Command::Calculate => commands::calculate(&store, &mut prompter, &mut out),
        Command::MemoryView => commands::view(&store, &mut prompter, &mut out),
        Command::MemoryUpdate => commands::update(&store, &mut prompter, &mut out),
        Command::MemoryClear => commands::clear(&store, &mut out),
    };

    ExitCode::from(report(cli.command, result))
}

// only a bad date range fails the process; other errors are printed and exit 0
fn report(command: Command, result: loan_interest::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(LoanError::InvalidRange { .. }) => {
            eprintln!("End Date must be after Start Date.");
            1
        }
        Err(e) => {
            eprintln!("{}", failure_message(command, &e));
            0
        }
    }
}

fn failure_message(command: Command, e: &LoanError) -> String {
    match command {
        Command::Calculate => format!("Error during calculation: {}", e),
        _ => format!("Error reading memory: {}", e),
    }
}

// store handles and records can cross threads
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<loan_interest::CalculationRecord>();
    is_normal::<Store>();
}

#[test]
fn cli_shape() {
    use clap::CommandFactory;
    Cli::command().debug_assert();

    let cli = Cli::try_parse_from(["loan-interest-calculator", "memory:view"]).unwrap();
    assert!(matches!(cli.command, Command::MemoryView));
}

#[test]
fn failure_messages() {
    let e = LoanError::RecordNotFound(0);
    assert_eq!(
        failure_message(Command::Calculate, &e),
        "Error during calculation: No calculation stored at entry #1"
    );
    assert_eq!(
        failure_message(Command::MemoryClear, &e),
        "Error reading memory: No calculation stored at entry #1"
    );
}

#[test]
fn exit_status() {
    use chrono::NaiveDate;
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    assert_eq!(report(Command::Calculate, Ok(())), 0);
    assert_eq!(
        report(
            Command::Calculate,
            Err(LoanError::InvalidRange { start: day, end: day })
        ),
        1
    );
    let write_failure = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    assert_eq!(report(Command::Calculate, Err(write_failure.into())), 0);
    assert_eq!(
        report(Command::MemoryUpdate, Err(LoanError::RecordNotFound(4))),
        0
    );
}
