use std::fs::File;
use std::io::{stderr, stdout, BufReader, BufWriter};
use std::process::exit;
use std::time::Instant;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use ledger_meta_parser::models::BalanceAction;
use ledger_meta_parser::TransactionFacts;

/// One output row per balance change.
#[derive(Debug, Serialize)]
struct BalanceRecord<'a> {
    hash: &'a str,
    #[serde(rename = "type")]
    transaction_type: &'a str,
    result: &'a str,
    account: &'a str,
    currency: &'a str,
    issuer: &'a str,
    action: BalanceAction,
    value: &'a str
}

/// Positional arguments: the input path and an optional log level.
struct CliArgs {
    input: String,
    log_level: LevelFilter
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Option<Self> {
        let input = args.nth(1)?;
        let log_level = args.next().map_or(LevelFilter::ERROR, |level| log_level(&level));

        Some(Self { input, log_level })
    }
}

fn main() -> Result<()> {
    let Some(cli) = CliArgs::parse(std::env::args()) else {
        eprintln!("Usage: ledger-meta-parser [input].json [log_level:optional] > [output].csv");
        eprintln!("Available log levels: off, error, warn, info, debug, trace (default: error)");
        exit(1);
    };

    init_stderr_logging(cli.log_level);

    let timer = Instant::now();
    let envelopes = read_envelopes(&cli.input)?;
    let facts: Vec<TransactionFacts> = envelopes.iter()
        .enumerate()
        .filter_map(|(position, envelope)| match TransactionFacts::from_envelope(envelope) {
            Ok(facts) => Some(facts),
            Err(error) => {
                error!("Skipping envelope [{position}]: {error}");
                None
            }
        })
        .collect();
    let duration = timer.elapsed();

    info!("Parsed {} of {} transactions in: {duration:?}", facts.len(), envelopes.len());

    write_results_to_stdout(&facts)?;

    Ok(())
}

fn log_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{name}', using 'error'");
        LevelFilter::ERROR
    })
}

fn init_stderr_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV; log lines on stderr stay plain text so they can be grepped
    let stderr_log = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(stderr_log)
        .init();
}

/// Reads a single envelope or an array of envelopes.
fn read_envelopes(path: &str) -> Result<Vec<Value>> {
    let file = File::open(path).with_context(|| format!("Error opening input at path: {path}"))?;
    let input: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Input at path {path} is not JSON"))?;

    Ok(match input {
        Value::Array(envelopes) => envelopes,
        envelope => vec![envelope]
    })
}

fn write_results_to_stdout(facts: &[TransactionFacts]) -> Result<()> {
    //NOTE: The header is written explicitly so an input without balance changes still yields one
    let mut output = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(stdout().lock()));

    output.write_record(["hash", "type", "result", "account", "currency", "issuer", "action", "value"])?;

    for transaction in facts {
        for change in &transaction.balance_changes {
            output.serialize(BalanceRecord {
                hash: transaction.hash.as_deref().unwrap_or_default(),
                transaction_type: transaction.transaction_type.as_str(),
                result: &transaction.result.code,
                account: &change.account,
                currency: &change.currency,
                issuer: change.issuer.as_deref().unwrap_or_default(),
                action: change.action,
                value: &change.value
            })?;
        }
    }

    output.flush()?;

    Ok(())
}
