use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vendsim::application::config::EngineConfig;
use vendsim::application::engine::TransactionEngine;
use vendsim::domain::catalog::Catalog;
use vendsim::infrastructure::in_memory::InMemoryStockLedger;
use vendsim::interfaces::csv::command_reader::CommandReader;
use vendsim::interfaces::StepSink;
use vendsim::interfaces::csv::outcome_writer::OutcomeWriter;
use vendsim::interfaces::json::step_writer::JsonStepWriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script CSV file (`command, arg` rows)
    input: PathBuf,

    /// JSON catalog to load instead of the standard cola/water/coffee one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Simulated dispense latency in milliseconds
    #[arg(long, env = "VENDSIM_DISPENSE_DELAY_MS", default_value_t = 600)]
    dispense_delay_ms: u64,

    /// Simulated change payout latency in milliseconds
    #[arg(long, env = "VENDSIM_CHANGE_DELAY_MS", default_value_t = 500)]
    change_delay_ms: u64,

    /// How long a finished card session stays visible before it resets
    #[arg(long, env = "VENDSIM_CARD_SETTLE_DELAY_MS", default_value_t = 0)]
    card_settle_delay_ms: u64,

    /// Emit one JSON object per step instead of CSV rows
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog = match cli.catalog {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            Catalog::from_json(file).into_diagnostic()?
        }
        None => Catalog::standard(),
    };
    let config = EngineConfig {
        dispense_delay: Duration::from_millis(cli.dispense_delay_ms),
        change_delay: Duration::from_millis(cli.change_delay_ms),
        card_settle_delay: Duration::from_millis(cli.card_settle_delay_ms),
    };
    let stock = Box::new(InMemoryStockLedger::from_catalog(&catalog));
    let engine = TransactionEngine::new(catalog, stock, config);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let stdout = io::stdout().lock();
    let mut writer: Box<dyn StepSink> = if cli.json {
        Box::new(JsonStepWriter::new(stdout))
    } else {
        Box::new(OutcomeWriter::new(stdout))
    };

    for (step, command_result) in reader.commands().enumerate() {
        match command_result {
            Ok(command) => {
                let result = engine.execute(command.clone()).await;
                let view = engine.view().await.into_diagnostic()?;
                writer
                    .write_step(step + 1, &command, &result, &view)
                    .into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}

/// Logs go to stderr so stdout stays a clean report stream.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
