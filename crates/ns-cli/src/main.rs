mod commands;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::init::InitArgs;
use commands::query::QueryCommand;
use commands::tx::TxCommand;
use opts::HomeOpts;

#[derive(Parser, Debug)]
#[command(name = "ns", version, about = "Nameservice registry CLI")]
struct Cli {
    #[command(flatten)]
    opts: HomeOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a home directory and apply a genesis file
    Init(InitArgs),

    /// Submit a transaction
    #[command(subcommand)]
    Tx(TxCommand),

    /// Read registry or balance state
    #[command(subcommand)]
    Query(QueryCommand),

    /// Print the current state as genesis JSON
    Export,
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let opts = &cli.opts;

    match cli.command {
        Command::Init(args) => commands::init::cmd_init(opts, &args),
        Command::Tx(cmd) => commands::tx::cmd_tx(opts, &cmd),
        Command::Query(cmd) => commands::query::cmd_query(opts, &cmd),
        Command::Export => commands::export::cmd_export(opts),
    }
}

/// Logs go to stderr so stdout stays machine-readable. `log` records from the
/// library crates are forwarded through the same subscriber.
fn setup_logging() {
    let filter = EnvFilter::try_from_env("NS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
