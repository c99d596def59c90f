//! `ns init` command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ns_app::GenesisState;
use serde_json::json;

use crate::opts::HomeOpts;
use crate::output::print_success;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Genesis JSON file (accounts, records and optional params)
    #[arg(long)]
    pub genesis: PathBuf,
}

pub fn cmd_init(opts: &HomeOpts, args: &InitArgs) -> Result<()> {
    let bytes = fs::read(&args.genesis)
        .with_context(|| format!("read genesis {}", args.genesis.display()))?;
    let genesis = GenesisState::from_json(&bytes).context("parse genesis")?;

    let mut app = opts.open_app()?;
    let hash = app.init_chain(&genesis).context("apply genesis")?;
    app.flush().context("persist state")?;

    print_success(
        opts,
        json!({
            "home": opts.home.display().to_string(),
            "state_hash": hash.to_string(),
        }),
        Some(json!({
            "accounts": genesis.accounts.len(),
            "records": genesis.records.len(),
        })),
    )
}
