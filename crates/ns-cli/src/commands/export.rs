//! `ns export` command.

use anyhow::{Context, Result};
use serde_json::json;

use crate::opts::HomeOpts;
use crate::output::print_success;

pub fn cmd_export(opts: &HomeOpts) -> Result<()> {
    let app = opts.open_initialized()?;
    let genesis = app.export_genesis().context("export state")?;
    let hash = app.state_hash().context("hash state")?;
    let data = serde_json::to_value(&genesis).context("encode genesis")?;
    print_success(opts, data, Some(json!({ "state_hash": hash.to_string() })))
}
