//! `ns query` commands.

use anyhow::{Result, anyhow};
use clap::Subcommand;

use crate::opts::HomeOpts;
use crate::output::print_success;

#[derive(Subcommand, Debug)]
pub enum QueryCommand {
    /// Value stored under a record
    Resolve { name: String },

    /// Value, owner and price of a record
    Whois { name: String },

    /// Every claimed record name
    Names,

    /// Balance of an address (hex)
    Balance { address: String },
}

impl QueryCommand {
    fn path(&self) -> String {
        match self {
            QueryCommand::Resolve { name } => format!("nameservice/resolve/{name}"),
            QueryCommand::Whois { name } => format!("nameservice/whois/{name}"),
            QueryCommand::Names => "nameservice/names".to_string(),
            QueryCommand::Balance { address } => format!("bank/balance/{address}"),
        }
    }
}

pub fn cmd_query(opts: &HomeOpts, cmd: &QueryCommand) -> Result<()> {
    let app = opts.open_initialized()?;
    let data = app
        .query(&cmd.path())
        .map_err(|err| anyhow!("{}: {err}", err.code()))?;
    print_success(opts, data, None)
}
