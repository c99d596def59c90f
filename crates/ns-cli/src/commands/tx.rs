//! `ns tx` commands: build a message, deliver it and persist on success.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use ns_app::{AppMsg, MsgFaucet, Tx};
use ns_ledger::{AccAddress, Coins};
use ns_registry::{MsgBuyName, MsgSetName, RegistryMsg};
use serde_json::json;

use crate::opts::HomeOpts;
use crate::output::print_success;

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// Claim or outbid a record
    BuyName(BuyNameArgs),

    /// Replace the value of a record you own
    SetName(SetNameArgs),

    /// Request coins from the faucet
    Faucet(FaucetArgs),
}

#[derive(Args, Debug)]
pub struct BuyNameArgs {
    /// Buyer address (hex)
    #[arg(long)]
    pub from: AccAddress,

    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub value: String,

    /// Bid, e.g. `10nametoken`
    #[arg(long)]
    pub amount: Coins,
}

#[derive(Args, Debug)]
pub struct SetNameArgs {
    /// Owner address (hex)
    #[arg(long)]
    pub from: AccAddress,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub value: String,
}

#[derive(Args, Debug)]
pub struct FaucetArgs {
    /// Recipient address (hex)
    #[arg(long)]
    pub from: AccAddress,
}

impl TxCommand {
    fn to_msg(&self) -> AppMsg {
        match self {
            TxCommand::BuyName(args) => RegistryMsg::from(MsgBuyName::new(
                args.name.clone(),
                args.value.clone(),
                args.amount.clone(),
                args.from.clone(),
            ))
            .into(),
            TxCommand::SetName(args) => RegistryMsg::from(MsgSetName::new(
                args.name.clone(),
                args.value.clone(),
                args.from.clone(),
            ))
            .into(),
            TxCommand::Faucet(args) => MsgFaucet::new(args.from.clone()).into(),
        }
    }
}

pub fn cmd_tx(opts: &HomeOpts, cmd: &TxCommand) -> Result<()> {
    let mut app = opts.open_initialized()?;
    let tx = Tx::signed(cmd.to_msg());
    let receipt = app
        .deliver(&tx)
        .map_err(|err| anyhow!("{}: {err}", err.code()))?;
    app.flush().context("persist state")?;
    let root = app.state_hash().context("hash state")?;

    let data = serde_json::to_value(&receipt).context("encode receipt")?;
    print_success(
        opts,
        data,
        Some(json!({
            "signer": tx.signer.to_string(),
            "state_hash": root.to_string(),
        })),
    )
}
