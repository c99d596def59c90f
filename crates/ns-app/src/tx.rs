use ns_ledger::{AccAddress, Coins};
use ns_registry::{RegistryEvent, RegistryMsg, ValidationError};
use serde::{Deserialize, Serialize};

use crate::faucet::{self, MsgFaucet};

/// Every message the app routes, keyed by route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMsg {
    Nameservice(RegistryMsg),
    Faucet(MsgFaucet),
}

impl AppMsg {
    pub fn route(&self) -> &'static str {
        match self {
            AppMsg::Nameservice(msg) => msg.route(),
            AppMsg::Faucet(_) => faucet::ROUTE,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AppMsg::Nameservice(msg) => msg.type_name(),
            AppMsg::Faucet(_) => MsgFaucet::TYPE,
        }
    }

    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        match self {
            AppMsg::Nameservice(msg) => msg.validate_basic(),
            AppMsg::Faucet(msg) => msg.validate_basic(),
        }
    }

    pub fn signer(&self) -> &AccAddress {
        match self {
            AppMsg::Nameservice(msg) => msg.signer(),
            AppMsg::Faucet(msg) => &msg.requester,
        }
    }
}

impl From<RegistryMsg> for AppMsg {
    fn from(msg: RegistryMsg) -> Self {
        AppMsg::Nameservice(msg)
    }
}

impl From<MsgFaucet> for AppMsg {
    fn from(msg: MsgFaucet) -> Self {
        AppMsg::Faucet(msg)
    }
}

/// A decoded transaction whose signature the host has already verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub signer: AccAddress,
    pub msg: AppMsg,
}

impl Tx {
    /// Build a transaction signed by the message's own signer.
    pub fn signed(msg: impl Into<AppMsg>) -> Self {
        let msg = msg.into();
        Self {
            signer: msg.signer().clone(),
            msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxEvent {
    Registry(RegistryEvent),
    CoinsMinted { recipient: AccAddress, amount: Coins },
}

/// Result of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub route: &'static str,
    pub msg_type: &'static str,
    pub event: TxEvent,
}
