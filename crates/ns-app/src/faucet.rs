use ns_ledger::{AccAddress, Ledger};
use ns_registry::ValidationError;
use serde::{Deserialize, Serialize};

use crate::config::FaucetConfig;
use crate::error::AppError;
use crate::tx::TxEvent;

pub const ROUTE: &str = "faucet";

/// Ask the faucet to credit the configured amount to `requester`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgFaucet {
    pub requester: AccAddress,
}

impl MsgFaucet {
    pub const TYPE: &'static str = "request_coins";

    pub fn new(requester: AccAddress) -> Self {
        Self { requester }
    }

    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        if self.requester.is_empty() {
            return Err(ValidationError::EmptyAddress { field: "requester" });
        }
        Ok(())
    }
}

pub(crate) fn handle<L: Ledger>(
    config: Option<&FaucetConfig>,
    ledger: &mut L,
    msg: &MsgFaucet,
) -> Result<TxEvent, AppError> {
    let config = config.ok_or(AppError::FaucetDisabled)?;
    ledger.credit(&msg.requester, &config.amount)?;
    Ok(TxEvent::CoinsMinted {
        recipient: msg.requester.clone(),
        amount: config.amount.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_ledger::{BankLedger, Coins};
    use ns_store::MemStore;

    #[test]
    fn credits_configured_amount() {
        let mut bank = BankLedger::new(MemStore::new());
        let who = AccAddress::new(vec![3; 20]);
        let config = FaucetConfig {
            amount: Coins::single("nametoken", 7),
        };
        handle(Some(&config), &mut bank, &MsgFaucet::new(who.clone())).unwrap();
        handle(Some(&config), &mut bank, &MsgFaucet::new(who.clone())).unwrap();
        assert_eq!(bank.balance(&who).unwrap(), Coins::single("nametoken", 14));
    }

    #[test]
    fn disabled_faucet_rejects() {
        let mut bank = BankLedger::new(MemStore::new());
        let err = handle(None, &mut bank, &MsgFaucet::new(AccAddress::new(vec![3]))).unwrap_err();
        assert!(matches!(err, AppError::FaucetDisabled));
    }
}
