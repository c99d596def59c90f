//! Fungible balances: coin arithmetic, account addresses and the ledger the registry pays through.

mod address;
mod bank;
mod coins;

pub use address::AccAddress;
pub use bank::{BALANCE_PREFIX, BankLedger, balance_key};
pub use coins::{Coin, Coins, CoinsParseError};

use ns_store::StoreError;

/// Balance movements consumed by the registry handler.
///
/// Every method either applies fully or returns an error without touching
/// balances, so a failed call never leaves a half-moved amount behind.
pub trait Ledger {
    fn balance(&self, account: &AccAddress) -> Result<Coins, LedgerError>;

    /// Move `coins` from `from` to `to`. Self-transfers are funds-checked.
    fn transfer(&mut self, from: &AccAddress, to: &AccAddress, coins: &Coins)
    -> Result<(), LedgerError>;

    /// Remove `coins` from `account` with no credit destination.
    fn debit(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError>;

    fn credit(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError>;
}

impl<L: Ledger + ?Sized> Ledger for &mut L {
    fn balance(&self, account: &AccAddress) -> Result<Coins, LedgerError> {
        (**self).balance(account)
    }

    fn transfer(
        &mut self,
        from: &AccAddress,
        to: &AccAddress,
        coins: &Coins,
    ) -> Result<(), LedgerError> {
        (**self).transfer(from, to, coins)
    }

    fn debit(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError> {
        (**self).debit(account, coins)
    }

    fn credit(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError> {
        (**self).credit(account, coins)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account {account} has {available}, needs {required}")]
    InsufficientFunds {
        account: AccAddress,
        required: Coins,
        available: Coins,
    },
    #[error("balance overflow for account {0}")]
    Overflow(AccAddress),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("balance codec error for account {account}: {source}")]
    Codec {
        account: AccAddress,
        #[source]
        source: serde_cbor::Error,
    },
}
