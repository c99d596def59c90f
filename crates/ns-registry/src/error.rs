use ns_ledger::{AccAddress, Coins, LedgerError};
use ns_store::StoreError;
use thiserror::Error;

/// Structural problems caught before a message reaches the handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} address must not be empty")]
    EmptyAddress { field: &'static str },
    #[error("name must not be empty")]
    EmptyName,
    #[error("value must not be empty")]
    EmptyValue,
    #[error("bid must be positive in every denomination, got '{0}'")]
    NonPositiveBid(Coins),
}

/// Why a transition was rejected. Every variant is terminal for the transition.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid message: {0}")]
    Validation(#[from] ValidationError),
    #[error("bid {bid} does not exceed current price {price} of '{name}'")]
    InsufficientBid { name: String, price: Coins, bid: Coins },
    #[error("insufficient funds: {0}")]
    InsufficientFunds(#[source] LedgerError),
    #[error("{signer} is not the owner of '{name}'")]
    Unauthorized { name: String, signer: AccAddress },
    #[error("ledger error: {0}")]
    Ledger(#[source] LedgerError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("corrupted {fact} fact for '{name}': {reason}")]
    Corrupted {
        name: String,
        fact: &'static str,
        reason: String,
    },
}

impl RegistryError {
    /// Stable code hosts surface to callers.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::Validation(_) => "invalid_request",
            RegistryError::InsufficientBid { .. } => "insufficient_bid",
            RegistryError::InsufficientFunds(_) => "insufficient_funds",
            RegistryError::Unauthorized { .. } => "unauthorized",
            RegistryError::Ledger(_) | RegistryError::Store(_) | RegistryError::Corrupted { .. } => {
                "internal"
            }
        }
    }
}

impl From<LedgerError> for RegistryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { .. } => RegistryError::InsufficientFunds(err),
            other => RegistryError::Ledger(other),
        }
    }
}
