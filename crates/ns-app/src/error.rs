use ns_ledger::{AccAddress, LedgerError};
use ns_registry::RegistryError;
use ns_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("transaction rejected: {0}")]
    Rejected(#[from] RegistryError),
    #[error("transaction signed by {signer} but message requires {expected}")]
    SignerMismatch {
        signer: AccAddress,
        expected: AccAddress,
    },
    #[error("faucet is disabled")]
    FaucetDisabled,
    #[error("unknown query path '{0}'")]
    UnknownQuery(String),
    #[error("invalid address '{value}': {reason}")]
    InvalidAddress { value: String, reason: String },
    #[error("chain already initialized")]
    AlreadyInitialized,
    #[error("invalid genesis: {0}")]
    Genesis(String),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("params codec error: {0}")]
    Codec(#[from] serde_cbor::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Stable code surfaced to callers; matches [`RegistryError::code`] for rejections.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Rejected(err) => err.code(),
            AppError::SignerMismatch { .. } => "unauthorized",
            AppError::FaucetDisabled => "faucet_disabled",
            AppError::UnknownQuery(_) | AppError::InvalidAddress { .. } => "unknown_request",
            AppError::AlreadyInitialized | AppError::Genesis(_) => "invalid_genesis",
            AppError::Ledger(_)
            | AppError::Store(_)
            | AppError::Codec(_)
            | AppError::Json(_)
            | AppError::Config(_) => "internal",
        }
    }
}
