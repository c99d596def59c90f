//! Host runtime around the registry: routes operations, scopes every
//! transaction to its own store overlays and commits them only on success.

pub mod app;
pub mod config;
pub mod error;
pub mod faucet;
pub mod genesis;
pub mod tx;

pub use app::{App, FileApp};
pub use config::{AppConfig, ConfigError, FaucetConfig};
pub use error::AppError;
pub use faucet::MsgFaucet;
pub use genesis::{GenesisAccount, GenesisRecord, GenesisState};
pub use tx::{AppMsg, Tx, TxEvent, TxReceipt};
