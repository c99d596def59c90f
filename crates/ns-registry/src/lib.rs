//! Name registry state transitions: records are acquired by outbidding their
//! last price and carry an owner-controlled value.
//!
//! The [`Keeper`] is the only code that touches record facts. The [`Handler`]
//! applies the business rules, paying through a [`ns_ledger::Ledger`] before
//! any fact is written. Message validation and the read-only query path are
//! pure functions over their inputs.

pub mod error;
pub mod handler;
pub mod keeper;
pub mod keys;
pub mod msgs;
pub mod query;

pub use error::{RegistryError, ValidationError};
pub use handler::{Handler, RegistryEvent};
pub use keeper::{DEFAULT_PRICE_DENOM, DEFAULT_PRICE_FLOOR, Keeper, RegistryParams};
pub use msgs::{MsgBuyName, MsgSetName, ROUTE, RegistryMsg};
pub use query::{QueryResponse, RegistryQuery, Whois};
