use ns_ledger::{AccAddress, Coins};
use ns_registry::RegistryParams;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Reserved key in the names partition holding the params fixed at genesis.
/// Sorts after every fact prefix so fact iteration never sees it.
pub(crate) const PARAMS_KEY: &[u8] = b"\xffparams";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RegistryParams>,
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,
    #[serde(default)]
    pub records: Vec<GenesisRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: AccAddress,
    pub coins: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisRecord {
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub owner: AccAddress,
    pub price: Coins,
}

impl GenesisState {
    pub fn from_json(bytes: &[u8]) -> Result<Self, AppError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Owner and price are set together for every record, as after a real acquisition.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(params) = &self.params {
            if !params.price_floor.is_positive() {
                return Err(AppError::Genesis("params price_floor must be positive".into()));
            }
        }
        for account in &self.accounts {
            if account.address.is_empty() {
                return Err(AppError::Genesis("account with empty address".into()));
            }
        }
        let mut seen = std::collections::BTreeSet::new();
        for record in &self.records {
            if record.name.is_empty() {
                return Err(AppError::Genesis("record with empty name".into()));
            }
            if !seen.insert(record.name.as_str()) {
                return Err(AppError::Genesis(format!(
                    "duplicate record '{}'",
                    record.name
                )));
            }
            if record.owner.is_empty() {
                return Err(AppError::Genesis(format!(
                    "record '{}' has no owner",
                    record.name
                )));
            }
            if !record.price.is_positive() {
                return Err(AppError::Genesis(format!(
                    "record '{}' price must be positive",
                    record.name
                )));
            }
        }
        Ok(())
    }
}
