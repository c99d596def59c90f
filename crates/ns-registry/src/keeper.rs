use ns_ledger::{AccAddress, Coins};
use ns_store::{KvStore, codec};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::keys::{OWNER_PREFIX, owner_key, price_key, value_key};

/// Reference denomination of the default price floor.
pub const DEFAULT_PRICE_DENOM: &str = "nametoken";
/// Price of a record that has never been acquired, in [`DEFAULT_PRICE_DENOM`].
pub const DEFAULT_PRICE_FLOOR: u64 = 1;

/// Module parameters fixed at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Price reported for unclaimed records; the first bid must beat it.
    pub price_floor: Coins,
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self {
            price_floor: Coins::single(DEFAULT_PRICE_DENOM, DEFAULT_PRICE_FLOOR),
        }
    }
}

/// Typed accessors over the value/owner/price fact tables.
///
/// Writes are unconditional; authorization and payment belong to the handler.
#[derive(Debug)]
pub struct Keeper<S> {
    store: S,
    params: RegistryParams,
}

impl<S: KvStore> Keeper<S> {
    pub fn new(store: S, params: RegistryParams) -> Self {
        Self { store, params }
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Empty string when no value was ever set.
    pub fn get_value(&self, name: &str) -> Result<String, RegistryError> {
        match self.store.get(&value_key(name))? {
            Some(bytes) => String::from_utf8(bytes).map_err(|err| RegistryError::Corrupted {
                name: name.to_string(),
                fact: "value",
                reason: err.to_string(),
            }),
            None => Ok(String::new()),
        }
    }

    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), RegistryError> {
        self.store.set(&value_key(name), value.as_bytes().to_vec())?;
        Ok(())
    }

    pub fn has_owner(&self, name: &str) -> Result<bool, RegistryError> {
        Ok(self.store.has(&owner_key(name))?)
    }

    pub fn get_owner(&self, name: &str) -> Result<Option<AccAddress>, RegistryError> {
        Ok(self
            .store
            .get(&owner_key(name))?
            .map(AccAddress::new))
    }

    pub fn set_owner(&mut self, name: &str, owner: &AccAddress) -> Result<(), RegistryError> {
        self.store.set(&owner_key(name), owner.as_bytes().to_vec())?;
        Ok(())
    }

    /// Last paid price, or the configured floor for a record never acquired.
    pub fn get_price(&self, name: &str) -> Result<Coins, RegistryError> {
        match self.store.get(&price_key(name))? {
            Some(bytes) => codec::decode(&bytes).map_err(|err| RegistryError::Corrupted {
                name: name.to_string(),
                fact: "price",
                reason: err.to_string(),
            }),
            None => Ok(self.params.price_floor.clone()),
        }
    }

    pub fn set_price(&mut self, name: &str, price: &Coins) -> Result<(), RegistryError> {
        let bytes = codec::encode(price).map_err(|err| RegistryError::Corrupted {
            name: name.to_string(),
            fact: "price",
            reason: err.to_string(),
        })?;
        self.store.set(&price_key(name), bytes)?;
        Ok(())
    }

    /// Names of every claimed record, sorted.
    pub fn names(&self) -> Result<Vec<String>, RegistryError> {
        self.store
            .iter_prefix(&[OWNER_PREFIX])?
            .into_iter()
            .map(|(key, _)| {
                String::from_utf8(key[1..].to_vec()).map_err(|err| RegistryError::Corrupted {
                    name: String::from_utf8_lossy(&key[1..]).into_owned(),
                    fact: "owner key",
                    reason: err.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_store::MemStore;

    fn keeper() -> Keeper<MemStore> {
        Keeper::new(MemStore::new(), RegistryParams::default())
    }

    #[test]
    fn unset_facts_have_defaults() {
        let keeper = keeper();
        assert_eq!(keeper.get_value("alice.id").unwrap(), "");
        assert!(!keeper.has_owner("alice.id").unwrap());
        assert_eq!(keeper.get_owner("alice.id").unwrap(), None);
        assert_eq!(
            keeper.get_price("alice.id").unwrap(),
            Coins::single(DEFAULT_PRICE_DENOM, DEFAULT_PRICE_FLOOR)
        );
        assert!(keeper.names().unwrap().is_empty());
    }

    #[test]
    fn facts_are_independent() {
        let mut keeper = keeper();
        let owner = AccAddress::new(vec![0xb0; 20]);
        keeper.set_value("alice.id", "1.2.3.4").unwrap();
        assert!(!keeper.has_owner("alice.id").unwrap());

        keeper.set_owner("alice.id", &owner).unwrap();
        keeper
            .set_price("alice.id", &Coins::single("nametoken", 5))
            .unwrap();

        assert_eq!(keeper.get_value("alice.id").unwrap(), "1.2.3.4");
        assert_eq!(keeper.get_owner("alice.id").unwrap(), Some(owner));
        assert_eq!(
            keeper.get_price("alice.id").unwrap(),
            Coins::single("nametoken", 5)
        );
        assert_eq!(keeper.get_value("Alice.id").unwrap(), "");
    }

    #[test]
    fn configured_floor_is_used() {
        let params = RegistryParams {
            price_floor: Coins::single("atom", 3),
        };
        let keeper = Keeper::new(MemStore::new(), params);
        assert_eq!(keeper.get_price("x").unwrap(), Coins::single("atom", 3));
    }

    #[test]
    fn names_lists_claimed_records_only() {
        let mut keeper = keeper();
        let owner = AccAddress::new(vec![1]);
        keeper.set_owner("b.id", &owner).unwrap();
        keeper.set_owner("a.id", &owner).unwrap();
        keeper.set_value("unclaimed.id", "x").unwrap();
        assert_eq!(keeper.names().unwrap(), vec!["a.id", "b.id"]);
    }

    #[test]
    fn corrupted_price_is_reported() {
        let mut store = MemStore::new();
        store.set(&price_key("bad.id"), vec![0xff, 0x00]).unwrap();
        let keeper = Keeper::new(store, RegistryParams::default());
        let err = keeper.get_price("bad.id").unwrap_err();
        assert_eq!(err.code(), "internal");
    }
}
