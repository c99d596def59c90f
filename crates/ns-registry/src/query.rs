use ns_ledger::{AccAddress, Coins};
use ns_store::KvStore;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::keeper::Keeper;

/// Combined view of one record. Unclaimed records report an empty value,
/// no owner and the price floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whois {
    pub value: String,
    pub owner: Option<AccAddress>,
    pub price: Coins,
}

/// Read-only lookups served under the registry route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryQuery {
    Resolve(String),
    Whois(String),
    Names,
}

impl RegistryQuery {
    /// Parse the path segments after the route, e.g. `["whois", "alice.id"]`.
    pub fn from_path(segments: &[&str]) -> Option<Self> {
        match segments {
            ["resolve", name] => Some(RegistryQuery::Resolve((*name).to_string())),
            ["whois", name] => Some(RegistryQuery::Whois((*name).to_string())),
            ["names"] => Some(RegistryQuery::Names),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Resolve { value: String },
    Whois(Whois),
    Names(Vec<String>),
}

impl<S: KvStore> Keeper<S> {
    pub fn resolve(&self, name: &str) -> Result<String, RegistryError> {
        self.get_value(name)
    }

    pub fn whois(&self, name: &str) -> Result<Whois, RegistryError> {
        Ok(Whois {
            value: self.get_value(name)?,
            owner: self.get_owner(name)?,
            price: self.get_price(name)?,
        })
    }

    pub fn query(&self, query: &RegistryQuery) -> Result<QueryResponse, RegistryError> {
        Ok(match query {
            RegistryQuery::Resolve(name) => QueryResponse::Resolve {
                value: self.resolve(name)?,
            },
            RegistryQuery::Whois(name) => QueryResponse::Whois(self.whois(name)?),
            RegistryQuery::Names => QueryResponse::Names(self.names()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keeper::RegistryParams;
    use ns_store::MemStore;

    #[test]
    fn path_parsing() {
        assert_eq!(
            RegistryQuery::from_path(&["resolve", "alice.id"]),
            Some(RegistryQuery::Resolve("alice.id".into()))
        );
        assert_eq!(RegistryQuery::from_path(&["names"]), Some(RegistryQuery::Names));
        assert_eq!(RegistryQuery::from_path(&["whois"]), None);
        assert_eq!(RegistryQuery::from_path(&["bogus", "x"]), None);
    }

    #[test]
    fn missing_record_is_an_empty_result() {
        let keeper = Keeper::new(MemStore::new(), RegistryParams::default());
        assert_eq!(
            keeper.query(&RegistryQuery::Resolve("nobody.id".into())).unwrap(),
            QueryResponse::Resolve {
                value: String::new()
            }
        );
        let whois = keeper.whois("nobody.id").unwrap();
        assert_eq!(whois.owner, None);
        assert_eq!(whois.price, RegistryParams::default().price_floor);
    }

    #[test]
    fn whois_reflects_all_facts() {
        let mut keeper = Keeper::new(MemStore::new(), RegistryParams::default());
        let owner = AccAddress::new(vec![7; 20]);
        keeper.set_owner("alice.id", &owner).unwrap();
        keeper.set_price("alice.id", &Coins::single("nametoken", 5)).unwrap();
        keeper.set_value("alice.id", "1.2.3.4").unwrap();

        let json = serde_json::to_value(
            keeper
                .query(&RegistryQuery::Whois("alice.id".into()))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(json["value"], "1.2.3.4");
        assert_eq!(json["owner"], owner.to_string());
        assert_eq!(json["price"][0]["amount"], 5);
    }
}
