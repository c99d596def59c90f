use ns_ledger::{AccAddress, Coins};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Route under which the host dispatches registry messages.
pub const ROUTE: &str = "nameservice";

/// Claim an unowned record or outbid the current owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBuyName {
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub bid: Coins,
    pub buyer: AccAddress,
}

impl MsgBuyName {
    pub const TYPE: &'static str = "buy_name";

    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        bid: Coins,
        buyer: AccAddress,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            bid,
            buyer,
        }
    }

    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        if self.buyer.is_empty() {
            return Err(ValidationError::EmptyAddress { field: "buyer" });
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.bid.is_positive() {
            return Err(ValidationError::NonPositiveBid(self.bid.clone()));
        }
        Ok(())
    }
}

/// Replace the value of a record the signer already owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetName {
    pub name: String,
    pub value: String,
    pub owner: AccAddress,
}

impl MsgSetName {
    pub const TYPE: &'static str = "set_name";

    pub fn new(name: impl Into<String>, value: impl Into<String>, owner: AccAddress) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            owner,
        }
    }

    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        if self.owner.is_empty() {
            return Err(ValidationError::EmptyAddress { field: "owner" });
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.value.is_empty() {
            return Err(ValidationError::EmptyValue);
        }
        Ok(())
    }
}

/// Closed set of registry operations, dispatched by exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RegistryMsg {
    BuyName(MsgBuyName),
    SetName(MsgSetName),
}

impl RegistryMsg {
    pub fn route(&self) -> &'static str {
        ROUTE
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RegistryMsg::BuyName(_) => MsgBuyName::TYPE,
            RegistryMsg::SetName(_) => MsgSetName::TYPE,
        }
    }

    pub fn validate_basic(&self) -> Result<(), ValidationError> {
        match self {
            RegistryMsg::BuyName(msg) => msg.validate_basic(),
            RegistryMsg::SetName(msg) => msg.validate_basic(),
        }
    }

    /// The account that must have signed the enclosing transaction.
    pub fn signer(&self) -> &AccAddress {
        match self {
            RegistryMsg::BuyName(msg) => &msg.buyer,
            RegistryMsg::SetName(msg) => &msg.owner,
        }
    }
}

impl From<MsgBuyName> for RegistryMsg {
    fn from(msg: MsgBuyName) -> Self {
        RegistryMsg::BuyName(msg)
    }
}

impl From<MsgSetName> for RegistryMsg {
    fn from(msg: MsgSetName) -> Self {
        RegistryMsg::SetName(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer() -> AccAddress {
        AccAddress::new(vec![0xb0; 20])
    }

    #[test]
    fn buy_name_validation() {
        let ok = MsgBuyName::new("alice.id", "1.2.3.4", Coins::single("nametoken", 5), buyer());
        assert_eq!(ok.validate_basic(), Ok(()));

        // the value may be left empty on acquisition
        let mut msg = ok.clone();
        msg.value.clear();
        assert_eq!(msg.validate_basic(), Ok(()));

        let mut msg = ok.clone();
        msg.buyer = AccAddress::default();
        assert_eq!(
            msg.validate_basic(),
            Err(ValidationError::EmptyAddress { field: "buyer" })
        );

        let mut msg = ok.clone();
        msg.name.clear();
        assert_eq!(msg.validate_basic(), Err(ValidationError::EmptyName));

        for bid in ["", "0nametoken", "5nametoken,0atom"] {
            let mut msg = ok.clone();
            msg.bid = bid.parse().unwrap();
            assert!(
                matches!(msg.validate_basic(), Err(ValidationError::NonPositiveBid(_))),
                "bid '{bid}' should be rejected"
            );
        }
    }

    #[test]
    fn set_name_validation() {
        let ok = MsgSetName::new("alice.id", "5.6.7.8", buyer());
        assert_eq!(ok.validate_basic(), Ok(()));
        assert_eq!(
            MsgSetName::new("alice.id", "5.6.7.8", AccAddress::default()).validate_basic(),
            Err(ValidationError::EmptyAddress { field: "owner" })
        );
        assert_eq!(
            MsgSetName::new("", "5.6.7.8", buyer()).validate_basic(),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            MsgSetName::new("alice.id", "", buyer()).validate_basic(),
            Err(ValidationError::EmptyValue)
        );
    }

    #[test]
    fn tagged_json_form() {
        let msg: RegistryMsg = MsgSetName::new("alice.id", "5.6.7.8", buyer()).into();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "set_name");
        assert_eq!(json["value"]["name"], "alice.id");
        assert_eq!(msg.type_name(), "set_name");
        assert_eq!(msg.route(), ROUTE);
        assert_eq!(msg.signer(), &buyer());
    }
}
