use ns_ledger::{AccAddress, Coins, Ledger};
use ns_store::KvStore;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::keeper::Keeper;
use crate::msgs::{MsgBuyName, MsgSetName, RegistryMsg};

/// What a successful transition changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    NameAcquired {
        name: String,
        buyer: AccAddress,
        /// `None` when the record was unclaimed and the bid was burned.
        previous_owner: Option<AccAddress>,
        price: Coins,
    },
    ValueSet {
        name: String,
        owner: AccAddress,
    },
}

/// Applies registry messages against a keeper and a ledger.
///
/// Messages must already have passed `validate_basic`. All reads and the
/// balance movement happen before the first fact write, so an `Err` means no
/// fact was written by this call. The host still owns rollback of the ledger
/// leg should a later fact write fail.
#[derive(Debug)]
pub struct Handler<S, L> {
    keeper: Keeper<S>,
    ledger: L,
}

impl<S: KvStore, L: Ledger> Handler<S, L> {
    pub fn new(keeper: Keeper<S>, ledger: L) -> Self {
        Self { keeper, ledger }
    }

    pub fn keeper(&self) -> &Keeper<S> {
        &self.keeper
    }

    pub fn into_parts(self) -> (Keeper<S>, L) {
        (self.keeper, self.ledger)
    }

    pub fn handle(&mut self, msg: &RegistryMsg) -> Result<RegistryEvent, RegistryError> {
        let result = match msg {
            RegistryMsg::BuyName(msg) => self.buy_name(msg),
            RegistryMsg::SetName(msg) => self.set_name(msg),
        };
        match &result {
            Ok(event) => log::debug!("{} accepted: {event:?}", msg.type_name()),
            Err(err) => log::warn!("{} rejected ({}): {err}", msg.type_name(), err.code()),
        }
        result
    }

    pub fn buy_name(&mut self, msg: &MsgBuyName) -> Result<RegistryEvent, RegistryError> {
        let price = self.keeper.get_price(&msg.name)?;
        // a price never goes down in any denomination
        if !msg.bid.dominates(&price) {
            return Err(RegistryError::InsufficientBid {
                name: msg.name.clone(),
                price,
                bid: msg.bid.clone(),
            });
        }

        let previous_owner = self.keeper.get_owner(&msg.name)?;
        match &previous_owner {
            Some(owner) => self.ledger.transfer(&msg.buyer, owner, &msg.bid)?,
            None => self.ledger.debit(&msg.buyer, &msg.bid)?,
        }

        self.keeper.set_owner(&msg.name, &msg.buyer)?;
        self.keeper.set_price(&msg.name, &msg.bid)?;
        self.keeper.set_value(&msg.name, &msg.value)?;

        Ok(RegistryEvent::NameAcquired {
            name: msg.name.clone(),
            buyer: msg.buyer.clone(),
            previous_owner,
            price: msg.bid.clone(),
        })
    }

    pub fn set_name(&mut self, msg: &MsgSetName) -> Result<RegistryEvent, RegistryError> {
        if self.keeper.get_owner(&msg.name)?.as_ref() != Some(&msg.owner) {
            return Err(RegistryError::Unauthorized {
                name: msg.name.clone(),
                signer: msg.owner.clone(),
            });
        }
        self.keeper.set_value(&msg.name, &msg.value)?;
        Ok(RegistryEvent::ValueSet {
            name: msg.name.clone(),
            owner: msg.owner.clone(),
        })
    }
}
