//! Shared helpers for the app integration tests.
//!
//! Each test binary compiles this module on its own, so some helpers look
//! unused from any single file.

#![allow(dead_code)]

use ns_app::{App, AppConfig, FaucetConfig, GenesisAccount, GenesisState, MsgFaucet, Tx};
use ns_ledger::{AccAddress, Coins};
use ns_registry::{MsgBuyName, MsgSetName, RegistryMsg};
use ns_store::MemStore;

pub fn addr(tag: u8) -> AccAddress {
    AccAddress::new(vec![tag; 20])
}

pub fn coins(expr: &str) -> Coins {
    expr.parse().expect("coin expression")
}

/// In-memory app with the default floor and the given opening balances.
pub fn funded_app(accounts: &[(AccAddress, &str)]) -> App<MemStore> {
    funded_app_with(AppConfig::default(), accounts)
}

pub fn funded_app_with(config: AppConfig, accounts: &[(AccAddress, &str)]) -> App<MemStore> {
    let mut app = App::in_memory(config);
    let genesis = GenesisState {
        accounts: accounts
            .iter()
            .map(|(address, amount)| GenesisAccount {
                address: address.clone(),
                coins: coins(amount),
            })
            .collect(),
        ..Default::default()
    };
    app.init_chain(&genesis).expect("init chain");
    app
}

pub fn buy_tx(buyer: &AccAddress, name: &str, value: &str, bid: &str) -> Tx {
    Tx::signed(RegistryMsg::from(MsgBuyName::new(
        name,
        value,
        coins(bid),
        buyer.clone(),
    )))
}

pub fn set_tx(owner: &AccAddress, name: &str, value: &str) -> Tx {
    Tx::signed(RegistryMsg::from(MsgSetName::new(name, value, owner.clone())))
}

pub fn balance(app: &App<MemStore>, account: &AccAddress) -> Coins {
    app.balance(account).expect("balance")
}

pub fn whois(app: &App<MemStore>, name: &str) -> serde_json::Value {
    app.query(&format!("nameservice/whois/{name}"))
        .expect("whois query")
}

pub fn faucet_tx(requester: &AccAddress) -> Tx {
    Tx::signed(MsgFaucet::new(requester.clone()))
}

/// Default config whose faucet pays out `amount`.
pub fn faucet_config(amount: &str) -> AppConfig {
    AppConfig {
        faucet: Some(FaucetConfig {
            amount: coins(amount),
        }),
        ..AppConfig::default()
    }
}
