use std::path::Path;

use ns_ledger::{AccAddress, BankLedger, Coins, Ledger};
use ns_registry::{Handler, Keeper, RegistryError, RegistryParams, RegistryQuery};
use ns_store::{
    FsStore, KvStore, MemStore, Partition, StateRoot, TxStore, WriteSet, codec, state_hash,
};
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::faucet;
use crate::genesis::{GenesisAccount, GenesisRecord, GenesisState, PARAMS_KEY};
use crate::tx::{AppMsg, Tx, TxEvent, TxReceipt};

/// Tag of the partition holding record facts and params.
pub const NAMES_PARTITION: &[u8] = b"names/";
/// Tag of the partition holding account balances.
pub const ACCOUNTS_PARTITION: &[u8] = b"accounts/";

type View<'a, S> = Partition<TxStore<'a, S>>;

/// Registry application over one committed store split into two
/// partitions: record facts and balances.
///
/// Transitions run one at a time against a [`TxStore`] overlay per
/// partition; both write sets are applied together only when the whole
/// transition succeeds, so a rejected transaction leaves no trace in either.
/// Both partitions live in the same store, so a durable backend persists them
/// in one snapshot.
#[derive(Debug)]
pub struct App<S> {
    store: S,
    config: AppConfig,
}

/// App persisted under a home directory.
pub type FileApp = App<FsStore>;

impl App<MemStore> {
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(MemStore::new(), config)
    }
}

impl App<FsStore> {
    pub fn open(home: impl AsRef<Path>, config: AppConfig) -> Result<Self, AppError> {
        Ok(Self::new(FsStore::open(home)?, config))
    }
}

impl<S: KvStore> App<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> Result<bool, AppError> {
        Ok(self.names_view().has(PARAMS_KEY)?)
    }

    /// Params fixed at genesis, falling back to the configured ones.
    pub fn params(&self) -> Result<RegistryParams, AppError> {
        match self.names_view().get(PARAMS_KEY)? {
            Some(bytes) => Ok(codec::decode(&bytes)?),
            None => Ok(self.config.params.clone()),
        }
    }

    pub fn init_chain(&mut self, genesis: &GenesisState) -> Result<StateRoot, AppError> {
        if self.is_initialized()? {
            return Err(AppError::AlreadyInitialized);
        }
        genesis.validate()?;
        let params = genesis
            .params
            .clone()
            .unwrap_or_else(|| self.config.params.clone());

        let writes = {
            let mut names = self.names_view();
            let mut accounts = self.accounts_view();
            names.set(PARAMS_KEY, codec::encode(&params)?)?;

            let mut bank = BankLedger::new(&mut accounts);
            for account in &genesis.accounts {
                bank.credit(&account.address, &account.coins)?;
            }
            let mut keeper = Keeper::new(&mut names, params);
            for record in &genesis.records {
                keeper.set_owner(&record.name, &record.owner)?;
                keeper.set_price(&record.name, &record.price)?;
                keeper.set_value(&record.name, &record.value)?;
            }
            merge(names, accounts)
        };
        self.store.apply(writes)?;

        let root = self.state_hash()?;
        tracing::info!(
            accounts = genesis.accounts.len(),
            records = genesis.records.len(),
            %root,
            "chain initialized"
        );
        Ok(root)
    }

    /// Apply one transaction. The receipt does not carry a state root; call
    /// [`App::state_hash`] when one is needed, it walks the whole store.
    pub fn deliver(&mut self, tx: &Tx) -> Result<TxReceipt, AppError> {
        let span = tracing::debug_span!(
            "deliver",
            route = tx.msg.route(),
            msg_type = tx.msg.type_name()
        );
        let _guard = span.enter();

        match self.apply_tx(tx) {
            Ok(receipt) => {
                tracing::debug!(event = ?receipt.event, "transaction committed");
                Ok(receipt)
            }
            Err(err) => {
                tracing::info!(code = err.code(), error = %err, "transaction rejected");
                Err(err)
            }
        }
    }

    fn apply_tx(&mut self, tx: &Tx) -> Result<TxReceipt, AppError> {
        tx.msg.validate_basic().map_err(RegistryError::from)?;
        if tx.msg.signer() != &tx.signer {
            return Err(AppError::SignerMismatch {
                signer: tx.signer.clone(),
                expected: tx.msg.signer().clone(),
            });
        }
        let params = self.params()?;

        let (event, writes) = {
            let mut names = self.names_view();
            let mut accounts = self.accounts_view();
            let event = match &tx.msg {
                AppMsg::Nameservice(msg) => {
                    let keeper = Keeper::new(&mut names, params);
                    let mut handler = Handler::new(keeper, BankLedger::new(&mut accounts));
                    TxEvent::Registry(handler.handle(msg)?)
                }
                AppMsg::Faucet(msg) => {
                    let mut bank = BankLedger::new(&mut accounts);
                    faucet::handle(self.config.faucet.as_ref(), &mut bank, msg)?
                }
            };
            (event, merge(names, accounts))
        };
        self.store.apply(writes)?;

        Ok(TxReceipt {
            route: tx.msg.route(),
            msg_type: tx.msg.type_name(),
            event,
        })
    }

    /// Route a read-only query: `nameservice/resolve/<name>`,
    /// `nameservice/whois/<name>`, `nameservice/names`, `bank/balance/<address>`.
    pub fn query(&self, path: &str) -> Result<Value, AppError> {
        let mut parts = path.trim_start_matches('/').splitn(3, '/');
        let route = parts.next().unwrap_or_default();
        let segments: Vec<&str> = parts.collect();
        match route {
            ns_registry::ROUTE => {
                let query = RegistryQuery::from_path(&segments)
                    .ok_or_else(|| AppError::UnknownQuery(path.to_string()))?;
                let response = self.keeper_view()?.query(&query)?;
                Ok(serde_json::to_value(response)?)
            }
            "bank" => match segments.as_slice() {
                ["balance", address] => {
                    let address = address.parse::<AccAddress>().map_err(|err| {
                        AppError::InvalidAddress {
                            value: (*address).to_string(),
                            reason: err.to_string(),
                        }
                    })?;
                    Ok(json!({ "coins": self.balance(&address)? }))
                }
                _ => Err(AppError::UnknownQuery(path.to_string())),
            },
            _ => Err(AppError::UnknownQuery(path.to_string())),
        }
    }

    pub fn balance(&self, account: &AccAddress) -> Result<Coins, AppError> {
        Ok(self.bank_view().balance(account)?)
    }

    pub fn export_genesis(&self) -> Result<GenesisState, AppError> {
        let accounts = self
            .bank_view()
            .accounts()?
            .into_iter()
            .map(|(address, coins)| GenesisAccount { address, coins })
            .collect();

        let keeper = self.keeper_view()?;
        let mut records = Vec::new();
        for name in keeper.names()? {
            let whois = keeper.whois(&name)?;
            let Some(owner) = whois.owner else {
                continue;
            };
            records.push(GenesisRecord {
                name,
                value: whois.value,
                owner,
                price: whois.price,
            });
        }

        Ok(GenesisState {
            params: Some(keeper.params().clone()),
            accounts,
            records,
        })
    }

    /// Root over both partitions. For a file-backed app this is the name of
    /// the snapshot the next [`App::flush`] publishes.
    pub fn state_hash(&self) -> Result<StateRoot, AppError> {
        Ok(state_hash(&self.store)?)
    }

    /// Persist both partitions as one snapshot.
    pub fn flush(&mut self) -> Result<(), AppError> {
        Ok(self.store.flush()?)
    }

    // Views borrow the committed store shared; their writes only exist in the overlay.
    fn names_view(&self) -> View<'_, S> {
        Partition::new(TxStore::new(&self.store), NAMES_PARTITION)
    }

    fn accounts_view(&self) -> View<'_, S> {
        Partition::new(TxStore::new(&self.store), ACCOUNTS_PARTITION)
    }

    fn keeper_view(&self) -> Result<Keeper<View<'_, S>>, AppError> {
        Ok(Keeper::new(self.names_view(), self.params()?))
    }

    fn bank_view(&self) -> BankLedger<View<'_, S>> {
        BankLedger::new(self.accounts_view())
    }
}

/// Partition tags are disjoint, so the two write sets never share a key.
fn merge<S: KvStore>(names: View<'_, S>, accounts: View<'_, S>) -> WriteSet {
    let mut writes = names.into_inner().commit();
    writes.extend(accounts.into_inner().commit());
    writes
}
