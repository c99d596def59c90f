use ns_store::{KvStore, codec};

use crate::{AccAddress, Coins, Ledger, LedgerError};

/// Partition prefix for account balances.
pub const BALANCE_PREFIX: u8 = 0x00;

pub fn balance_key(account: &AccAddress) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + account.as_bytes().len());
    key.push(BALANCE_PREFIX);
    key.extend_from_slice(account.as_bytes());
    key
}

/// Ledger whose balances live in a [`KvStore`] partition.
///
/// Hand it a transaction-scoped store and its writes share the host's
/// commit/rollback with every other write of the transition.
#[derive(Debug)]
pub struct BankLedger<S> {
    store: S,
}

impl<S: KvStore> BankLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Every account with a non-empty balance, sorted by address.
    pub fn accounts(&self) -> Result<Vec<(AccAddress, Coins)>, LedgerError> {
        let mut out = Vec::new();
        for (key, bytes) in self.store.iter_prefix(&[BALANCE_PREFIX])? {
            let account = AccAddress::from(&key[1..]);
            let coins = decode(&account, &bytes)?;
            out.push((account, coins));
        }
        Ok(out)
    }

    fn set_balance(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError> {
        let key = balance_key(account);
        if coins.is_empty() {
            self.store.delete(&key)?;
        } else {
            let bytes = codec::encode(coins).map_err(|source| LedgerError::Codec {
                account: account.clone(),
                source,
            })?;
            self.store.set(&key, bytes)?;
        }
        Ok(())
    }

    fn check_debit(&self, account: &AccAddress, coins: &Coins) -> Result<Coins, LedgerError> {
        let available = self.balance(account)?;
        available
            .checked_sub(coins)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                account: account.clone(),
                required: coins.clone(),
                available,
            })
    }
}

fn decode(account: &AccAddress, bytes: &[u8]) -> Result<Coins, LedgerError> {
    codec::decode(bytes).map_err(|source| LedgerError::Codec {
        account: account.clone(),
        source,
    })
}

impl<S: KvStore> Ledger for BankLedger<S> {
    fn balance(&self, account: &AccAddress) -> Result<Coins, LedgerError> {
        match self.store.get(&balance_key(account))? {
            Some(bytes) => decode(account, &bytes),
            None => Ok(Coins::new()),
        }
    }

    fn transfer(
        &mut self,
        from: &AccAddress,
        to: &AccAddress,
        coins: &Coins,
    ) -> Result<(), LedgerError> {
        let remaining = self.check_debit(from, coins)?;
        if from == to {
            log::trace!("self-transfer of {coins} for {from}");
            return Ok(());
        }
        let credited = self
            .balance(to)?
            .checked_add(coins)
            .ok_or_else(|| LedgerError::Overflow(to.clone()))?;
        self.set_balance(from, &remaining)?;
        self.set_balance(to, &credited)?;
        log::trace!("transferred {coins} from {from} to {to}");
        Ok(())
    }

    fn debit(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError> {
        let remaining = self.check_debit(account, coins)?;
        self.set_balance(account, &remaining)?;
        log::trace!("debited {coins} from {account}");
        Ok(())
    }

    fn credit(&mut self, account: &AccAddress, coins: &Coins) -> Result<(), LedgerError> {
        let credited = self
            .balance(account)?
            .checked_add(coins)
            .ok_or_else(|| LedgerError::Overflow(account.clone()))?;
        self.set_balance(account, &credited)?;
        log::trace!("credited {coins} to {account}");
        Ok(())
    }
}
