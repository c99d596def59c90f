use ns_ledger::{Coins, CoinsParseError};
use ns_registry::{DEFAULT_PRICE_DENOM, RegistryParams};

pub const PRICE_FLOOR_ENV: &str = "NS_PRICE_FLOOR";
pub const FAUCET_AMOUNT_ENV: &str = "NS_FAUCET_AMOUNT";
/// Coins handed out per faucet request unless overridden.
pub const DEFAULT_FAUCET_AMOUNT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Registry parameters used when genesis does not fix them.
    pub params: RegistryParams,
    /// Faucet configuration (None disables the faucet route).
    pub faucet: Option<FaucetConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaucetConfig {
    pub amount: Coins,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            params: RegistryParams::default(),
            faucet: Some(FaucetConfig {
                amount: Coins::single(DEFAULT_PRICE_DENOM, DEFAULT_FAUCET_AMOUNT),
            }),
        }
    }
}

impl AppConfig {
    /// Defaults with `NS_PRICE_FLOOR` / `NS_FAUCET_AMOUNT` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(PRICE_FLOOR_ENV) {
            let floor = parse_coins(PRICE_FLOOR_ENV, &raw)?;
            // an empty or zero floor would let the first bid be free
            if !floor.is_positive() {
                return Err(ConfigError::NonPositive {
                    var: PRICE_FLOOR_ENV,
                    value: raw,
                });
            }
            config.params.price_floor = floor;
        }
        if let Some(raw) = lookup(FAUCET_AMOUNT_ENV) {
            let amount = parse_coins(FAUCET_AMOUNT_ENV, &raw)?;
            config.faucet = if amount.is_empty() {
                None
            } else if amount.is_positive() {
                Some(FaucetConfig { amount })
            } else {
                return Err(ConfigError::NonPositive {
                    var: FAUCET_AMOUNT_ENV,
                    value: raw,
                });
            };
        }
        Ok(config)
    }
}

fn parse_coins(var: &'static str, raw: &str) -> Result<Coins, ConfigError> {
    raw.parse()
        .map_err(|source| ConfigError::InvalidCoins { var, source })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    InvalidCoins {
        var: &'static str,
        #[source]
        source: CoinsParseError,
    },
    #[error("{var}: amount '{value}' must be positive")]
    NonPositive { var: &'static str, value: String },
}
