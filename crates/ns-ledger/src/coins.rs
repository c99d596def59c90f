use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

static COIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\s*([a-z][a-z0-9]{2,15})$").expect("coin pattern is valid")
});
static DENOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]{2,15}$").expect("denom pattern is valid"));

/// A single denomination amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Multi-denomination amount, kept sorted by denom with one entry per denom.
///
/// Zero entries survive construction and parsing so callers can reject
/// non-positive amounts; arithmetic results never contain them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(BTreeMap<String, u64>);

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(denom: impl Into<String>, amount: u64) -> Self {
        let mut coins = Self::new();
        coins.0.insert(denom.into(), amount);
        coins
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn amount_of(&self, denom: &str) -> u64 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(d, a)| (d.as_str(), *a))
    }

    /// At least one denomination, and every amount strictly above zero.
    pub fn is_positive(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|amount| *amount > 0)
    }

    /// True when `self[d] >= other[d]` for every denom present in either set.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        self.0
            .keys()
            .chain(other.0.keys())
            .all(|denom| self.amount_of(denom) >= other.amount_of(denom))
    }

    /// True when `self` covers `other` in every denomination and exceeds it
    /// in at least one. Neither side may shrink in any denomination.
    pub fn dominates(&self, other: &Coins) -> bool {
        self.is_all_gte(other) && !other.is_all_gte(self)
    }

    /// Component-wise subtraction; `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for (denom, amount) in &other.0 {
            let have = out.get(denom).copied().unwrap_or(0);
            let left = have.checked_sub(*amount)?;
            out.insert(denom.clone(), left);
        }
        Some(Coins(out).normalized())
    }

    /// Component-wise addition; `None` on overflow.
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for (denom, amount) in &other.0 {
            let entry = out.entry(denom.clone()).or_insert(0);
            *entry = entry.checked_add(*amount)?;
        }
        Some(Coins(out).normalized())
    }

    fn normalized(mut self) -> Self {
        self.0.retain(|_, amount| *amount > 0);
        self
    }
}

/// Same rules as the text form: valid denominations, each at most once.
impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinsParseError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        let mut map = BTreeMap::new();
        for coin in coins {
            if !DENOM_RE.is_match(&coin.denom) {
                return Err(CoinsParseError::InvalidDenom(coin.denom));
            }
            insert_unique(&mut map, coin.denom, coin.amount)?;
        }
        Ok(Coins(map))
    }
}

fn insert_unique(
    map: &mut BTreeMap<String, u64>,
    denom: String,
    amount: u64,
) -> Result<(), CoinsParseError> {
    if map.contains_key(&denom) {
        return Err(CoinsParseError::DuplicateDenom(denom));
    }
    map.insert(denom, amount);
    Ok(())
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins
            .0
            .into_iter()
            .map(|(denom, amount)| Coin { denom, amount })
            .collect()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denom, amount) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{amount}{denom}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = CoinsParseError;

    /// Parses `"10nametoken,5atom"`. An empty string is an empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut map = BTreeMap::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let caps = COIN_RE
                .captures(part)
                .ok_or_else(|| CoinsParseError::Malformed(part.to_string()))?;
            let amount: u64 = caps[1]
                .parse()
                .map_err(|_| CoinsParseError::Malformed(part.to_string()))?;
            insert_unique(&mut map, caps[2].to_string(), amount)?;
        }
        Ok(Coins(map))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinsParseError {
    #[error("invalid coin expression '{0}'")]
    Malformed(String),
    #[error("duplicate denomination '{0}'")]
    DuplicateDenom(String),
    #[error("invalid denomination '{0}'")]
    InvalidDenom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(s: &str) -> Coins {
        s.parse().expect("coins")
    }

    #[test]
    fn parse_and_display_sorted() {
        let c = coins("5nametoken, 10atom");
        assert_eq!(c.amount_of("atom"), 10);
        assert_eq!(c.to_string(), "10atom,5nametoken");
        assert!(coins("").is_empty());
        assert!(matches!(
            "5".parse::<Coins>(),
            Err(CoinsParseError::Malformed(_))
        ));
        assert!(matches!(
            "5Nametoken".parse::<Coins>(),
            Err(CoinsParseError::Malformed(_))
        ));
        assert!(matches!(
            "1atom,2atom".parse::<Coins>(),
            Err(CoinsParseError::DuplicateDenom(_))
        ));
    }

    #[test]
    fn positivity() {
        assert!(coins("1atom").is_positive());
        assert!(!coins("0atom").is_positive());
        assert!(!coins("1atom,0nametoken").is_positive());
        assert!(!Coins::new().is_positive());
    }

    #[test]
    fn aggregate_gte_across_denoms() {
        assert!(coins("5nametoken").is_all_gte(&coins("5nametoken")));
        assert!(!coins("5nametoken").is_all_gte(&coins("6nametoken")));
        assert!(coins("5nametoken,1atom").is_all_gte(&coins("5nametoken")));
        // a denom missing on the left counts as zero
        assert!(!coins("5nametoken").is_all_gte(&coins("1atom")));
        assert!(Coins::new().is_all_gte(&Coins::new()));
        assert!(!Coins::new().is_all_gte(&coins("1atom")));
    }

    #[test]
    fn arithmetic_drops_zero_entries() {
        let left = coins("10nametoken,3atom")
            .checked_sub(&coins("10nametoken"))
            .unwrap();
        assert_eq!(left, coins("3atom"));
        assert!(coins("3atom").checked_sub(&coins("4atom")).is_none());
        assert!(coins("3atom").checked_sub(&coins("1nametoken")).is_none());
        assert_eq!(
            coins("3atom").checked_add(&coins("2atom,1nametoken")).unwrap(),
            coins("5atom,1nametoken")
        );
        assert!(Coins::single("atom", u64::MAX)
            .checked_add(&coins("1atom"))
            .is_none());
    }

    #[test]
    fn json_form_is_a_coin_list() {
        let json = serde_json::to_string(&coins("5nametoken,1atom")).unwrap();
        assert_eq!(
            json,
            r#"[{"denom":"atom","amount":1},{"denom":"nametoken","amount":5}]"#
        );
        let back: Coins = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coins("1atom,5nametoken"));
    }

    #[test]
    fn decoding_applies_text_rules() {
        let duplicate = format!(
            r#"[{{"denom":"nametoken","amount":{}}},{{"denom":"nametoken","amount":5}}]"#,
            u64::MAX
        );
        let err = serde_json::from_str::<Coins>(&duplicate).unwrap_err();
        assert!(err.to_string().contains("duplicate denomination"), "{err}");

        for denom in ["", "NT", "Nametoken", "9lives", "x"] {
            let json = format!(r#"[{{"denom":"{denom}","amount":1}}]"#);
            let err = serde_json::from_str::<Coins>(&json).unwrap_err();
            assert!(err.to_string().contains("invalid denomination"), "{denom}: {err}");
        }
        assert_eq!(
            Coins::try_from(vec![Coin::new("atom", 0)]).unwrap().amount_of("atom"),
            0
        );
    }

    #[test]
    fn domination_needs_growth_without_shrinking() {
        assert!(coins("6nametoken").dominates(&coins("5nametoken")));
        assert!(coins("5nametoken,1atom").dominates(&coins("5nametoken")));
        assert!(!coins("5nametoken").dominates(&coins("5nametoken")));
        assert!(!coins("1nametoken,1atom").dominates(&coins("40nametoken")));
        assert!(!coins("8atom").dominates(&coins("7nametoken")));
    }
}
