//! Deterministic fact encoding and the state root that commits to a whole store.

use std::{fmt, str::FromStr};

use serde::{Serialize, de::DeserializeOwned};
use serde_bytes::ByteBuf;
use sha2::{Digest, Sha256};

use crate::KvPair;

const ROOT_SCHEME: &str = "sha256:";

/// Encode `value` as CBOR with map keys in sorted order.
///
/// Coins and params built from differently ordered maps must persist to the
/// same bytes, otherwise two replicas holding equal state report different roots.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_cbor::Error> {
    let sorted = serde_cbor::value::to_value(value)?;
    serde_cbor::to_vec(&sorted)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_cbor::Error> {
    serde_cbor::from_slice(bytes)
}

/// SHA-256 commitment to a store snapshot, rendered as `sha256:<hex>`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateRoot([u8; 32]);

impl StateRoot {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut root = [0u8; 32];
        root.copy_from_slice(&Sha256::digest(bytes));
        Self(root)
    }

    /// Root of a sorted entry list, as written by [`encode_entries`].
    pub fn of_entries(entries: &[KvPair]) -> Result<Self, serde_cbor::Error> {
        Ok(Self::of_bytes(&encode_entries(entries)?))
    }

    /// Lowercase hex without the scheme, used for snapshot file names.
    pub fn hex_digest(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for StateRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOT_SCHEME}{}", self.hex_digest())
    }
}

impl fmt::Debug for StateRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateRoot({self})")
    }
}

impl FromStr for StateRoot {
    type Err = RootParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digest = s
            .trim()
            .strip_prefix(ROOT_SCHEME)
            .ok_or(RootParseError::UnknownScheme)?;
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digest, &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RootParseError {
    #[error("state root must start with '{ROOT_SCHEME}'")]
    UnknownScheme,
    #[error("state root digest is not 32 hex-encoded bytes: {0}")]
    Digest(#[from] hex::FromHexError),
}

/// Snapshot wire form: a CBOR array of `(key, value)` byte strings.
pub(crate) fn encode_entries(entries: &[KvPair]) -> Result<Vec<u8>, serde_cbor::Error> {
    let pairs: Vec<(&serde_bytes::Bytes, &serde_bytes::Bytes)> = entries
        .iter()
        .map(|(k, v)| (serde_bytes::Bytes::new(k), serde_bytes::Bytes::new(v)))
        .collect();
    serde_cbor::to_vec(&pairs)
}

pub(crate) fn decode_entries(bytes: &[u8]) -> Result<Vec<KvPair>, serde_cbor::Error> {
    let pairs: Vec<(ByteBuf, ByteBuf)> = serde_cbor::from_slice(bytes)?;
    Ok(pairs
        .into_iter()
        .map(|(k, v)| (k.into_vec(), v.into_vec()))
        .collect())
}
