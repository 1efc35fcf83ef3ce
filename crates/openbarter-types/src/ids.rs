//! Identifiers used throughout OpenBarter.
//!
//! Principals are identified by their raw ed25519 public key. Offer and bid
//! ids are creator-chosen nonzero integers; id `0` is reserved and always
//! rejected, which lets an absent record and an unset field share one
//! representation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A principal: the raw ed25519 public key (32 bytes).
///
/// The all-zero value is the null sentinel — it never corresponds to a usable
/// signing key and marks "no account" in optional fields such as
/// `ItemTerms::dispute_handler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The null sentinel.
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn from_pubkey(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the null sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Reference to a fungible token contract (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// AssetRef
// ---------------------------------------------------------------------------

/// A transferable asset: the native coin or a token contract.
///
/// An offer or bid whose asset is `Option<AssetRef>::None` carries no
/// fungible value at all — it must have an external item instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AssetRef {
    /// The native currency held directly by the engine.
    Coin,
    /// A fungible token moved through the custody collaborator.
    Token(AssetId),
}

impl AssetRef {
    /// The token id, if this is a token reference.
    #[must_use]
    pub fn token(&self) -> Option<AssetId> {
        match self {
            Self::Coin => None,
            Self::Token(id) => Some(*id),
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coin => write!(f, "coin"),
            Self::Token(id) => write!(f, "{id}"),
        }
    }
}

/// Canonical encoding of an optional asset reference for signing payloads.
///
/// Tag byte 0 = none, 1 = coin, 2 = token followed by the 32-byte id. The tag
/// keeps "no asset" and "coin" from ever sharing an encoding.
pub(crate) fn encode_opt_asset(asset: Option<AssetRef>, out: &mut Vec<u8>) {
    match asset {
        None => out.push(0),
        Some(AssetRef::Coin) => out.push(1),
        Some(AssetRef::Token(id)) => {
            out.push(2);
            out.extend_from_slice(&id.0);
        }
    }
}

// ---------------------------------------------------------------------------
// OfferId / BidId
// ---------------------------------------------------------------------------

/// Creator-chosen offer identifier. `0` is reserved and invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OfferId(pub u64);

impl OfferId {
    /// Whether this id is the reserved zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offer:{}", self.0)
    }
}

/// Creator-chosen bid identifier. `0` is reserved and invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BidId(pub u64);

impl BidId {
    /// Whether this id is the reserved zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bid:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
