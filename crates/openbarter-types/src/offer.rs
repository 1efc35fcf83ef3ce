//! Offer model: a standing, funded proposal to release an amount of an asset
//! (or an item-only proposal) under fixed terms.
//!
//! ## Status machine
//!
//! ```text
//!   ┌────────┐        ┌────────┐
//!   │ ACTIVE │◀──────▶│ PAUSED │
//!   └───┬────┘        └───┬────┘
//!       │    cancel       │
//!       ▼                 ▼
//!   ┌──────────────────────┐
//!   │       CANCELED       │   (terminal)
//!   └──────────────────────┘
//! ```
//!
//! `Canceled` refunds the still-available amount into the balance ledger;
//! the record is retained for audit.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, AssetRef, ItemTerms, OfferId, ids::encode_opt_asset};

/// Lifecycle status of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OfferStatus {
    Unset,
    Active,
    Paused,
    Canceled,
}

impl OfferStatus {
    /// Stable wire byte (matches the event encoding).
    #[must_use]
    pub fn wire_code(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::Active => 1,
            Self::Paused => 2,
            Self::Canceled => 3,
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "UNSET"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// A standing proposal to exchange `total_amount` of `asset` (or an external
/// item) under the embedded terms.
///
/// Amounts are integer smallest-unit quantities. `available_amount` shrinks
/// as bids are accepted; `min_amount`/`max_amount` bound the slice a single
/// bid may claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Creator-chosen nonzero id.
    pub id: OfferId,
    /// The account that owns and funds this offer.
    pub creator: AccountId,
    /// Escrowed asset; `None` for an item-only offer.
    pub asset: Option<AssetRef>,
    /// Total amount escrowed at creation.
    pub total_amount: u128,
    /// Portion not yet claimed by accepted bids.
    pub available_amount: u128,
    /// Smallest slice a bid may claim.
    pub min_amount: u128,
    /// Largest slice a bid may claim.
    pub max_amount: u128,
    /// Time budget granted to the settlement process, in seconds.
    pub order_processing_time: u64,
    /// Current lifecycle status.
    pub status: OfferStatus,
    /// Item and dispute-handling terms.
    pub item: ItemTerms,
}

impl Offer {
    /// Canonical signing payload: every field except the dispute-handler
    /// proof, in fixed order, domain-separated from bid payloads.
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(256 + self.item.item_data.len());
        payload.extend_from_slice(b"openbarter:offer:v1:");
        payload.extend_from_slice(&self.id.0.to_le_bytes());
        payload.extend_from_slice(&self.creator.0);
        encode_opt_asset(self.asset, &mut payload);
        payload.extend_from_slice(&self.total_amount.to_le_bytes());
        payload.extend_from_slice(&self.available_amount.to_le_bytes());
        payload.extend_from_slice(&self.min_amount.to_le_bytes());
        payload.extend_from_slice(&self.max_amount.to_le_bytes());
        payload.extend_from_slice(&self.order_processing_time.to_le_bytes());
        payload.push(self.status.wire_code());
        self.item.encode_into(&mut payload);
        payload
    }

    /// SHA-256 digest of the signing payload. This is what the dispute
    /// handler signs.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.signing_payload()).into()
    }
}

/// Prefill constructor mirroring an all-defaults record. **Test use only.**
#[cfg(any(test, feature = "test-helpers"))]
impl Offer {
    /// An all-zero offer to be filled in field by field.
    #[must_use]
    pub fn prefill() -> Self {
        Self {
            id: OfferId(0),
            creator: AccountId::ZERO,
            asset: None,
            total_amount: 0,
            available_amount: 0,
            min_amount: 0,
            max_amount: 0,
            order_processing_time: 0,
            status: OfferStatus::Unset,
            item: ItemTerms::none(),
        }
    }
}
