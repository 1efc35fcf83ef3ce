//! Bid model: a counter-party's claim against a specific offer.
//!
//! A bid escrows `token_amount` of the bidder's own asset (or none, for an
//! item-only counter-offer) and claims `offer_token_amount` of the offer's
//! asset. `Accepted` is terminal — an accepted bid can no longer be canceled
//! and its funds stay escrowed for the settlement process.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, AssetRef, BidId, ItemTerms, OfferId, ids::encode_opt_asset};

/// Lifecycle status of a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum BidStatus {
    Unset,
    Active,
    Accepted,
    Canceled,
}

impl BidStatus {
    /// Stable wire byte (matches the event encoding).
    #[must_use]
    pub fn wire_code(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::Active => 1,
            Self::Accepted => 2,
            Self::Canceled => 3,
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "UNSET"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// A partial or full acceptance of an offer, funded by the bidder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Creator-chosen nonzero id.
    pub id: BidId,
    /// The offer this bid claims against.
    pub offer_id: OfferId,
    /// The account that owns and funds this bid.
    pub creator: AccountId,
    /// Escrowed asset; `None` for an item-only bid.
    pub asset: Option<AssetRef>,
    /// Amount the bidder escrows, in the bidder's asset.
    pub token_amount: u128,
    /// Portion of the offer's asset being claimed.
    pub offer_token_amount: u128,
    /// Time budget granted to the settlement process, in seconds.
    pub processing_time: u64,
    /// Current lifecycle status.
    pub status: BidStatus,
    /// Item and dispute-handling terms.
    pub item: ItemTerms,
}

impl Bid {
    /// Canonical signing payload: every field except the dispute-handler
    /// proof, in fixed order, domain-separated from offer payloads.
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(256 + self.item.item_data.len());
        payload.extend_from_slice(b"openbarter:bid:v1:");
        payload.extend_from_slice(&self.id.0.to_le_bytes());
        payload.extend_from_slice(&self.offer_id.0.to_le_bytes());
        payload.extend_from_slice(&self.creator.0);
        encode_opt_asset(self.asset, &mut payload);
        payload.extend_from_slice(&self.token_amount.to_le_bytes());
        payload.extend_from_slice(&self.offer_token_amount.to_le_bytes());
        payload.extend_from_slice(&self.processing_time.to_le_bytes());
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
impl Bid {
    /// An all-zero bid to be filled in field by field.
    #[must_use]
    pub fn prefill() -> Self {
        Self {
            id: BidId(0),
            offer_id: OfferId(0),
            creator: AccountId::ZERO,
            asset: None,
            token_amount: 0,
            offer_token_amount: 0,
            processing_time: 0,
            status: BidStatus::Unset,
            item: ItemTerms::none(),
        }
    }
}
