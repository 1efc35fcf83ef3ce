//! Observable events emitted by the engine.
//!
//! Events replace on-chain emission with an explicit append-only audit trail.
//! Shape and ordering relative to state writes are part of the contract: a
//! status change is recorded before the balance credit it triggers.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetId, AssetRef, BidId, BidStatus, OfferId, OfferStatus};

/// Why a balance-ledger entry was credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditReason {
    /// An offer was canceled and its available amount refunded.
    OfferCancel,
    /// A bid was canceled and its escrowed amount refunded.
    BidCancel,
}

impl std::fmt::Display for CreditReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OfferCancel => write!(f, "OFFER_CANCEL"),
            Self::BidCancel => write!(f, "BID_CANCEL"),
        }
    }
}

/// Everything an observer can learn from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    OfferCreated {
        id: OfferId,
        asset: Option<AssetRef>,
        creator: AccountId,
    },
    OfferStatusChanged {
        id: OfferId,
        status: OfferStatus,
    },
    BidPlaced {
        bid_id: BidId,
        offer_id: OfferId,
        creator: AccountId,
    },
    BidStatusChanged {
        id: BidId,
        status: BidStatus,
    },
    BalanceCredited {
        account: AccountId,
        asset: AssetRef,
        reason: CreditReason,
        amount: u128,
        new_balance: u128,
    },
    BalanceWithdrawn {
        account: AccountId,
        asset: AssetRef,
        amount: u128,
        new_balance: u128,
    },
    ProtocolFeePercentageUpdated {
        value: u16,
    },
    DisputeHandlerFeePercentageCommissionUpdated {
        value: u16,
    },
    MaxDisputeHandlerFeePercentageUpdated {
        value: u16,
    },
    TokenBlacklistUpdated {
        token: AssetId,
        blacklisted: bool,
    },
    Paused {
        by: AccountId,
    },
    Unpaused {
        by: AccountId,
    },
}

impl Event {
    /// Event name for log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OfferCreated { .. } => "OfferCreated",
            Self::OfferStatusChanged { .. } => "OfferStatusChanged",
            Self::BidPlaced { .. } => "BidPlaced",
            Self::BidStatusChanged { .. } => "BidStatusChanged",
            Self::BalanceCredited { .. } => "BalanceCredited",
            Self::BalanceWithdrawn { .. } => "BalanceWithdrawn",
            Self::ProtocolFeePercentageUpdated { .. } => "ProtocolFeePercentageUpdated",
            Self::DisputeHandlerFeePercentageCommissionUpdated { .. } => {
                "DisputeHandlerFeePercentageCommissionUpdated"
            }
            Self::MaxDisputeHandlerFeePercentageUpdated { .. } => {
                "MaxDisputeHandlerFeePercentageUpdated"
            }
            Self::TokenBlacklistUpdated { .. } => "TokenBlacklistUpdated",
            Self::Paused { .. } => "Paused",
            Self::Unpaused { .. } => "Unpaused",
        }
    }
}
