//! Error types for the OpenBarter engine.
//!
//! [`StandardError`] is the closed taxonomy shared with external observers:
//! a tagged value, never a free-form string, so callers can branch on cause.
//! Codes use the `OB_ERR_` prefix convention for easy grepping in logs and
//! preserve the wire enumeration order (0–27). Several variants belong to the
//! post-acceptance order/dispute lifecycle, which is a separate component;
//! they are part of the surface but never produced by the matching engine
//! itself.
//!
//! [`EngineError`] wraps the taxonomy with the conditions that are not
//! caller-recoverable business errors: the global pause gate, verbatim
//! custody failures, and checked-arithmetic overflow.

use thiserror::Error;

use crate::AssetId;

/// Closed error taxonomy for all offer/bid/balance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, serde::Serialize, serde::Deserialize)]
pub enum StandardError {
    /// Catch-all for failures with no more specific cause.
    #[error("OB_ERR_00: generic failure")]
    Generic,

    /// The caller is not permitted to perform this operation.
    #[error("OB_ERR_01: caller is not authorized")]
    Unauthorized,

    /// The chosen id is zero or already in use.
    #[error("OB_ERR_02: id is reserved or already taken")]
    IdTaken,

    /// The referenced token is on the blacklist.
    #[error("OB_ERR_03: token is blacklisted")]
    TokenBlacklisted,

    /// The offer is not in a status that permits the operation.
    #[error("OB_ERR_04: offer status invalid")]
    OfferStatusInvalid,

    /// The bid is not in a status that permits the operation.
    #[error("OB_ERR_05: bid status invalid")]
    BidStatusInvalid,

    /// The order is not in a status that permits the operation.
    #[error("OB_ERR_06: order status invalid")]
    OrderStatusInvalid,

    /// An amount field violates the offer/bid amount rules.
    #[error("OB_ERR_07: amount invalid")]
    AmountInvalid,

    /// A record must carry a fungible asset or an external item.
    #[error("OB_ERR_08: token or external item required")]
    TokenOrItemRequired,

    /// The referenced offer does not exist.
    #[error("OB_ERR_09: offer not found")]
    OfferNotFound,

    /// The bid's dispute handler differs from the offer's.
    #[error("OB_ERR_10: dispute handler mismatch")]
    DisputeHandlerMismatch,

    /// The processing time exceeds the global hard cap.
    #[error("OB_ERR_11: order processing time invalid")]
    OrderProcessingTimeInvalid,

    /// The dispute-handler fee exceeds the configured maximum.
    #[error("OB_ERR_12: fee too high")]
    FeeTooHigh,

    /// The external item payload is missing or malformed.
    #[error("OB_ERR_13: item data invalid")]
    ItemDataInvalid,

    /// A required account reference is the null sentinel.
    #[error("OB_ERR_14: account required")]
    AccountRequired,

    /// The trade terms require a dispute handler and none was declared.
    #[error("OB_ERR_15: dispute handler required")]
    DisputeHandlerRequired,

    /// A dispute handler was declared without a fee receiver.
    #[error("OB_ERR_16: dispute handler fee receiver required")]
    DisputeHandlerFeeReceiverRequired,

    /// The dispute-handler proof does not verify against the record digest.
    #[error("OB_ERR_17: signature invalid")]
    SignatureInvalid,

    /// The attached coin payment does not match the escrowed amount.
    #[error("OB_ERR_18: coin deposit rejected")]
    CoinDepositRejected,

    /// Paying out native coin to the recipient failed.
    #[error("OB_ERR_19: coin withdrawal failed")]
    CoinWithdrawalFailed,

    /// The withdrawable credit balance is too low.
    #[error("OB_ERR_20: insufficient balance")]
    InsufficientBalance,

    /// The order is no longer active.
    #[error("OB_ERR_21: order inactive")]
    OrderInactive,

    /// The offer is no longer active.
    #[error("OB_ERR_22: offer inactive")]
    OfferInactive,

    /// The bid was already canceled.
    #[error("OB_ERR_23: bid canceled")]
    BidCanceled,

    /// The bid was already accepted.
    #[error("OB_ERR_24: bid accepted")]
    BidAccepted,

    /// The order is already being processed.
    #[error("OB_ERR_25: order already processing")]
    OrderAlreadyProcessing,

    /// The order's processing deadline has not elapsed yet.
    #[error("OB_ERR_26: processing time not elapsed")]
    ProcessingTimeNotElapsed,

    /// The external item was never paid for.
    #[error("OB_ERR_27: external item not paid")]
    ExternalItemNotPaid,
}

impl StandardError {
    /// Stable wire code of this variant.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Generic => 0,
            Self::Unauthorized => 1,
            Self::IdTaken => 2,
            Self::TokenBlacklisted => 3,
            Self::OfferStatusInvalid => 4,
            Self::BidStatusInvalid => 5,
            Self::OrderStatusInvalid => 6,
            Self::AmountInvalid => 7,
            Self::TokenOrItemRequired => 8,
            Self::OfferNotFound => 9,
            Self::DisputeHandlerMismatch => 10,
            Self::OrderProcessingTimeInvalid => 11,
            Self::FeeTooHigh => 12,
            Self::ItemDataInvalid => 13,
            Self::AccountRequired => 14,
            Self::DisputeHandlerRequired => 15,
            Self::DisputeHandlerFeeReceiverRequired => 16,
            Self::SignatureInvalid => 17,
            Self::CoinDepositRejected => 18,
            Self::CoinWithdrawalFailed => 19,
            Self::InsufficientBalance => 20,
            Self::OrderInactive => 21,
            Self::OfferInactive => 22,
            Self::BidCanceled => 23,
            Self::BidAccepted => 24,
            Self::OrderAlreadyProcessing => 25,
            Self::ProcessingTimeNotElapsed => 26,
            Self::ExternalItemNotPaid => 27,
        }
    }
}

/// Failure reported by the asset-custody collaborator.
///
/// These are surfaced to callers verbatim — the engine cannot reason about
/// their cause and does not translate them into [`StandardError`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum CustodyError {
    /// The referenced token is not a transferable contract.
    #[error("{0} is not a transferable contract")]
    UnknownToken(AssetId),

    /// The engine was not approved to pull this much from the payer.
    #[error("insufficient allowance: needed {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    /// The payer's token balance is too low.
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    /// Moving native coin to the recipient failed.
    #[error("coin transfer failed")]
    CoinTransferFailed,
}

/// Top-level error for every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// All state-mutating operations are globally disabled.
    ///
    /// Modeled apart from [`StandardError`]: the pause gate applies uniformly
    /// before any per-operation validation runs.
    #[error("operations are paused")]
    Paused,

    /// A validation failure from the closed taxonomy. The operation performed
    /// no state mutation.
    #[error(transparent)]
    Standard(#[from] StandardError),

    /// A custody-collaborator failure, surfaced verbatim.
    #[error("custody failure: {0}")]
    Custody(#[from] CustodyError),

    /// Checked balance arithmetic overflowed. This indicates a logic defect
    /// rather than bad input; the operation is aborted.
    #[error("balance arithmetic overflow")]
    Overflow,
}

impl EngineError {
    /// The taxonomy variant, if this is a standard validation failure.
    #[must_use]
    pub fn as_standard(&self) -> Option<StandardError> {
        match self {
            Self::Standard(e) => Some(*e),
            _ => None,
        }
    }
}

/// Crate-wide `Result` alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
