//! The bid engine: record ownership and placement-time validation for bids.
//!
//! A bid is validated in two stages. The local stage checks everything the
//! bid states about itself; the offer stage re-checks it against the
//! referenced offer's *current* state — claim bounds move as other bids are
//! accepted, so the up-to-date `available_amount` is what counts.

use std::collections::HashMap;

use openbarter_types::{
    AccountId, Bid, BidId, BidStatus, Offer, Result, StandardError, constants,
};

use crate::{protocol::ProtocolState, signature};

/// Owns all bid records.
#[derive(Debug, Default)]
pub struct BidEngine {
    bids: HashMap<BidId, Bid>,
}

impl BidEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bids: HashMap::new(),
        }
    }

    /// Look up a bid by id.
    #[must_use]
    pub fn get(&self, id: BidId) -> Option<&Bid> {
        self.bids.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: BidId) -> Option<&mut Bid> {
        self.bids.get_mut(&id)
    }

    /// Number of bids ever placed (canceled and accepted ones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    pub(crate) fn insert(&mut self, bid: Bid) {
        self.bids.insert(bid.id, bid);
    }

    /// Stage one: checks that do not need the referenced offer.
    ///
    /// # Errors
    /// `IdTaken`, `Unauthorized`, `TokenBlacklisted`, `BidStatusInvalid`, or
    /// `OrderProcessingTimeInvalid`.
    pub(crate) fn validate_local(
        &self,
        bid: &Bid,
        caller: AccountId,
        protocol: &ProtocolState,
    ) -> Result<()> {
        if bid.id.is_zero() || self.bids.contains_key(&bid.id) {
            return Err(StandardError::IdTaken.into());
        }
        if caller != bid.creator {
            return Err(StandardError::Unauthorized.into());
        }
        if protocol.is_blacklisted(bid.asset) {
            return Err(StandardError::TokenBlacklisted.into());
        }
        if bid.status != BidStatus::Active {
            return Err(StandardError::BidStatusInvalid.into());
        }
        if bid.processing_time > constants::MAX_ORDER_PROCESSING_TIME_SECS {
            return Err(StandardError::OrderProcessingTimeInvalid.into());
        }
        Ok(())
    }

    /// Stage two: checks against the referenced offer's current state.
    ///
    /// # Errors
    /// `AmountInvalid` / `TokenOrItemRequired` for the amount rules,
    /// `DisputeHandlerMismatch` when the offer pins a different handler, the
    /// item-terms errors, or `SignatureInvalid`.
    pub(crate) fn validate_against_offer(
        bid: &Bid,
        offer: &Offer,
        protocol: &ProtocolState,
    ) -> Result<()> {
        Self::validate_amounts(bid, offer)?;

        // The offer's handler, when declared, binds both sides of the trade.
        if !offer.item.dispute_handler.is_zero()
            && bid.item.dispute_handler != offer.item.dispute_handler
        {
            return Err(StandardError::DisputeHandlerMismatch.into());
        }

        let max_fee = protocol.fees().max_dispute_handler_fee_bps;
        bid.item.validate(max_fee)?;
        if !bid.item.dispute_handler.is_zero()
            && !signature::verify(
                &bid.digest(),
                bid.item.dispute_handler,
                &bid.item.dispute_handler_proof,
            )
        {
            return Err(StandardError::SignatureInvalid.into());
        }

        Ok(())
    }

    /// Amount rules: the bidder's own escrow mirrors the offer rules, and the
    /// claimed slice must fit the offer's current window. For an item-only
    /// offer every bound is zero, which forces a zero claim.
    fn validate_amounts(bid: &Bid, offer: &Offer) -> Result<()> {
        if bid.asset.is_some() {
            if bid.token_amount == 0 {
                return Err(StandardError::AmountInvalid.into());
            }
        } else {
            if !bid.item.has_external_item {
                return Err(StandardError::TokenOrItemRequired.into());
            }
            if bid.token_amount != 0 {
                return Err(StandardError::AmountInvalid.into());
            }
        }

        if bid.offer_token_amount < offer.min_amount
            || bid.offer_token_amount > offer.max_amount
            || bid.offer_token_amount > offer.available_amount
        {
            return Err(StandardError::AmountInvalid.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openbarter_types::{AssetId, AssetRef, EngineError, FeeConfig, OfferId, OfferStatus};

    fn protocol() -> ProtocolState {
        ProtocolState::new(AccountId([0xadu8; 32]), FeeConfig::new(25, 500, 2000))
    }

    fn bob() -> AccountId {
        AccountId([2u8; 32])
    }

    fn token_offer() -> Offer {
        let mut offer = Offer::prefill();
        offer.id = OfferId(1);
        offer.creator = AccountId([1u8; 32]);
        offer.status = OfferStatus::Active;
        offer.asset = Some(AssetRef::Token(AssetId([3u8; 32])));
        offer.total_amount = 10;
        offer.available_amount = 10;
        offer.min_amount = 2;
        offer.max_amount = 5;
        offer
    }

    fn item_bid() -> Bid {
        let mut bid = Bid::prefill();
        bid.id = BidId(7);
        bid.offer_id = OfferId(1);
        bid.creator = bob();
        bid.status = BidStatus::Active;
        bid.offer_token_amount = 5;
        bid.item.has_external_item = true;
        bid.item.item_data = vec![0x12, 0x34];
        bid
    }

    fn expect_standard(result: Result<()>, expected: StandardError) {
        match result {
            Err(EngineError::Standard(err)) => assert_eq!(err, expected),
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }

    #[test]
    fn zero_and_duplicate_ids_rejected() {
        let mut engine = BidEngine::new();

        let mut bid = item_bid();
        bid.id = BidId(0);
        expect_standard(
            engine.validate_local(&bid, bob(), &protocol()),
            StandardError::IdTaken,
        );

        engine.insert(item_bid());
        expect_standard(
            engine.validate_local(&item_bid(), bob(), &protocol()),
            StandardError::IdTaken,
        );
    }

    #[test]
    fn creator_must_be_caller() {
        expect_standard(
            BidEngine::new().validate_local(&item_bid(), AccountId([9u8; 32]), &protocol()),
            StandardError::Unauthorized,
        );
    }

    #[test]
    fn initial_status_must_be_active() {
        let mut bid = item_bid();
        bid.status = BidStatus::Unset;
        expect_standard(
            BidEngine::new().validate_local(&bid, bob(), &protocol()),
            StandardError::BidStatusInvalid,
        );
    }

    #[test]
    fn blacklisted_token_rejected() {
        let token = AssetId([4u8; 32]);
        let mut protocol = protocol();
        protocol.set_blacklisted(token, true);
        let mut bid = item_bid();
        bid.asset = Some(AssetRef::Token(token));
        bid.token_amount = 1;
        expect_standard(
            BidEngine::new().validate_local(&bid, bob(), &protocol),
            StandardError::TokenBlacklisted,
        );
    }

    #[test]
    fn processing_time_cap() {
        let mut bid = item_bid();
        bid.processing_time = constants::MAX_ORDER_PROCESSING_TIME_SECS + 1;
        expect_standard(
            BidEngine::new().validate_local(&bid, bob(), &protocol()),
            StandardError::OrderProcessingTimeInvalid,
        );
    }

    #[test]
    fn claim_must_fit_offer_window() {
        let offer = token_offer();

        let mut bid = item_bid();
        bid.offer_token_amount = 6; // above max
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::AmountInvalid,
        );

        bid.offer_token_amount = 1; // below min
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::AmountInvalid,
        );
    }

    #[test]
    fn claim_must_fit_remaining_availability() {
        let mut offer = token_offer();
        offer.available_amount = 3;
        let mut bid = item_bid();
        bid.offer_token_amount = 4;
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::AmountInvalid,
        );
    }

    #[test]
    fn item_only_bid_must_not_escrow() {
        let offer = token_offer();
        let mut bid = item_bid();
        bid.token_amount = 10;
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::AmountInvalid,
        );
    }

    #[test]
    fn item_only_bid_needs_an_item() {
        let offer = token_offer();
        let mut bid = item_bid();
        bid.item.has_external_item = false;
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::TokenOrItemRequired,
        );
    }

    #[test]
    fn funded_bid_needs_nonzero_escrow() {
        let offer = token_offer();
        let mut bid = item_bid();
        bid.asset = Some(AssetRef::Coin);
        bid.token_amount = 0;
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::AmountInvalid,
        );
    }

    #[test]
    fn handler_must_match_offer() {
        let mut offer = token_offer();
        offer.item.dispute_handler = AccountId([5u8; 32]);
        let mut bid = item_bid();
        bid.item.dispute_handler = AccountId([6u8; 32]);
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::DisputeHandlerMismatch,
        );

        // A missing handler on the bid is a mismatch too.
        bid.item.dispute_handler = AccountId::ZERO;
        expect_standard(
            BidEngine::validate_against_offer(&bid, &offer, &protocol()),
            StandardError::DisputeHandlerMismatch,
        );
    }
}
