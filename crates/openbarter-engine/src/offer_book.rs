//! The offer book: record ownership and creation-time validation for offers.
//!
//! Validation is staged — nothing here writes state, so a failed check leaves
//! the book untouched. Records are only inserted by the marketplace after
//! funding succeeds, and canceled offers stay in the book for audit.

use std::collections::HashMap;

use openbarter_types::{
    AccountId, Offer, OfferId, OfferStatus, Result, StandardError, constants,
};

use crate::{protocol::ProtocolState, signature};

/// Owns all offer records.
#[derive(Debug, Default)]
pub struct OfferBook {
    offers: HashMap<OfferId, Offer>,
}

impl OfferBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offers: HashMap::new(),
        }
    }

    /// Look up an offer by id.
    #[must_use]
    pub fn get(&self, id: OfferId) -> Option<&Offer> {
        self.offers.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: OfferId) -> Option<&mut Offer> {
        self.offers.get_mut(&id)
    }

    /// Number of offers ever created (canceled ones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub(crate) fn insert(&mut self, offer: Offer) {
        self.offers.insert(offer.id, offer);
    }

    /// Full creation-time validation of a new offer.
    ///
    /// # Errors
    /// One specific [`StandardError`] per violated rule; see the checks in
    /// order below.
    pub(crate) fn validate_new(
        &self,
        offer: &Offer,
        caller: AccountId,
        protocol: &ProtocolState,
    ) -> Result<()> {
        if offer.id.is_zero() || self.offers.contains_key(&offer.id) {
            return Err(StandardError::IdTaken.into());
        }
        if caller != offer.creator {
            return Err(StandardError::Unauthorized.into());
        }
        if protocol.is_blacklisted(offer.asset) {
            return Err(StandardError::TokenBlacklisted.into());
        }
        if offer.status != OfferStatus::Active {
            return Err(StandardError::OfferStatusInvalid.into());
        }
        if offer.order_processing_time > constants::MAX_ORDER_PROCESSING_TIME_SECS {
            return Err(StandardError::OrderProcessingTimeInvalid.into());
        }

        Self::validate_amounts(offer)?;

        let max_fee = protocol.fees().max_dispute_handler_fee_bps;
        offer.item.validate(max_fee)?;
        if !offer.item.dispute_handler.is_zero()
            && !signature::verify(
                &offer.digest(),
                offer.item.dispute_handler,
                &offer.item.dispute_handler_proof,
            )
        {
            return Err(StandardError::SignatureInvalid.into());
        }

        Ok(())
    }

    /// Amount rules: an item-only offer carries no amounts at all; a funded
    /// offer starts fully available with a sane `min..=max` claim window.
    fn validate_amounts(offer: &Offer) -> Result<()> {
        if offer.asset.is_some() {
            if offer.total_amount == 0
                || offer.available_amount != offer.total_amount
                || offer.min_amount == 0
                || offer.min_amount > offer.max_amount
                || offer.max_amount > offer.total_amount
            {
                return Err(StandardError::AmountInvalid.into());
            }
        } else {
            if !offer.item.has_external_item {
                return Err(StandardError::TokenOrItemRequired.into());
            }
            if offer.total_amount != 0
                || offer.available_amount != 0
                || offer.min_amount != 0
                || offer.max_amount != 0
            {
                return Err(StandardError::AmountInvalid.into());
            }
        }
        Ok(())
    }
}
