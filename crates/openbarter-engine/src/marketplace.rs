//! The marketplace facade.
//!
//! Every mutating operation runs to completion with no interleaving — the
//! equivalent of a global lock around the whole ledger. Each operation stages
//! all validation before the first persisted write; custody calls are
//! synchronous and atomic with the surrounding state change, so a failed
//! transfer leaves nothing behind (including the id reservation).
//!
//! Admin operations stay available while paused; everything else fails with
//! [`EngineError::Paused`] first.

use openbarter_custody::{AssetCustody, BalanceLedger, LedgerError};
use openbarter_types::{
    AccountId, AssetId, AssetRef, Bid, BidId, BidStatus, CreditReason, EngineError, Event,
    FeeConfig, Offer, OfferId, OfferStatus, Result, StandardError,
};

use crate::{
    bid_engine::BidEngine,
    events::{EventLog, Recorded},
    offer_book::OfferBook,
    protocol::ProtocolState,
};

/// An accepted (offer, bid) pair, snapshotted after the acceptance writes.
///
/// This is the sole handoff between the matching engine and settlement: a
/// correctly-funded, terms-agreed pair for the external order process to
/// consume and eventually resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub offer: Offer,
    pub bid: Bid,
}

/// The engine: offer book, bid engine, balance ledger, custody, protocol
/// state, and the audit trail behind one single-writer surface.
pub struct Marketplace<C: AssetCustody> {
    protocol: ProtocolState,
    offers: OfferBook,
    bids: BidEngine,
    ledger: BalanceLedger,
    custody: C,
    events: EventLog,
}

impl<C: AssetCustody> Marketplace<C> {
    /// Build an isolated engine instance with the given admin principal, fee
    /// configuration, and custody collaborator.
    #[must_use]
    pub fn new(admin: AccountId, fees: FeeConfig, custody: C) -> Self {
        Self {
            protocol: ProtocolState::new(admin, fees),
            offers: OfferBook::new(),
            bids: BidEngine::new(),
            ledger: BalanceLedger::new(),
            custody,
            events: EventLog::new(),
        }
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    #[must_use]
    pub fn offer(&self, id: OfferId) -> Option<&Offer> {
        self.offers.get(id)
    }

    #[must_use]
    pub fn bid(&self, id: BidId) -> Option<&Bid> {
        self.bids.get(id)
    }

    /// Withdrawable credit for an (account, asset) pair.
    #[must_use]
    pub fn balance(&self, account: AccountId, asset: AssetRef) -> u128 {
        self.ledger.balance(account, asset)
    }

    /// The audit trail, oldest entry first.
    #[must_use]
    pub fn events(&self) -> &[Recorded] {
        self.events.entries()
    }

    #[must_use]
    pub fn protocol(&self) -> &ProtocolState {
        &self.protocol
    }

    #[must_use]
    pub fn custody(&self) -> &C {
        &self.custody
    }

    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    // ------------------------------------------------------------------
    // Offers
    // ------------------------------------------------------------------

    /// Create and fund an offer.
    ///
    /// `payment` is the native coin attached to the request; it must equal
    /// the escrowed amount exactly for a coin offer and be zero otherwise.
    /// With `use_balance`, funding is drawn from the creator's ledger credit
    /// instead of a fresh transfer.
    ///
    /// # Errors
    /// A [`StandardError`] for each violated validation rule; custody
    /// failures propagate verbatim.
    pub fn create_offer(
        &mut self,
        caller: AccountId,
        offer: Offer,
        use_balance: bool,
        payment: u128,
    ) -> Result<()> {
        self.protocol.ensure_unpaused()?;
        self.offers.validate_new(&offer, caller, &self.protocol)?;
        self.escrow(caller, offer.asset, offer.total_amount, use_balance, payment)?;

        let (id, asset, creator) = (offer.id, offer.asset, offer.creator);
        self.offers.insert(offer);
        tracing::info!(%id, %creator, "offer created");
        self.events.record(Event::OfferCreated { id, asset, creator });
        Ok(())
    }

    /// Pause, reactivate, or cancel an offer. Cancellation refunds the
    /// still-available amount into the creator's ledger credit.
    ///
    /// # Errors
    /// `OfferStatusInvalid` for an `Unset` target, `OfferNotFound`,
    /// `Unauthorized`, or `OfferInactive` once canceled.
    pub fn update_offer_status(
        &mut self,
        caller: AccountId,
        id: OfferId,
        status: OfferStatus,
    ) -> Result<()> {
        self.protocol.ensure_unpaused()?;
        if status == OfferStatus::Unset {
            return Err(StandardError::OfferStatusInvalid.into());
        }

        let offer = self
            .offers
            .get_mut(id)
            .ok_or(StandardError::OfferNotFound)?;
        if offer.creator != caller {
            return Err(StandardError::Unauthorized.into());
        }
        if offer.status == OfferStatus::Canceled {
            return Err(StandardError::OfferInactive.into());
        }

        offer.status = status;
        let refund = if status == OfferStatus::Canceled {
            // Any already-matched portion stays escrowed for its order; only
            // the unclaimed remainder comes back.
            let refund = offer
                .asset
                .map(|asset| (asset, offer.available_amount))
                .filter(|(_, amount)| *amount > 0);
            offer.available_amount = 0;
            refund
        } else {
            None
        };
        let creator = offer.creator;

        tracing::info!(%id, %status, "offer status changed");
        self.events.record(Event::OfferStatusChanged { id, status });
        if let Some((asset, amount)) = refund {
            self.credit(creator, asset, amount, CreditReason::OfferCancel)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Bids
    // ------------------------------------------------------------------

    /// Place and fund a bid against an existing active offer.
    ///
    /// # Errors
    /// A [`StandardError`] per violated rule, including `OfferNotFound` /
    /// `OfferStatusInvalid` for the referenced offer; custody failures
    /// propagate verbatim.
    pub fn place_bid(
        &mut self,
        caller: AccountId,
        bid: Bid,
        use_balance: bool,
        payment: u128,
    ) -> Result<()> {
        self.protocol.ensure_unpaused()?;
        self.bids.validate_local(&bid, caller, &self.protocol)?;

        let offer = self
            .offers
            .get(bid.offer_id)
            .ok_or(StandardError::OfferNotFound)?;
        if offer.status != OfferStatus::Active {
            return Err(StandardError::OfferStatusInvalid.into());
        }
        BidEngine::validate_against_offer(&bid, offer, &self.protocol)?;

        self.escrow(caller, bid.asset, bid.token_amount, use_balance, payment)?;

        let (bid_id, offer_id, creator) = (bid.id, bid.offer_id, bid.creator);
        self.bids.insert(bid);
        tracing::info!(%bid_id, %offer_id, %creator, "bid placed");
        self.events.record(Event::BidPlaced {
            bid_id,
            offer_id,
            creator,
        });
        Ok(())
    }

    /// Cancel an active bid and refund its escrow into the creator's ledger
    /// credit.
    ///
    /// # Errors
    /// `BidStatusInvalid` for an unknown, canceled, or accepted bid;
    /// `Unauthorized` for anyone but the creator.
    pub fn cancel_bid(&mut self, caller: AccountId, id: BidId) -> Result<()> {
        self.protocol.ensure_unpaused()?;

        let bid = self.bids.get_mut(id).ok_or(StandardError::BidStatusInvalid)?;
        if bid.creator != caller {
            return Err(StandardError::Unauthorized.into());
        }
        if bid.status != BidStatus::Active {
            return Err(StandardError::BidStatusInvalid.into());
        }

        bid.status = BidStatus::Canceled;
        let refund = bid
            .asset
            .map(|asset| (asset, bid.token_amount))
            .filter(|(_, amount)| *amount > 0);
        let creator = bid.creator;

        tracing::info!(%id, "bid canceled");
        self.events.record(Event::BidStatusChanged {
            id,
            status: BidStatus::Canceled,
        });
        if let Some((asset, amount)) = refund {
            self.credit(creator, asset, amount, CreditReason::BidCancel)?;
        }
        Ok(())
    }

    /// Accept an active bid (offer creator only) and hand the matched pair to
    /// the external order process.
    ///
    /// This is the sole mutation boundary between matching and settlement:
    /// the offer's availability shrinks by the claimed slice, the bid becomes
    /// terminal, and both escrows stay put for the order to consume.
    ///
    /// # Errors
    /// `BidStatusInvalid`, `OfferNotFound`, `Unauthorized`,
    /// `OfferStatusInvalid`, or `AmountInvalid` when the claim no longer fits
    /// the remaining availability.
    pub fn accept_bid(&mut self, caller: AccountId, id: BidId) -> Result<MatchedPair> {
        self.protocol.ensure_unpaused()?;

        let (offer_id, claim) = {
            let bid = self.bids.get(id).ok_or(StandardError::BidStatusInvalid)?;
            if bid.status != BidStatus::Active {
                return Err(StandardError::BidStatusInvalid.into());
            }
            (bid.offer_id, bid.offer_token_amount)
        };
        {
            let offer = self
                .offers
                .get(offer_id)
                .ok_or(StandardError::OfferNotFound)?;
            if offer.creator != caller {
                return Err(StandardError::Unauthorized.into());
            }
            if offer.status != OfferStatus::Active {
                return Err(StandardError::OfferStatusInvalid.into());
            }
            if claim > offer.available_amount {
                return Err(StandardError::AmountInvalid.into());
            }
        }

        // All checks passed; apply both writes.
        let offer = self
            .offers
            .get_mut(offer_id)
            .ok_or(StandardError::OfferNotFound)?;
        offer.available_amount = offer
            .available_amount
            .checked_sub(claim)
            .ok_or(EngineError::Overflow)?;
        let offer_snapshot = offer.clone();

        let bid = self.bids.get_mut(id).ok_or(StandardError::BidStatusInvalid)?;
        bid.status = BidStatus::Accepted;
        let bid_snapshot = bid.clone();

        tracing::info!(%id, %offer_id, claim, "bid accepted");
        self.events.record(Event::BidStatusChanged {
            id,
            status: BidStatus::Accepted,
        });
        Ok(MatchedPair {
            offer: offer_snapshot,
            bid: bid_snapshot,
        })
    }

    // ------------------------------------------------------------------
    // Balance withdrawal
    // ------------------------------------------------------------------

    /// Drain withdrawable credit back to its owner.
    ///
    /// The payout runs before the ledger debit: a failed payout leaves the
    /// credit untouched.
    ///
    /// # Errors
    /// `AmountInvalid` for a zero amount, `InsufficientBalance`,
    /// `CoinWithdrawalFailed` for a failed coin payout; token payout failures
    /// propagate verbatim.
    pub fn withdraw(&mut self, caller: AccountId, asset: AssetRef, amount: u128) -> Result<()> {
        self.protocol.ensure_unpaused()?;
        if amount == 0 {
            return Err(StandardError::AmountInvalid.into());
        }
        if self.ledger.balance(caller, asset) < amount {
            return Err(StandardError::InsufficientBalance.into());
        }

        match asset {
            AssetRef::Coin => self
                .custody
                .pay_coin(caller, amount)
                .map_err(|_| StandardError::CoinWithdrawalFailed)?,
            AssetRef::Token(token) => self.custody.transfer_out(token, caller, amount)?,
        }

        let new_balance = self.ledger_debit(caller, asset, amount)?;
        tracing::info!(%caller, %asset, amount, "balance withdrawn");
        self.events.record(Event::BalanceWithdrawn {
            account: caller,
            asset,
            amount,
            new_balance,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin surface
    // ------------------------------------------------------------------

    /// Overwrite the protocol fee (basis points). Admin only.
    pub fn set_protocol_fee_percentage(&mut self, caller: AccountId, value: u16) -> Result<()> {
        self.protocol.ensure_admin(caller)?;
        self.protocol.set_protocol_fee_bps(value);
        self.events
            .record(Event::ProtocolFeePercentageUpdated { value });
        Ok(())
    }

    /// Overwrite the protocol's cut of dispute-handler fees. Admin only.
    pub fn set_dispute_handler_fee_percentage_commission(
        &mut self,
        caller: AccountId,
        value: u16,
    ) -> Result<()> {
        self.protocol.ensure_admin(caller)?;
        self.protocol.set_dispute_handler_fee_commission_bps(value);
        self.events
            .record(Event::DisputeHandlerFeePercentageCommissionUpdated { value });
        Ok(())
    }

    /// Overwrite the dispute-handler fee cap. Admin only.
    pub fn set_max_dispute_handler_fee_percentage(
        &mut self,
        caller: AccountId,
        value: u16,
    ) -> Result<()> {
        self.protocol.ensure_admin(caller)?;
        self.protocol.set_max_dispute_handler_fee_bps(value);
        self.events
            .record(Event::MaxDisputeHandlerFeePercentageUpdated { value });
        Ok(())
    }

    /// Add or remove a token from the blacklist. Admin only, not retroactive.
    pub fn set_token_blacklisted(
        &mut self,
        caller: AccountId,
        token: AssetId,
        blacklisted: bool,
    ) -> Result<()> {
        self.protocol.ensure_admin(caller)?;
        self.protocol.set_blacklisted(token, blacklisted);
        self.events
            .record(Event::TokenBlacklistUpdated { token, blacklisted });
        Ok(())
    }

    /// Disable all non-admin mutating operations. Admin only; repeated calls
    /// leave the state unchanged and do not error.
    pub fn pause(&mut self, caller: AccountId) -> Result<()> {
        self.protocol.ensure_admin(caller)?;
        self.protocol.set_paused(true);
        tracing::warn!(%caller, "operations paused");
        self.events.record(Event::Paused { by: caller });
        Ok(())
    }

    /// Re-enable mutating operations. Admin only.
    pub fn unpause(&mut self, caller: AccountId) -> Result<()> {
        self.protocol.ensure_admin(caller)?;
        self.protocol.set_paused(false);
        tracing::info!(%caller, "operations resumed");
        self.events.record(Event::Unpaused { by: caller });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Funding internals
    // ------------------------------------------------------------------

    /// Move the escrowed amount into the engine, from whichever source the
    /// caller chose. Runs after all validation and before any persisted
    /// write, so its failures abort the operation cleanly.
    fn escrow(
        &mut self,
        from: AccountId,
        asset: Option<AssetRef>,
        amount: u128,
        use_balance: bool,
        payment: u128,
    ) -> Result<()> {
        let Some(asset) = asset else {
            // Item-only: nothing to escrow, and stray coin is refused rather
            // than silently kept.
            if payment != 0 {
                return Err(StandardError::CoinDepositRejected.into());
            }
            return Ok(());
        };

        match asset {
            AssetRef::Coin => {
                if use_balance {
                    if payment != 0 {
                        return Err(StandardError::CoinDepositRejected.into());
                    }
                    self.ledger_debit(from, asset, amount)?;
                } else if payment != amount {
                    return Err(StandardError::CoinDepositRejected.into());
                }
            }
            AssetRef::Token(token) => {
                if payment != 0 {
                    return Err(StandardError::CoinDepositRejected.into());
                }
                if use_balance {
                    self.ledger_debit(from, asset, amount)?;
                } else {
                    self.custody.transfer_in(token, from, amount)?;
                }
            }
        }
        Ok(())
    }

    fn ledger_debit(&mut self, account: AccountId, asset: AssetRef, amount: u128) -> Result<u128> {
        self.ledger.debit(account, asset, amount).map_err(|err| match err {
            LedgerError::Insufficient { .. } => StandardError::InsufficientBalance.into(),
            LedgerError::Overflow => EngineError::Overflow,
        })
    }

    /// Credit the ledger and append the matching event.
    fn credit(
        &mut self,
        account: AccountId,
        asset: AssetRef,
        amount: u128,
        reason: CreditReason,
    ) -> Result<()> {
        let new_balance = self
            .ledger
            .credit(account, asset, amount)
            .map_err(|_| EngineError::Overflow)?;
        self.events.record(Event::BalanceCredited {
            account,
            asset,
            reason,
            amount,
            new_balance,
        });
        Ok(())
    }
}
