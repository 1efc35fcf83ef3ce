//! Shared harness for the engine integration tests.
//!
//! Builds an isolated marketplace over the in-memory custody, with a real
//! ed25519 dispute-handler key so proofs are produced the way clients
//! produce them: fill the record, hash it, sign the digest.

#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use openbarter_custody::InMemoryCustody;
use openbarter_engine::Marketplace;
use openbarter_types::{
    AccountId, AssetId, AssetRef, Bid, BidId, BidStatus, EngineError, FeeConfig, Offer, OfferId,
    OfferStatus, Result, StandardError,
};
use rand::rngs::OsRng;

pub const PROTOCOL_FEE_BPS: u16 = 25;
pub const ESCROW_FEE_COMMISSION_BPS: u16 = 500;
pub const MAX_ESCROW_FEE_BPS: u16 = 2000;

pub struct Harness {
    pub market: Marketplace<InMemoryCustody>,
    pub admin: AccountId,
    pub alice: AccountId,
    pub bob: AccountId,
    /// The dispute handler's signing key.
    pub escrow_key: SigningKey,
    /// The dispute handler's address (verifying key of `escrow_key`).
    pub escrow: AccountId,
}

pub fn harness() -> Harness {
    let admin = AccountId([0xaa; 32]);
    let alice = AccountId([0x01; 32]);
    let bob = AccountId([0x02; 32]);
    let escrow_key = SigningKey::generate(&mut OsRng);
    let escrow = AccountId(escrow_key.verifying_key().to_bytes());
    let market = Marketplace::new(
        admin,
        FeeConfig::new(
            PROTOCOL_FEE_BPS,
            ESCROW_FEE_COMMISSION_BPS,
            MAX_ESCROW_FEE_BPS,
        ),
        InMemoryCustody::new(),
    );
    Harness {
        market,
        admin,
        alice,
        bob,
        escrow_key,
        escrow,
    }
}

impl Harness {
    /// Register a token and fund `owner` with an engine allowance to match.
    pub fn funded_token(&mut self, byte: u8, owner: AccountId, amount: u128) -> AssetId {
        let token = AssetId([byte; 32]);
        let custody = self.market.custody_mut();
        custody.register_token(token);
        custody.mint(token, owner, amount);
        custody.approve(token, owner, amount);
        token
    }

    pub fn sign_offer(&self, offer: &mut Offer) {
        offer.item.dispute_handler_proof =
            self.escrow_key.sign(&offer.digest()).to_bytes().to_vec();
    }

    pub fn sign_bid(&self, bid: &mut Bid) {
        bid.item.dispute_handler_proof = self.escrow_key.sign(&bid.digest()).to_bytes().to_vec();
    }

    /// Item-only offer by `alice`, dispute-handled and signed.
    pub fn item_offer(&self, id: u64) -> Offer {
        let mut offer = Offer::prefill();
        offer.id = OfferId(id);
        offer.creator = self.alice;
        offer.status = OfferStatus::Active;
        offer.order_processing_time = 300;
        offer.item.has_external_item = true;
        offer.item.item_data = vec![0xab, 0xcd];
        offer.item.dispute_handler = self.escrow;
        offer.item.dispute_handler_fee_receiver = self.escrow;
        self.sign_offer(&mut offer);
        offer
    }

    /// Funded offer by `alice`: 10 total, claim window 1..=5.
    pub fn asset_offer(&self, id: u64, asset: AssetRef) -> Offer {
        let mut offer = Offer::prefill();
        offer.id = OfferId(id);
        offer.creator = self.alice;
        offer.status = OfferStatus::Active;
        offer.asset = Some(asset);
        offer.total_amount = 10;
        offer.available_amount = 10;
        offer.min_amount = 1;
        offer.max_amount = 5;
        offer.order_processing_time = 300;
        offer.item.item_data = vec![0xab, 0xcd];
        offer.item.dispute_handler = self.escrow;
        offer.item.dispute_handler_fee_receiver = self.escrow;
        self.sign_offer(&mut offer);
        offer
    }

    /// Item-only bid by `bob` against `offer`, claiming its maximum slice.
    pub fn item_bid(&self, id: u64, offer: &Offer) -> Bid {
        let mut bid = Bid::prefill();
        bid.id = BidId(id);
        bid.offer_id = offer.id;
        bid.creator = self.bob;
        bid.status = BidStatus::Active;
        bid.offer_token_amount = offer.max_amount;
        bid.processing_time = 300;
        bid.item.has_external_item = true;
        bid.item.item_data = vec![0x12, 0x34];
        bid.item.dispute_handler = offer.item.dispute_handler;
        bid.item.dispute_handler_fee_receiver = offer.item.dispute_handler_fee_receiver;
        self.sign_bid(&mut bid);
        bid
    }

    /// Funded bid by `bob` escrowing 100 of `asset` against `offer`.
    pub fn asset_bid(&self, id: u64, offer: &Offer, asset: AssetRef) -> Bid {
        let mut bid = Bid::prefill();
        bid.id = BidId(id);
        bid.offer_id = offer.id;
        bid.creator = self.bob;
        bid.status = BidStatus::Active;
        bid.asset = Some(asset);
        bid.token_amount = 100;
        bid.offer_token_amount = offer.max_amount;
        bid.processing_time = 300;
        bid.item.item_data = vec![0x12, 0x34];
        bid.item.dispute_handler = offer.item.dispute_handler;
        bid.item.dispute_handler_fee_receiver = offer.item.dispute_handler_fee_receiver;
        self.sign_bid(&mut bid);
        bid
    }
}

/// Assert that a result failed with the given taxonomy variant.
pub fn expect_standard<T: std::fmt::Debug>(result: Result<T>, expected: StandardError) {
    match result {
        Err(EngineError::Standard(err)) => assert_eq!(err, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}
