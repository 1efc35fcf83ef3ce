//! # openbarter-engine
//!
//! The OpenBarter matching engine: offer/bid validation, fund escrow, and
//! signature-based authorization behind a single-writer facade.
//!
//! ## Architecture
//!
//! 1. **ProtocolState**: admin principal, fee configuration, token blacklist,
//!    and the global pause gate — injected at construction, never ambient
//! 2. **OfferBook**: owns offer records, their validation rules, and status
//!    transitions
//! 3. **BidEngine**: owns bid records and matches them against the referenced
//!    offer's current state
//! 4. **EventLog**: append-only audit trail replacing on-chain emission
//! 5. **Marketplace**: the facade serializing every mutating operation
//!
//! ## Operation Flow
//!
//! ```text
//! caller → Marketplace::create_offer / place_bid
//!        → validate (ids, authorization, blacklist, amounts, terms, proof)
//!        → escrow funds (attached coin, ledger credit, or custody pull)
//!        → persist record → append event
//! ```
//!
//! Every operation stages all validation before the first persisted write:
//! a failure leaves no partial state behind. Accepting a bid produces a
//! [`MatchedPair`] — the handoff consumed by the external settlement process.

pub mod bid_engine;
pub mod events;
pub mod marketplace;
pub mod offer_book;
pub mod protocol;
pub mod signature;

pub use bid_engine::BidEngine;
pub use events::{EventLog, Recorded};
pub use marketplace::{Marketplace, MatchedPair};
pub use offer_book::OfferBook;
pub use protocol::ProtocolState;
