//! # openbarter-types
//!
//! Shared types, errors, and configuration for the **OpenBarter** escrow and
//! trade-matching engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`AssetId`], [`AssetRef`], [`OfferId`], [`BidId`]
//! - **Offer model**: [`Offer`], [`OfferStatus`]
//! - **Bid model**: [`Bid`], [`BidStatus`]
//! - **Trade terms**: [`ItemTerms`] and its dispute-handler authorization fields
//! - **Configuration**: [`FeeConfig`]
//! - **Events**: [`Event`], [`CreditReason`]
//! - **Errors**: [`StandardError`] (closed taxonomy with `OB_ERR_` codes),
//!   [`EngineError`], [`CustodyError`]
//! - **Wire format**: [`external_data`] — the opaque item payload schema
//! - **Constants**: system-wide limits

pub mod bid;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod external_data;
pub mod ids;
pub mod item;
pub mod offer;

// Re-export all primary types at crate root for ergonomic imports:
//   use openbarter_types::{Offer, Bid, AccountId, StandardError, ...};

pub use bid::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use item::*;
pub use offer::*;

// Constants are accessed via `openbarter_types::constants::FOO`
// (not re-exported to avoid name collisions).
