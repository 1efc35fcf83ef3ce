//! Wire format of the opaque item payload.
//!
//! Offers and bids carry `item_data` as raw bytes; the engine never parses
//! it. This module documents the JSON schema clients exchange inside those
//! bytes — a note plus optional supply/demand item trees — so integrators and
//! dispute handlers can decode what the parties agreed to trade.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level item payload: free text plus what each side supplies/demands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalData {
    /// Additional text information provided by the creator.
    pub note: String,
    /// What the record's creator supplies, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply: Option<Items>,
    /// What the record's creator demands, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<Items>,
}

impl ExternalData {
    /// Serialize to the byte form stored in `item_data`.
    ///
    /// # Errors
    /// Returns the underlying serializer error.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse the byte form stored in `item_data`.
    ///
    /// # Errors
    /// Returns the underlying parser error on malformed payloads.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// One item, or an and/or combination of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// `{ rule: "and" | "or", values: [...] }`
    Combination(ItemCombination),
    /// A fiat or crypto amount.
    Fungible(FungibleItem),
    /// Anything else with an id and typed properties.
    NonFungible(NonFungibleItem),
}

/// An and/or grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCombination {
    pub rule: CombinationRule,
    pub values: Vec<Items>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinationRule {
    And,
    Or,
}

/// A fungible amount. `value` is hex in the currency's smallest unit
/// (cents, wei, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FungibleItem {
    Fiat {
        /// Currency short code, e.g. "USD".
        currency: String,
        /// Amount in hex, smallest unit.
        value: String,
    },
    Crypto {
        /// Currency short code, e.g. "ETH".
        currency: String,
        /// Amount in hex, smallest unit.
        value: String,
        /// Network code from the registry.
        network: String,
        /// Token address; absent for the network's native currency.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
    },
}

/// A non-fungible item. `kind` is free-form; a shared directory of common
/// kinds keeps clients interoperable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFungibleItem {
    #[serde(rename = "type")]
    pub kind: String,
    /// Unique id of the item.
    pub id: String,
    pub properties: BTreeMap<String, Property>,
}

/// A typed property value. Complex values are encoded as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// utf8 text, "true"/"false", or a hex-encoded number per `kind`.
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Utf8,
    Integer,
    Decimal,
    Boolean,
}
