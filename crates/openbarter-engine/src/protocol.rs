//! Protocol-wide state: admin role, fee configuration, token blacklist, and
//! the global pause gate.
//!
//! Modeled as an explicit value injected into the marketplace at
//! construction, so tests build isolated instances instead of sharing
//! ambient globals.

use std::collections::HashSet;

use openbarter_types::{AccountId, AssetId, AssetRef, EngineError, FeeConfig, StandardError};

/// Configuration and role-check context read by every operation.
#[derive(Debug, Clone)]
pub struct ProtocolState {
    /// The single principal allowed to mutate this state.
    admin: AccountId,
    /// When set, every non-admin mutating operation is rejected.
    paused: bool,
    /// Fee parameters read by offer/bid validation.
    fees: FeeConfig,
    /// Tokens rejected at offer/bid creation. Not retroactive.
    blacklist: HashSet<AssetId>,
}

impl ProtocolState {
    #[must_use]
    pub fn new(admin: AccountId, fees: FeeConfig) -> Self {
        Self {
            admin,
            paused: false,
            fees,
            blacklist: HashSet::new(),
        }
    }

    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    #[must_use]
    pub fn fees(&self) -> &FeeConfig {
        &self.fees
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the referenced asset is a blacklisted token. The coin and
    /// "no asset" are never blacklisted.
    #[must_use]
    pub fn is_blacklisted(&self, asset: Option<AssetRef>) -> bool {
        matches!(asset, Some(AssetRef::Token(token)) if self.blacklist.contains(&token))
    }

    /// Gate for admin-only operations.
    pub(crate) fn ensure_admin(&self, caller: AccountId) -> Result<(), StandardError> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(StandardError::Unauthorized)
        }
    }

    /// Gate applied before every non-admin mutating operation.
    pub(crate) fn ensure_unpaused(&self) -> Result<(), EngineError> {
        if self.paused {
            Err(EngineError::Paused)
        } else {
            Ok(())
        }
    }

    /// Overwrite the pause flag. Setting the current value is not an error.
    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub(crate) fn set_protocol_fee_bps(&mut self, value: u16) {
        self.fees.protocol_fee_bps = value;
    }

    pub(crate) fn set_dispute_handler_fee_commission_bps(&mut self, value: u16) {
        self.fees.dispute_handler_fee_commission_bps = value;
    }

    pub(crate) fn set_max_dispute_handler_fee_bps(&mut self, value: u16) {
        self.fees.max_dispute_handler_fee_bps = value;
    }

    pub(crate) fn set_blacklisted(&mut self, token: AssetId, blacklisted: bool) {
        if blacklisted {
            self.blacklist.insert(token);
        } else {
            self.blacklist.remove(&token);
        }
    }
}
