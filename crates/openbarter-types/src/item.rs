//! Trade terms embedded in every offer and bid.
//!
//! The dispute handler is a capability, not an identity: any holder of the
//! declared key can authorize terms by signing the enclosing record's digest.
//! The engine only checks that the proof verifies against the declared
//! address — there is no handler registry.

use serde::{Deserialize, Serialize};

use crate::{AccountId, StandardError};

/// Item and dispute-handling terms of an offer or bid.
///
/// `dispute_handler_proof` is an ed25519 signature by `dispute_handler` over
/// the canonical digest of the *entire* enclosing record, minus the proof
/// field itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTerms {
    /// Charge the dispute-handler fee even when no dispute is raised.
    pub charge_non_dispute: bool,
    /// The record trades a real-world good or service settled off-ledger.
    pub has_external_item: bool,
    /// Opaque item payload (serialized [`crate::external_data::ExternalData`]).
    pub item_data: Vec<u8>,
    /// Third party authorized to arbitrate; zero = none.
    pub dispute_handler: AccountId,
    /// Where the dispute handler's fee is paid.
    pub dispute_handler_fee_receiver: AccountId,
    /// Dispute-handler fee in basis points.
    pub dispute_handler_fee_bps: u16,
    /// ed25519 signature over the enclosing record's digest.
    pub dispute_handler_proof: Vec<u8>,
}

impl ItemTerms {
    /// Structural validation shared by offer and bid creation.
    ///
    /// Signature verification is not done here — it needs the digest of the
    /// enclosing record and lives with the engine.
    ///
    /// # Errors
    /// - `ItemDataInvalid` if an external item has no payload
    /// - `DisputeHandlerRequired` if an external item has no handler
    /// - `DisputeHandlerFeeReceiverRequired` / `FeeTooHigh` for handler terms
    pub fn validate(&self, max_fee_bps: u16) -> Result<(), StandardError> {
        if self.has_external_item && self.item_data.is_empty() {
            return Err(StandardError::ItemDataInvalid);
        }
        if self.has_external_item && self.dispute_handler.is_zero() {
            return Err(StandardError::DisputeHandlerRequired);
        }
        if !self.dispute_handler.is_zero() {
            if self.dispute_handler_fee_receiver.is_zero() {
                return Err(StandardError::DisputeHandlerFeeReceiverRequired);
            }
            if self.dispute_handler_fee_bps > max_fee_bps {
                return Err(StandardError::FeeTooHigh);
            }
        }
        Ok(())
    }

    /// Canonical encoding for signing payloads. Excludes the proof field.
    ///
    /// `item_data` is length-prefixed so no two payloads can collide through
    /// field boundaries shifting.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(u8::from(self.charge_non_dispute));
        out.push(u8::from(self.has_external_item));
        out.extend_from_slice(&(self.item_data.len() as u64).to_le_bytes());
        out.extend_from_slice(&self.item_data);
        out.extend_from_slice(&self.dispute_handler.0);
        out.extend_from_slice(&self.dispute_handler_fee_receiver.0);
        out.extend_from_slice(&self.dispute_handler_fee_bps.to_le_bytes());
    }

    /// Empty terms: no item, no handler, no proof.
    #[must_use]
    pub fn none() -> Self {
        Self {
            charge_non_dispute: false,
            has_external_item: false,
            item_data: Vec::new(),
            dispute_handler: AccountId::ZERO,
            dispute_handler_fee_receiver: AccountId::ZERO,
            dispute_handler_fee_bps: 0,
            dispute_handler_proof: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_FEE: u16 = 2000;

    fn handler_terms() -> ItemTerms {
        ItemTerms {
            charge_non_dispute: false,
            has_external_item: true,
            item_data: vec![0xab, 0xcd],
            dispute_handler: AccountId([5u8; 32]),
            dispute_handler_fee_receiver: AccountId([6u8; 32]),
            dispute_handler_fee_bps: 100,
            dispute_handler_proof: vec![0u8; 64],
        }
    }

    #[test]
    fn valid_terms_pass() {
        assert!(handler_terms().validate(MAX_FEE).is_ok());
    }

    #[test]
    fn empty_terms_pass() {
        assert!(ItemTerms::none().validate(MAX_FEE).is_ok());
    }

    #[test]
    fn external_item_needs_payload() {
        let mut terms = handler_terms();
        terms.item_data.clear();
        assert_eq!(
            terms.validate(MAX_FEE),
            Err(StandardError::ItemDataInvalid)
        );
    }

    #[test]
    fn external_item_needs_handler() {
        let mut terms = handler_terms();
        terms.dispute_handler = AccountId::ZERO;
        assert_eq!(
            terms.validate(MAX_FEE),
            Err(StandardError::DisputeHandlerRequired)
        );
    }

    #[test]
    fn handler_needs_fee_receiver() {
        let mut terms = handler_terms();
        terms.dispute_handler_fee_receiver = AccountId::ZERO;
        assert_eq!(
            terms.validate(MAX_FEE),
            Err(StandardError::DisputeHandlerFeeReceiverRequired)
        );
    }

    #[test]
    fn fee_cap_is_inclusive() {
        let mut terms = handler_terms();
        terms.dispute_handler_fee_bps = MAX_FEE;
        assert!(terms.validate(MAX_FEE).is_ok());
        terms.dispute_handler_fee_bps = MAX_FEE + 1;
        assert_eq!(terms.validate(MAX_FEE), Err(StandardError::FeeTooHigh));
    }

    #[test]
    fn encoding_excludes_proof() {
        let mut a = handler_terms();
        let mut b = handler_terms();
        b.dispute_handler_proof = vec![9u8; 64];
        let mut enc_a = Vec::new();
        let mut enc_b = Vec::new();
        a.encode_into(&mut enc_a);
        b.encode_into(&mut enc_b);
        assert_eq!(enc_a, enc_b);

        a.dispute_handler_fee_bps += 1;
        enc_a.clear();
        a.encode_into(&mut enc_a);
        assert_ne!(enc_a, enc_b);
    }
}
