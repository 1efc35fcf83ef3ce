//! Dispute-handler proof verification.
//!
//! A proof is an ed25519 signature over the canonical digest of the enclosing
//! offer or bid. The declared handler address *is* the verifying key — any
//! holder of the matching private key can authorize terms; no registry is
//! consulted.

use ed25519_dalek::{Signature, VerifyingKey};
use openbarter_types::AccountId;

/// Verify `signature` over `digest` against `expected_signer`.
///
/// Never panics and never errors: a malformed key, a malformed signature, and
/// a failed verification all return `false`. Callers translate `false` into
/// `StandardError::SignatureInvalid`.
#[must_use]
pub fn verify(digest: &[u8; 32], expected_signer: AccountId, signature: &[u8]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(expected_signer.as_bytes()) else {
        return false;
    };
    let Ok(sig) = Signature::from_slice(signature) else {
        return false;
    };
    key.verify_strict(digest, &sig).is_ok()
}
