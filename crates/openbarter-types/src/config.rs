//! Fee configuration, owned by protocol governance.
//!
//! Percentages are caller-trusted basis points: setters overwrite the stored
//! value with no bounds checking beyond the representable range.

use serde::{Deserialize, Serialize};

/// Process-wide fee parameters, read by offer/bid validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Protocol fee on settled trades, in basis points.
    pub protocol_fee_bps: u16,
    /// Protocol's cut of the dispute handler's fee, in basis points.
    pub dispute_handler_fee_commission_bps: u16,
    /// Upper bound a dispute handler may charge, in basis points.
    pub max_dispute_handler_fee_bps: u16,
}

impl FeeConfig {
    #[must_use]
    pub fn new(
        protocol_fee_bps: u16,
        dispute_handler_fee_commission_bps: u16,
        max_dispute_handler_fee_bps: u16,
    ) -> Self {
        Self {
            protocol_fee_bps,
            dispute_handler_fee_commission_bps,
            max_dispute_handler_fee_bps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_keeps_fields() {
        let fees = FeeConfig::new(25, 500, 2000);
        assert_eq!(fees.protocol_fee_bps, 25);
        assert_eq!(fees.dispute_handler_fee_commission_bps, 500);
        assert_eq!(fees.max_dispute_handler_fee_bps, 2000);
    }

    #[test]
    fn serde_roundtrip() {
        let fees = FeeConfig::new(25, 500, 2000);
        let json = serde_json::to_string(&fees).unwrap();
        let back: FeeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(fees, back);
    }
}
