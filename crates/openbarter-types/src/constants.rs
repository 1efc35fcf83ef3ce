//! System-wide constants for the OpenBarter engine.

/// Hard cap on offer/bid processing times: 30 days, in seconds.
pub const MAX_ORDER_PROCESSING_TIME_SECS: u64 = 30 * 24 * 60 * 60;

/// Basis-point denominator: 10000 = 100%.
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Expected length of a dispute-handler proof (ed25519 signature).
pub const PROOF_LENGTH: usize = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenBarter";
