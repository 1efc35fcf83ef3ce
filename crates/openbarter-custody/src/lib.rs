//! # openbarter-custody
//!
//! Fund custody for the OpenBarter engine:
//!
//! 1. **BalanceLedger**: per-(account, asset) withdrawable credit. Refunds and
//!    cancellations credit the ledger instead of pushing funds at the
//!    recipient, so a hostile or unreachable receiver can never block a
//!    cancellation. Owners drain credits on demand.
//! 2. **AssetCustody**: the collaborator contract that actually holds and
//!    moves value — token pulls/payouts and native-coin payouts — plus
//!    [`InMemoryCustody`], an allowance-based reference implementation.
//!
//! All mutations are atomic: either the full operation succeeds or the state
//! is unchanged. Arithmetic is checked; an overflow aborts the operation
//! instead of wrapping.

pub mod custody;
pub mod ledger;

pub use custody::{AssetCustody, CustodyResult, InMemoryCustody};
pub use ledger::{BalanceLedger, LedgerError};
