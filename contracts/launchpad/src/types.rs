//! # Types
//!
//! Shared data structures used across all modules of the launchpad.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A sale is internally stored as separate ledger entries:
//!
//! - [`SaleConfig`] — written at creation and on operator updates only.
//! - [`SaleState`] — written on deposits, purchases, claims and withdrawals.
//! - [`BuyerPosition`] — one small entry per `(sale, buyer)`.
//!
//! A purchase touches only the state entry and one position entry, never the
//! larger config entry. The public API exposes the reconstructed [`Sale`].
//!
//! ### Phase as a derived value
//!
//! [`SalePhase`] is never stored. It is recomputed on every call from the
//! `validated` flag, the configured dates and the ledger timestamp (see
//! [`crate::vesting::phase`]), so a stored flag can never drift from the
//! clock.
//!
//! ```text
//! Unvalidated ──validate──► Pending ──start──► Open ──end──► VestingLocked
//!                                                                 │
//!                                                   end + delay   ▼
//!                                                             Claimable
//! ```

use soroban_sdk::{contracttype, Address, BytesN, String};

use crate::vesting::Timeline;

/// Lifecycle phase of a sale, derived from its dates and the ledger clock.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    /// Created but not yet validated by the operator.
    Unvalidated,
    /// Validated; waiting for `start_date`.
    Pending,
    /// Accepting purchases.
    Open,
    /// Closed; release delay has not elapsed.
    VestingLocked,
    /// Closed; buyers may claim vested tokens.
    Claimable,
}

/// Protocol fee settings owned by the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    /// Fee in basis points out of 10 000.
    pub fee_bps: u32,
    pub fee_recipient: Address,
}

/// Operator-supplied parameters for a new sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleParams {
    pub name: String,
    /// Token being sold.
    pub sale_token: Address,
    /// Token buyers pay with.
    pub payment_token: Address,
    /// Payment-token units per one whole sale token.
    pub price: i128,
    /// Minimum sale-token units per purchase.
    pub min_token_buy: i128,
    pub start_date: u64,
    pub end_date: u64,
    /// Seconds after `end_date` before claiming opens.
    pub release_delay: u64,
    /// Seconds over which claims unlock linearly.
    pub vesting_duration: u64,
}

/// Sale configuration. Immutable fields are fixed at creation; the rest
/// change only through operator entry points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub id: u64,
    pub name: String,
    pub operator: Address,
    pub sale_token: Address,
    pub payment_token: Address,
    /// `10^decimals` of the sale token, read once at creation.
    pub token_unit: i128,
    pub price: i128,
    pub min_token_buy: i128,
    pub start_date: u64,
    pub end_date: u64,
    pub release_delay: u64,
    pub vesting_duration: u64,
    pub allowlist_root: Option<BytesN<32>>,
    /// Snapshot of the registry fee at creation.
    pub fee_bps: u32,
    pub fee_recipient: Address,
}

impl SaleConfig {
    pub fn timeline(&self) -> Timeline {
        Timeline {
            start_date: self.start_date,
            end_date: self.end_date,
            release_delay: self.release_delay,
            vesting_duration: self.vesting_duration,
        }
    }
}

/// Mutable sale accounting.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SaleState {
    /// Sale tokens deposited and available for sale.
    pub total_cap: i128,
    pub total_purchased: i128,
    pub total_claimed: i128,
    /// Sale tokens currently held on behalf of this sale.
    pub token_balance: i128,
    /// Payment tokens collected and not yet withdrawn.
    pub proceeds: i128,
    pub validated: bool,
}

/// A buyer's allocation within one sale.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BuyerPosition {
    pub purchased: i128,
    pub claimed: i128,
}

/// Full view of a sale, reconstructed from config and state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sale {
    pub config: SaleConfig,
    pub state: SaleState,
    /// Curation flag set by the registry owner.
    pub trusted: bool,
}
