//! # Launchpad Contract
//!
//! A registry of fixed-price token sales. Each sale admits allowlisted
//! purchases during a bounded window, enforces a hard cap and per-buyer
//! allocations, and releases purchased tokens on a linear vesting schedule
//! after close.
//!
//! | Phase         | Entry Point(s)                                              |
//! |---------------|-------------------------------------------------------------|
//! | Bootstrap     | [`Launchpad::init`]                                         |
//! | Registry      | `set_protocol_fee`, `set_fee_recipient`, `transfer_ownership`, `set_trusted` |
//! | Creation      | [`Launchpad::create_launchpad`]                             |
//! | Setup         | `deposit_tokens`, `set_allowlist_root`, `set_dates`, `validate` |
//! | Sale          | [`Launchpad::buy_tokens`]                                   |
//! | Vesting       | [`Launchpad::claim_tokens`]                                 |
//! | Settlement    | `withdraw_proceeds`, `withdraw_tokens`                      |
//! | Queries       | `get_sale`, `list_sales`, `phase`, `claimable_amount`, …    |
//!
//! ## Architecture
//!
//! Registry logic lives in [`registry`], the per-sale engine in [`sale`],
//! proof checking in [`allowlist`] and time arithmetic in [`vesting`].
//! Storage access is fully delegated to `storage`. This file contains
//! **only** the public entry points.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, BytesN, Env, String, Vec};

pub mod allowlist;
pub mod events;
pub mod registry;
pub mod sale;
mod storage;
mod types;
pub mod vesting;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_registry;

pub use types::{BuyerPosition, FeeConfig, Sale, SaleConfig, SaleParams, SalePhase, SaleState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized          = 1,
    NotInitialized              = 2,
    InvalidProtocolFee          = 3,
    SaleNotFound                = 4,
    InvalidConfiguration        = 5,
    InvalidPrice                = 6,
    InvalidDates                = 7,
    InvalidAmount               = 8,
    SameOperator                = 9,
    AlreadyValidated            = 10,
    NotStarted                  = 11,
    AlreadyEnded                = 12,
    NotEnded                    = 13,
    ZeroValue                   = 14,
    InvalidProof                = 15,
    AmountTooLow                = 16,
    AmountExceedsMaxTokenAmount = 17,
    AmountExceedsHardCap        = 18,
    NotClaimable                = 19,
    NoPurchasedTokens           = 20,
    NoClaimableTokens           = 21,
    NoBalanceToWithdraw         = 22,
    TransferFailed              = 23,
    ArithmeticOverflow          = 24,
}

#[contract]
pub struct Launchpad;

#[contractimpl]
impl Launchpad {
    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────

    /// Initialise the registry with its owner and protocol fee.
    ///
    /// Must be called exactly once after deployment; `owner` must sign.
    pub fn init(env: Env, owner: Address, fee_bps: u32, fee_recipient: Address) -> Result<(), Error> {
        registry::init(&env, &owner, fee_bps, &fee_recipient)
    }

    /// Current registry owner.
    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    /// Fee and recipient that the next created sale will snapshot.
    pub fn fee_config(env: Env) -> Result<FeeConfig, Error> {
        storage::get_fee_config(&env)
    }

    /// Set the fee (basis points, at most 1000) applied to sales created
    /// from now on. Owner only.
    pub fn set_protocol_fee(env: Env, fee_bps: u32) -> Result<(), Error> {
        registry::set_protocol_fee(&env, fee_bps)
    }

    /// Set the fee recipient snapshotted into future sales. Owner only.
    pub fn set_fee_recipient(env: Env, recipient: Address) -> Result<(), Error> {
        registry::set_fee_recipient(&env, &recipient)
    }

    /// Hand the registry to `new_owner`; both parties must sign.
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        registry::transfer_ownership(&env, &new_owner)
    }

    /// Create a sale operated by `operator`, snapshotting the current fee.
    pub fn create_launchpad(env: Env, operator: Address, params: SaleParams) -> Result<u64, Error> {
        registry::create_sale(&env, &operator, params)
    }

    /// Number of sales created; ids run from 0 to `sale_count - 1`.
    pub fn sale_count(env: Env) -> u64 {
        storage::get_sale_count(&env)
    }

    /// Config, state and trusted flag of one sale.
    pub fn get_sale(env: Env, sale_id: u64) -> Result<Sale, Error> {
        registry::get_sale(&env, sale_id)
    }

    /// Sales in id order starting at `offset`. At most 50 per page,
    /// whatever `limit` asks for.
    pub fn list_sales(env: Env, offset: u64, limit: u32) -> Result<Vec<Sale>, Error> {
        registry::list_sales(&env, offset, limit)
    }

    /// Mark a sale as curated. Owner only; no effect on the sale itself.
    pub fn set_trusted(env: Env, sale_id: u64, trusted: bool) -> Result<(), Error> {
        registry::set_trusted(&env, sale_id, trusted)
    }

    /// `false` for unknown sales.
    pub fn is_trusted(env: Env, sale_id: u64) -> bool {
        storage::is_trusted(&env, sale_id)
    }

    // ─────────────────────────────────────────────────────────
    // Sale setup (operator)
    // ─────────────────────────────────────────────────────────

    /// Deposit sale tokens from the operator, raising the hard cap.
    /// Rejected once the sale is validated.
    pub fn deposit_tokens(env: Env, sale_id: u64, amount: i128) -> Result<(), Error> {
        sale::deposit_tokens(&env, sale_id, amount)
    }

    /// Lock the configuration and arm the sale. Allowed once, before the
    /// start date, with a non-zero cap and price and a published root.
    pub fn validate(env: Env, sale_id: u64) -> Result<(), Error> {
        sale::validate(&env, sale_id)
    }

    pub fn set_name(env: Env, sale_id: u64, name: String) -> Result<(), Error> {
        sale::set_name(&env, sale_id, name)
    }

    pub fn transfer_operator(env: Env, sale_id: u64, new_operator: Address) -> Result<(), Error> {
        sale::transfer_operator(&env, sale_id, &new_operator)
    }

    pub fn set_price(env: Env, sale_id: u64, price: i128) -> Result<(), Error> {
        sale::set_price(&env, sale_id, price)
    }

    pub fn set_min_token_buy(env: Env, sale_id: u64, min_token_buy: i128) -> Result<(), Error> {
        sale::set_min_token_buy(&env, sale_id, min_token_buy)
    }

    pub fn set_allowlist_root(env: Env, sale_id: u64, root: BytesN<32>) -> Result<(), Error> {
        sale::set_allowlist_root(&env, sale_id, root)
    }

    pub fn set_release_delay(env: Env, sale_id: u64, release_delay: u64) -> Result<(), Error> {
        sale::set_release_delay(&env, sale_id, release_delay)
    }

    pub fn set_vesting_duration(env: Env, sale_id: u64, vesting_duration: u64) -> Result<(), Error> {
        sale::set_vesting_duration(&env, sale_id, vesting_duration)
    }

    pub fn set_dates(env: Env, sale_id: u64, start_date: u64, end_date: u64) -> Result<(), Error> {
        sale::set_dates(&env, sale_id, start_date, end_date)
    }

    // ─────────────────────────────────────────────────────────
    // Buyers
    // ─────────────────────────────────────────────────────────

    /// Buy tokens for `beneficiary` with `value` payment-token units from
    /// `payer`. `allocation_cap` and `proof` must match the published
    /// allowlist root. Returns the sale-token amount credited.
    pub fn buy_tokens(
        env: Env,
        sale_id: u64,
        payer: Address,
        beneficiary: Address,
        value: i128,
        allocation_cap: i128,
        proof: Vec<BytesN<32>>,
    ) -> Result<i128, Error> {
        sale::buy_tokens(&env, sale_id, &payer, &beneficiary, value, allocation_cap, &proof)
    }

    /// Claim every vested, unclaimed token. Returns the amount sent.
    pub fn claim_tokens(env: Env, sale_id: u64, beneficiary: Address) -> Result<i128, Error> {
        sale::claim_tokens(&env, sale_id, &beneficiary)
    }

    // ─────────────────────────────────────────────────────────
    // Settlement (operator)
    // ─────────────────────────────────────────────────────────

    /// Send proceeds minus the protocol fee to the operator.
    pub fn withdraw_proceeds(env: Env, sale_id: u64) -> Result<i128, Error> {
        sale::withdraw_proceeds(&env, sale_id)
    }

    /// Return unsold sale tokens to the operator.
    pub fn withdraw_tokens(env: Env, sale_id: u64) -> Result<i128, Error> {
        sale::withdraw_tokens(&env, sale_id)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Where the sale sits in its lifecycle at the current ledger time.
    pub fn phase(env: Env, sale_id: u64) -> Result<SalePhase, Error> {
        sale::phase(&env, sale_id)
    }

    /// Validated and `start_date` reached.
    pub fn is_started(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(matches!(
            sale::phase(&env, sale_id)?,
            SalePhase::Open | SalePhase::VestingLocked | SalePhase::Claimable
        ))
    }

    /// Validated and `end_date` reached.
    pub fn is_ended(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(matches!(
            sale::phase(&env, sale_id)?,
            SalePhase::VestingLocked | SalePhase::Claimable
        ))
    }

    /// Release delay over; vested tokens can be claimed.
    pub fn is_claimable(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(sale::phase(&env, sale_id)? == SalePhase::Claimable)
    }

    /// Purchased and claimed totals for `buyer`, zero if they never bought.
    pub fn position(env: Env, sale_id: u64, buyer: Address) -> Result<BuyerPosition, Error> {
        sale::position(&env, sale_id, &buyer)
    }

    pub fn purchased_of(env: Env, sale_id: u64, buyer: Address) -> Result<i128, Error> {
        Ok(sale::position(&env, sale_id, &buyer)?.purchased)
    }

    /// Tokens already transferred out to `buyer`.
    pub fn claimed_of(env: Env, sale_id: u64, buyer: Address) -> Result<i128, Error> {
        Ok(sale::position(&env, sale_id, &buyer)?.claimed)
    }

    /// Vested tokens `buyer` could claim right now.
    pub fn claimable_amount(env: Env, sale_id: u64, buyer: Address) -> Result<i128, Error> {
        sale::claimable_amount(&env, sale_id, &buyer)
    }

    /// Sale tokens the operator could withdraw: the held balance minus
    /// tokens still owed to buyers, never below zero.
    pub fn unsold_tokens(env: Env, sale_id: u64) -> Result<i128, Error> {
        sale::unsold_tokens(&env, sale_id)
    }
}
