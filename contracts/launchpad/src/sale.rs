//! Sale engine: validation, purchase admission, claims and withdrawals.
//!
//! Every mutating operation follows the same pipeline: load, check, compute
//! the new state, save it, and only then move tokens through
//! [`move_tokens`]. A failed transfer returns [`Error::TransferFailed`],
//! which rolls back the whole invocation including the saved state.

use soroban_sdk::{token, Address, BytesN, Env, String, Vec};

use crate::allowlist;
use crate::events::{self, FundsWithdrawn, TokensClaimed, TokensPurchased, TokensWithdrawn};
use crate::storage;
use crate::types::{BuyerPosition, SaleConfig, SalePhase, SaleState};
use crate::vesting;
use crate::Error;

/// Basis-point denominator for the protocol fee.
pub const BPS_DENOMINATOR: i128 = 10_000;

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// Load a sale's config and require the operator's signature.
fn load_operated(env: &Env, sale_id: u64) -> Result<SaleConfig, Error> {
    let config = storage::load_sale_config(env, sale_id)?;
    config.operator.require_auth();
    Ok(config)
}

fn ensure_not_ended(env: &Env, config: &SaleConfig, sale_id: u64) -> Result<(), Error> {
    let state = storage::load_sale_state(env, sale_id)?;
    if vesting::is_ended(&config.timeline(), state.validated, now(env)) {
        return Err(Error::AlreadyEnded);
    }
    Ok(())
}

fn move_tokens(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    match token::Client::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

// ─────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────

pub fn validate(env: &Env, sale_id: u64) -> Result<(), Error> {
    let config = load_operated(env, sale_id)?;
    let mut state = storage::load_sale_state(env, sale_id)?;

    if state.validated {
        return Err(Error::AlreadyValidated);
    }
    // `now < start_date < end_date` also rules out validating a finished sale.
    let degenerate = state.total_cap <= 0
        || config.price <= 0
        || config.start_date == 0
        || config.allowlist_root.is_none()
        || config.start_date >= config.end_date
        || now(env) >= config.start_date;
    if degenerate {
        return Err(Error::InvalidConfiguration);
    }

    state.validated = true;
    storage::save_sale_state(env, sale_id, &state);
    events::validated(env, sale_id, config.operator);
    Ok(())
}

pub fn phase(env: &Env, sale_id: u64) -> Result<SalePhase, Error> {
    let config = storage::load_sale_config(env, sale_id)?;
    let state = storage::load_sale_state(env, sale_id)?;
    Ok(vesting::phase(&config.timeline(), state.validated, now(env)))
}

/// Pull sale tokens from the operator and add them to the hard cap.
pub fn deposit_tokens(env: &Env, sale_id: u64, amount: i128) -> Result<(), Error> {
    let config = load_operated(env, sale_id)?;
    let mut state = storage::load_sale_state(env, sale_id)?;

    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if state.validated {
        return Err(Error::AlreadyValidated);
    }

    state.total_cap = state
        .total_cap
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    state.token_balance = state
        .token_balance
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    storage::save_sale_state(env, sale_id, &state);

    move_tokens(
        env,
        &config.sale_token,
        &config.operator,
        &env.current_contract_address(),
        amount,
    )?;
    events::cap_increased(env, sale_id, amount, state.total_cap);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Purchase
// ─────────────────────────────────────────────────────────

/// Buy sale tokens for `beneficiary`, paid by `payer`.
///
/// Checks run in a fixed order and the first failure is returned:
/// not started, ended, zero value, allowlist proof, minimum amount,
/// per-buyer allocation, hard cap. Returns the sale-token amount credited.
pub fn buy_tokens(
    env: &Env,
    sale_id: u64,
    payer: &Address,
    beneficiary: &Address,
    value: i128,
    allocation_cap: i128,
    proof: &Vec<BytesN<32>>,
) -> Result<i128, Error> {
    payer.require_auth();

    let config = storage::load_sale_config(env, sale_id)?;
    let mut state = storage::load_sale_state(env, sale_id)?;
    let timeline = config.timeline();
    let now = now(env);

    if !vesting::is_started(&timeline, state.validated, now) {
        return Err(Error::NotStarted);
    }
    if vesting::is_ended(&timeline, state.validated, now) {
        return Err(Error::AlreadyEnded);
    }
    if value <= 0 {
        return Err(Error::ZeroValue);
    }

    // Truncating division rounds in the seller's favour.
    let tokens_out = value
        .checked_mul(config.token_unit)
        .ok_or(Error::ArithmeticOverflow)?
        / config.price;

    let root = config.allowlist_root.as_ref().ok_or(Error::InvalidProof)?;
    if !allowlist::verify_allocation(env, proof, root, beneficiary, allocation_cap) {
        return Err(Error::InvalidProof);
    }
    if tokens_out <= 0 || tokens_out < config.min_token_buy {
        return Err(Error::AmountTooLow);
    }

    let mut position = storage::load_position(env, sale_id, beneficiary);
    let purchased = position
        .purchased
        .checked_add(tokens_out)
        .ok_or(Error::ArithmeticOverflow)?;
    if purchased > allocation_cap {
        return Err(Error::AmountExceedsMaxTokenAmount);
    }
    let total_purchased = state
        .total_purchased
        .checked_add(tokens_out)
        .ok_or(Error::ArithmeticOverflow)?;
    if total_purchased > state.total_cap {
        return Err(Error::AmountExceedsHardCap);
    }

    position.purchased = purchased;
    state.total_purchased = total_purchased;
    state.proceeds = state
        .proceeds
        .checked_add(value)
        .ok_or(Error::ArithmeticOverflow)?;
    storage::save_position(env, sale_id, beneficiary, &position);
    storage::save_sale_state(env, sale_id, &state);

    move_tokens(
        env,
        &config.payment_token,
        payer,
        &env.current_contract_address(),
        value,
    )?;

    events::tokens_purchased(
        env,
        sale_id,
        TokensPurchased {
            asset: config.sale_token,
            beneficiary: beneficiary.clone(),
            amount: tokens_out,
        },
    );
    Ok(tokens_out)
}

// ─────────────────────────────────────────────────────────
// Vesting and claims
// ─────────────────────────────────────────────────────────

pub fn position(env: &Env, sale_id: u64, buyer: &Address) -> Result<BuyerPosition, Error> {
    storage::load_sale_config(env, sale_id)?;
    Ok(storage::load_position(env, sale_id, buyer))
}

pub fn claimable_amount(env: &Env, sale_id: u64, buyer: &Address) -> Result<i128, Error> {
    let config = storage::load_sale_config(env, sale_id)?;
    let state = storage::load_sale_state(env, sale_id)?;
    let position = storage::load_position(env, sale_id, buyer);
    vesting::claimable_amount(
        &config.timeline(),
        state.validated,
        position.purchased,
        position.claimed,
        now(env),
    )
}

/// Transfer every currently vested, unclaimed token to `beneficiary`.
pub fn claim_tokens(env: &Env, sale_id: u64, beneficiary: &Address) -> Result<i128, Error> {
    beneficiary.require_auth();

    let config = storage::load_sale_config(env, sale_id)?;
    let mut state = storage::load_sale_state(env, sale_id)?;
    let timeline = config.timeline();
    let now = now(env);

    if !vesting::is_claimable(&timeline, state.validated, now) {
        return Err(Error::NotClaimable);
    }
    let mut position = storage::load_position(env, sale_id, beneficiary);
    if position.purchased == 0 {
        return Err(Error::NoPurchasedTokens);
    }
    let amount = vesting::claimable_amount(
        &timeline,
        state.validated,
        position.purchased,
        position.claimed,
        now,
    )?;
    if amount == 0 {
        return Err(Error::NoClaimableTokens);
    }

    position.claimed = position
        .claimed
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    state.total_claimed = state
        .total_claimed
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    state.token_balance = state
        .token_balance
        .checked_sub(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    storage::save_position(env, sale_id, beneficiary, &position);
    storage::save_sale_state(env, sale_id, &state);

    move_tokens(
        env,
        &config.sale_token,
        &env.current_contract_address(),
        beneficiary,
        amount,
    )?;

    events::tokens_claimed(
        env,
        sale_id,
        TokensClaimed {
            asset: config.sale_token,
            beneficiary: beneficiary.clone(),
            amount,
        },
    );
    Ok(amount)
}

// ─────────────────────────────────────────────────────────
// Withdrawals
// ─────────────────────────────────────────────────────────

/// Split collected proceeds between the fee recipient and the operator.
/// Returns the operator's share.
pub fn withdraw_proceeds(env: &Env, sale_id: u64) -> Result<i128, Error> {
    let config = load_operated(env, sale_id)?;
    let mut state = storage::load_sale_state(env, sale_id)?;

    if !vesting::is_ended(&config.timeline(), state.validated, now(env)) {
        return Err(Error::NotEnded);
    }

    let balance = state.proceeds;
    let fee = balance
        .checked_mul(i128::from(config.fee_bps))
        .ok_or(Error::ArithmeticOverflow)?
        / BPS_DENOMINATOR;
    let remainder = balance - fee;
    if remainder <= 0 {
        return Err(Error::NoBalanceToWithdraw);
    }

    state.proceeds = 0;
    storage::save_sale_state(env, sale_id, &state);

    let contract = env.current_contract_address();
    if fee > 0 {
        move_tokens(env, &config.payment_token, &contract, &config.fee_recipient, fee)?;
    }
    move_tokens(env, &config.payment_token, &contract, &config.operator, remainder)?;

    events::funds_withdrawn(
        env,
        sale_id,
        FundsWithdrawn {
            operator: config.operator,
            amount: remainder,
            fee_recipient: config.fee_recipient,
            fee,
        },
    );
    Ok(remainder)
}

/// Sale tokens held for this sale beyond what buyers are still owed.
fn unsold(state: &SaleState) -> i128 {
    let owed = state.total_purchased - state.total_claimed;
    (state.token_balance - owed).max(0)
}

pub fn unsold_tokens(env: &Env, sale_id: u64) -> Result<i128, Error> {
    storage::load_sale_config(env, sale_id)?;
    Ok(unsold(&storage::load_sale_state(env, sale_id)?))
}

/// Return unsold sale tokens to the operator. Tokens owed to buyers stay.
pub fn withdraw_tokens(env: &Env, sale_id: u64) -> Result<i128, Error> {
    let config = load_operated(env, sale_id)?;
    let mut state = storage::load_sale_state(env, sale_id)?;

    if !vesting::is_ended(&config.timeline(), state.validated, now(env)) {
        return Err(Error::NotEnded);
    }
    let amount = unsold(&state);
    if amount == 0 {
        return Err(Error::NoBalanceToWithdraw);
    }

    state.token_balance -= amount;
    storage::save_sale_state(env, sale_id, &state);

    move_tokens(
        env,
        &config.sale_token,
        &env.current_contract_address(),
        &config.operator,
        amount,
    )?;

    events::tokens_withdrawn(
        env,
        sale_id,
        TokensWithdrawn {
            operator: config.operator,
            amount,
        },
    );
    Ok(amount)
}

// ─────────────────────────────────────────────────────────
// Operator updates
// ─────────────────────────────────────────────────────────

pub fn set_name(env: &Env, sale_id: u64, name: String) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    config.name = name.clone();
    storage::save_sale_config(env, &config);
    events::name_updated(env, sale_id, name);
    Ok(())
}

pub fn transfer_operator(env: &Env, sale_id: u64, new_operator: &Address) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    if config.operator == *new_operator {
        return Err(Error::SameOperator);
    }
    config.operator = new_operator.clone();
    storage::save_sale_config(env, &config);
    events::operator_transferred(env, sale_id, new_operator.clone());
    Ok(())
}

pub fn set_price(env: &Env, sale_id: u64, price: i128) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    if price <= 0 {
        return Err(Error::InvalidPrice);
    }
    ensure_not_ended(env, &config, sale_id)?;

    config.price = price;
    storage::save_sale_config(env, &config);
    events::price_updated(env, sale_id, price);
    Ok(())
}

pub fn set_min_token_buy(env: &Env, sale_id: u64, min_token_buy: i128) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    if min_token_buy < 0 {
        return Err(Error::InvalidAmount);
    }
    ensure_not_ended(env, &config, sale_id)?;

    config.min_token_buy = min_token_buy;
    storage::save_sale_config(env, &config);
    events::min_token_buy_updated(env, sale_id, min_token_buy);
    Ok(())
}

pub fn set_allowlist_root(env: &Env, sale_id: u64, root: BytesN<32>) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    ensure_not_ended(env, &config, sale_id)?;

    config.allowlist_root = Some(root.clone());
    storage::save_sale_config(env, &config);
    events::root_updated(env, sale_id, root);
    Ok(())
}

pub fn set_release_delay(env: &Env, sale_id: u64, release_delay: u64) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    ensure_not_ended(env, &config, sale_id)?;

    config.release_delay = release_delay;
    storage::save_sale_config(env, &config);
    events::release_delay_updated(env, sale_id, release_delay);
    Ok(())
}

pub fn set_vesting_duration(env: &Env, sale_id: u64, vesting_duration: u64) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    ensure_not_ended(env, &config, sale_id)?;

    config.vesting_duration = vesting_duration;
    storage::save_sale_config(env, &config);
    events::vesting_duration_updated(env, sale_id, vesting_duration);
    Ok(())
}

pub fn set_dates(env: &Env, sale_id: u64, start_date: u64, end_date: u64) -> Result<(), Error> {
    let mut config = load_operated(env, sale_id)?;
    let state = storage::load_sale_state(env, sale_id)?;
    if state.validated {
        return Err(Error::AlreadyValidated);
    }
    if start_date >= end_date {
        return Err(Error::InvalidDates);
    }

    config.start_date = start_date;
    config.end_date = end_date;
    storage::save_sale_config(env, &config);
    events::dates_updated(env, sale_id, start_date, end_date);
    Ok(())
}
