//! Registry: protocol ownership, fee settings, sale creation and curation.
//!
//! The fee rate and recipient are copied into each [`SaleConfig`] when the
//! sale is created. Later changes here never reach existing sales.

use soroban_sdk::{token, Address, Env, Vec};

use crate::events;
use crate::storage;
use crate::types::{FeeConfig, Sale, SaleConfig, SaleParams, SaleState};
use crate::Error;

/// Upper bound for the protocol fee (10%).
pub const MAX_PROTOCOL_FEE_BPS: u32 = 1_000;

/// Largest page returned by [`list_sales`].
pub const MAX_PAGE_SIZE: u32 = 50;

/// Token decimals above this cannot be represented as an `i128` unit.
const MAX_DECIMALS: u32 = 38;

fn check_fee(fee_bps: u32) -> Result<(), Error> {
    if fee_bps > MAX_PROTOCOL_FEE_BPS {
        return Err(Error::InvalidProtocolFee);
    }
    Ok(())
}

/// Load the owner and require its signature.
fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner = storage::get_owner(env)?;
    owner.require_auth();
    Ok(owner)
}

pub fn init(env: &Env, owner: &Address, fee_bps: u32, fee_recipient: &Address) -> Result<(), Error> {
    if storage::is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }
    owner.require_auth();
    check_fee(fee_bps)?;

    storage::set_owner(env, owner);
    storage::set_fee_config(
        env,
        &FeeConfig {
            fee_bps,
            fee_recipient: fee_recipient.clone(),
        },
    );
    Ok(())
}

pub fn set_protocol_fee(env: &Env, fee_bps: u32) -> Result<(), Error> {
    require_owner(env)?;
    check_fee(fee_bps)?;

    let mut fee = storage::get_fee_config(env)?;
    fee.fee_bps = fee_bps;
    storage::set_fee_config(env, &fee);
    events::protocol_fee_updated(env, fee_bps);
    Ok(())
}

pub fn set_fee_recipient(env: &Env, recipient: &Address) -> Result<(), Error> {
    require_owner(env)?;

    let mut fee = storage::get_fee_config(env)?;
    fee.fee_recipient = recipient.clone();
    storage::set_fee_config(env, &fee);
    events::fee_recipient_updated(env, recipient.clone());
    Ok(())
}

pub fn transfer_ownership(env: &Env, new_owner: &Address) -> Result<(), Error> {
    require_owner(env)?;
    new_owner.require_auth();

    storage::set_owner(env, new_owner);
    events::ownership_transferred(env, new_owner.clone());
    Ok(())
}

/// Create a sale operated by `operator` and return its ID.
///
/// IDs are dense and sequential, so `0..sale_count()` enumerates every sale
/// in creation order.
pub fn create_sale(env: &Env, operator: &Address, params: SaleParams) -> Result<u64, Error> {
    operator.require_auth();
    let fee = storage::get_fee_config(env)?;

    if params.price <= 0 {
        return Err(Error::InvalidPrice);
    }
    if params.min_token_buy < 0 {
        return Err(Error::InvalidAmount);
    }
    if params.start_date != 0 && params.end_date != 0 && params.start_date >= params.end_date {
        return Err(Error::InvalidDates);
    }

    let decimals = token::Client::new(env, &params.sale_token).decimals();
    if decimals > MAX_DECIMALS {
        return Err(Error::InvalidConfiguration);
    }
    let token_unit = 10i128
        .checked_pow(decimals)
        .ok_or(Error::ArithmeticOverflow)?;

    let id = storage::get_and_increment_sale_id(env)?;
    let config = SaleConfig {
        id,
        name: params.name,
        operator: operator.clone(),
        sale_token: params.sale_token,
        payment_token: params.payment_token,
        token_unit,
        price: params.price,
        min_token_buy: params.min_token_buy,
        start_date: params.start_date,
        end_date: params.end_date,
        release_delay: params.release_delay,
        vesting_duration: params.vesting_duration,
        allowlist_root: None,
        fee_bps: fee.fee_bps,
        fee_recipient: fee.fee_recipient,
    };

    storage::save_sale_config(env, &config);
    storage::save_sale_state(env, id, &SaleState::default());

    events::sale_created(
        env,
        events::SaleCreated {
            sale_id: id,
            operator: operator.clone(),
            sale_token: config.sale_token.clone(),
            fee_bps: config.fee_bps,
        },
    );
    Ok(id)
}

pub fn get_sale(env: &Env, id: u64) -> Result<Sale, Error> {
    Ok(Sale {
        config: storage::load_sale_config(env, id)?,
        state: storage::load_sale_state(env, id)?,
        trusted: storage::is_trusted(env, id),
    })
}

/// Sales in creation order, starting at `offset`, at most
/// [`MAX_PAGE_SIZE`] per call.
pub fn list_sales(env: &Env, offset: u64, limit: u32) -> Result<Vec<Sale>, Error> {
    let count = storage::get_sale_count(env);
    let end = offset
        .saturating_add(u64::from(limit.min(MAX_PAGE_SIZE)))
        .min(count);

    let mut sales = Vec::new(env);
    for id in offset..end {
        sales.push_back(get_sale(env, id)?);
    }
    Ok(sales)
}

pub fn set_trusted(env: &Env, id: u64, trusted: bool) -> Result<(), Error> {
    require_owner(env)?;
    // Only existing sales carry a flag.
    storage::load_sale_config(env, id)?;

    storage::set_trusted(env, id, trusted);
    events::trusted_set(env, id, trusted);
    Ok(())
}
