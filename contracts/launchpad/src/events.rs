//! Contract events consumed by the off-chain indexer.
//!
//! Sale-scoped events use the topic `(symbol, sale_id)`; registry events use
//! `(symbol,)`. Payloads carrying several fields are `#[contracttype]`
//! structs, single-value updates publish the bare value.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol};

pub const CREATED: Symbol = symbol_short!("created");
pub const NAME_SET: Symbol = symbol_short!("name_set");
pub const ROOT_SET: Symbol = symbol_short!("root_set");
pub const DATES_SET: Symbol = symbol_short!("dates_set");
pub const PRICE_SET: Symbol = symbol_short!("price_set");
pub const DELAY_SET: Symbol = symbol_short!("delay_set");
pub const VEST_SET: Symbol = symbol_short!("vest_set");
pub const MIN_SET: Symbol = symbol_short!("min_set");
pub const OPERATOR_SET: Symbol = symbol_short!("op_set");
pub const VALIDATED: Symbol = symbol_short!("validated");
pub const CAP_INCREASED: Symbol = symbol_short!("cap_inc");
pub const PURCHASE: Symbol = symbol_short!("purchase");
pub const CLAIM: Symbol = symbol_short!("claim");
pub const FUNDS_WITHDRAWN: Symbol = symbol_short!("wd_funds");
pub const TOKENS_WITHDRAWN: Symbol = symbol_short!("wd_tokens");
pub const TRUSTED: Symbol = symbol_short!("trusted");
pub const FEE_SET: Symbol = symbol_short!("fee_set");
pub const FEE_RECIPIENT_SET: Symbol = symbol_short!("feerc_set");
pub const OWNER_SET: Symbol = symbol_short!("own_set");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleCreated {
    pub sale_id: u64,
    pub operator: Address,
    pub sale_token: Address,
    pub fee_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatesUpdated {
    pub start_date: u64,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapIncreased {
    pub amount: i128,
    pub total_cap: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchased {
    pub asset: Address,
    pub beneficiary: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensClaimed {
    pub asset: Address,
    pub beneficiary: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub operator: Address,
    pub amount: i128,
    pub fee_recipient: Address,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensWithdrawn {
    pub operator: Address,
    pub amount: i128,
}

pub fn sale_created(env: &Env, event: SaleCreated) {
    env.events().publish((CREATED, event.sale_id), event);
}

pub fn name_updated(env: &Env, sale_id: u64, name: String) {
    env.events().publish((NAME_SET, sale_id), name);
}

pub fn root_updated(env: &Env, sale_id: u64, root: BytesN<32>) {
    env.events().publish((ROOT_SET, sale_id), root);
}

pub fn dates_updated(env: &Env, sale_id: u64, start_date: u64, end_date: u64) {
    env.events().publish(
        (DATES_SET, sale_id),
        DatesUpdated {
            start_date,
            end_date,
        },
    );
}

pub fn price_updated(env: &Env, sale_id: u64, price: i128) {
    env.events().publish((PRICE_SET, sale_id), price);
}

pub fn release_delay_updated(env: &Env, sale_id: u64, release_delay: u64) {
    env.events().publish((DELAY_SET, sale_id), release_delay);
}

pub fn vesting_duration_updated(env: &Env, sale_id: u64, vesting_duration: u64) {
    env.events().publish((VEST_SET, sale_id), vesting_duration);
}

pub fn min_token_buy_updated(env: &Env, sale_id: u64, min_token_buy: i128) {
    env.events().publish((MIN_SET, sale_id), min_token_buy);
}

pub fn operator_transferred(env: &Env, sale_id: u64, operator: Address) {
    env.events().publish((OPERATOR_SET, sale_id), operator);
}

pub fn validated(env: &Env, sale_id: u64, operator: Address) {
    env.events().publish((VALIDATED, sale_id), operator);
}

pub fn cap_increased(env: &Env, sale_id: u64, amount: i128, total_cap: i128) {
    env.events()
        .publish((CAP_INCREASED, sale_id), CapIncreased { amount, total_cap });
}

pub fn tokens_purchased(env: &Env, sale_id: u64, event: TokensPurchased) {
    env.events().publish((PURCHASE, sale_id), event);
}

pub fn tokens_claimed(env: &Env, sale_id: u64, event: TokensClaimed) {
    env.events().publish((CLAIM, sale_id), event);
}

pub fn funds_withdrawn(env: &Env, sale_id: u64, event: FundsWithdrawn) {
    env.events().publish((FUNDS_WITHDRAWN, sale_id), event);
}

pub fn tokens_withdrawn(env: &Env, sale_id: u64, event: TokensWithdrawn) {
    env.events().publish((TOKENS_WITHDRAWN, sale_id), event);
}

pub fn trusted_set(env: &Env, sale_id: u64, trusted: bool) {
    env.events().publish((TRUSTED, sale_id), trusted);
}

pub fn protocol_fee_updated(env: &Env, fee_bps: u32) {
    env.events().publish((FEE_SET,), fee_bps);
}

pub fn fee_recipient_updated(env: &Env, recipient: Address) {
    env.events().publish((FEE_RECIPIENT_SET,), recipient);
}

pub fn ownership_transferred(env: &Env, owner: Address) {
    env.events().publish((OWNER_SET,), owner);
}
