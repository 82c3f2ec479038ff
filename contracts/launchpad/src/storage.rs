//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! launchpad:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type        | Description                          |
//! |-------------|-------------|--------------------------------------|
//! | `Owner`     | `Address`   | Registry owner                       |
//! | `FeeConfig` | `FeeConfig` | Current protocol fee and recipient   |
//! | `SaleCount` | `u64`       | Auto-increment sale ID counter       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                   | Type            | Description                  |
//! |-----------------------|-----------------|------------------------------|
//! | `SaleConfig(id)`      | `SaleConfig`    | Sale configuration           |
//! | `SaleState(id)`       | `SaleState`     | Sale accounting              |
//! | `Position(id, addr)`  | `BuyerPosition` | Per-buyer purchased/claimed  |
//! | `Trusted(id)`         | `bool`          | Registry curation flag       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Every sale owns its own keys; no entry is shared between two sales.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{BuyerPosition, FeeConfig, SaleConfig, SaleState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registry owner (Instance).
    Owner,
    /// Protocol fee settings (Instance).
    FeeConfig,
    /// Global auto-increment counter for sale IDs (Instance).
    SaleCount,
    /// Sale configuration keyed by ID (Persistent).
    SaleConfig(u64),
    /// Sale accounting keyed by ID (Persistent).
    SaleState(u64),
    /// Buyer position keyed by sale ID and buyer (Persistent).
    Position(u64, Address),
    /// Registry curation flag keyed by sale ID (Persistent).
    Trusted(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_fee_config(env: &Env, fee: &FeeConfig) {
    env.storage().instance().set(&DataKey::FeeConfig, fee);
    bump_instance(env);
}

pub fn get_fee_config(env: &Env) -> Result<FeeConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FeeConfig)
        .ok_or(Error::NotInitialized)
}

pub fn get_sale_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::SaleCount)
        .unwrap_or(0)
}

/// Reads, increments, and stores the sale counter.
/// Returns the ID to use for the *current* sale (pre-increment value).
pub fn get_and_increment_sale_id(env: &Env) -> Result<u64, Error> {
    let current = get_sale_count(env);
    let next = current.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
    env.storage().instance().set(&DataKey::SaleCount, &next);
    Ok(current)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn save_sale_config(env: &Env, config: &SaleConfig) {
    let key = DataKey::SaleConfig(config.id);
    env.storage().persistent().set(&key, config);
    bump_persistent(env, &key);
}

pub fn load_sale_config(env: &Env, id: u64) -> Result<SaleConfig, Error> {
    let key = DataKey::SaleConfig(id);
    let config: SaleConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::SaleNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

pub fn save_sale_state(env: &Env, id: u64, state: &SaleState) {
    let key = DataKey::SaleState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_sale_state(env: &Env, id: u64) -> Result<SaleState, Error> {
    let key = DataKey::SaleState(id);
    let state: SaleState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::SaleNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Load a buyer's position, defaulting to an empty one.
pub fn load_position(env: &Env, id: u64, buyer: &Address) -> BuyerPosition {
    let key = DataKey::Position(id, buyer.clone());
    match env.storage().persistent().get(&key) {
        Some(position) => {
            bump_persistent(env, &key);
            position
        }
        None => BuyerPosition::default(),
    }
}

pub fn save_position(env: &Env, id: u64, buyer: &Address, position: &BuyerPosition) {
    let key = DataKey::Position(id, buyer.clone());
    env.storage().persistent().set(&key, position);
    bump_persistent(env, &key);
}

pub fn set_trusted(env: &Env, id: u64, trusted: bool) {
    let key = DataKey::Trusted(id);
    env.storage().persistent().set(&key, &trusted);
    bump_persistent(env, &key);
}

pub fn is_trusted(env: &Env, id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Trusted(id))
        .unwrap_or(false)
}
