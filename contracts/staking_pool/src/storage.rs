//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the pool:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type          | Description                          |
//! |-----------------|---------------|--------------------------------------|
//! | `Config`        | `PoolConfig`  | Admin-controlled configuration       |
//! | `Totals`        | `PoolTotals`  | Lifecycle state + fundraising total  |
//! | `ScheduleCount` | `u32`         | Length of the reward schedule list   |
//! | `StakerCount`   | `u32`         | Number of accounts that ever staked  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type             | Description                         |
//! |----------------------|------------------|-------------------------------------|
//! | `Schedule(i)`        | `RewardSchedule` | Append-only; indices never change   |
//! | `StakeCount(addr)`   | `u32`            | Length of an account's stake list   |
//! | `Stake(addr, i)`     | `StakeRecord`    | One deposit                          |
//! | `Staker(i)`          | `Address`        | Registry used by pool-wide reports  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Stake list compaction
//!
//! Removing a record (full unstake during fundraising) shifts every later
//! record of the same account down by one index. Callers must not cache
//! indices across an unstake.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, String};

use crate::types::{PoolConfig, PoolState, PoolTotals, RewardSchedule, StakeRecord};
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
    /// Pool configuration (Instance).
    Config,
    /// Lifecycle state and fundraising total (Instance).
    Totals,
    /// Number of reward schedules (Instance).
    ScheduleCount,
    /// Number of registered stakers (Instance).
    StakerCount,
    /// Reward schedule by index (Persistent).
    Schedule(u32),
    /// Number of stake records held by an account (Persistent).
    StakeCount(Address),
    /// Stake record by account and index (Persistent).
    Stake(Address, u32),
    /// Staker registry entry by index (Persistent).
    Staker(u32),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Write the default configuration and `Waiting` state for a fresh pool.
pub fn init_pool(env: &Env) {
    let config = PoolConfig {
        name: String::from_str(env, ""),
        description: String::from_str(env, ""),
        staking_token: None,
        token_unit: 1,
        min_stake_value: 0,
        min_fundraising_value: 0,
        max_fundraising_value: 0,
        annual_interest_rate_bp: 0,
        current_token_price: 0,
        stake_while_operating: true,
    };
    let totals = PoolTotals {
        state: PoolState::Waiting,
        total_fundraising_value: 0,
    };
    save_config(env, &config);
    save_totals(env, &totals);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> PoolConfig {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn save_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn load_totals(env: &Env) -> PoolTotals {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Totals)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn save_totals(env: &Env, totals: &PoolTotals) {
    env.storage().instance().set(&DataKey::Totals, totals);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ─────────────────────────────────────────────────────────
// Reward schedules
// ─────────────────────────────────────────────────────────

pub fn schedule_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ScheduleCount)
        .unwrap_or(0)
}

/// Append `schedule` and return its index.
pub fn push_schedule(env: &Env, schedule: &RewardSchedule) -> u32 {
    let index = schedule_count(env);
    let key = DataKey::Schedule(index);
    env.storage().persistent().set(&key, schedule);
    bump_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::ScheduleCount, &(index + 1));
    index
}

pub fn load_schedule(env: &Env, index: u32) -> RewardSchedule {
    let key = DataKey::Schedule(index);
    let schedule: RewardSchedule = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ScheduleNotFound));
    bump_persistent(env, &key);
    schedule
}

// ─────────────────────────────────────────────────────────
// Stake ledger
// ─────────────────────────────────────────────────────────

pub fn stake_count(env: &Env, staker: &Address) -> u32 {
    let key = DataKey::StakeCount(staker.clone());
    let count = env.storage().persistent().get(&key);
    if count.is_some() {
        bump_persistent(env, &key);
    }
    count.unwrap_or(0)
}

fn set_stake_count(env: &Env, staker: &Address, count: u32) {
    let key = DataKey::StakeCount(staker.clone());
    env.storage().persistent().set(&key, &count);
    bump_persistent(env, &key);
}

/// Load the record at `(staker, index)`.
/// Panics with `Error::StakeNotFound` if the index is out of range.
pub fn load_stake(env: &Env, staker: &Address, index: u32) -> StakeRecord {
    let key = DataKey::Stake(staker.clone(), index);
    let record: StakeRecord = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::StakeNotFound));
    bump_persistent(env, &key);
    record
}

pub fn save_stake(env: &Env, staker: &Address, index: u32, record: &StakeRecord) {
    let key = DataKey::Stake(staker.clone(), index);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

/// Append `record` to the staker's list and return its index.
/// First-time stakers are added to the staker registry.
pub fn push_stake(env: &Env, staker: &Address, record: &StakeRecord) -> u32 {
    let count_key = DataKey::StakeCount(staker.clone());
    if !env.storage().persistent().has(&count_key) {
        register_staker(env, staker);
    }
    let index = stake_count(env, staker);
    save_stake(env, staker, index, record);
    set_stake_count(env, staker, index + 1);
    index
}

/// Remove the record at `index`, shifting later records down by one.
pub fn remove_stake(env: &Env, staker: &Address, index: u32) {
    let count = stake_count(env, staker);
    if index >= count {
        panic_with_error!(env, Error::StakeNotFound);
    }
    for i in index..count - 1 {
        let next = load_stake(env, staker, i + 1);
        save_stake(env, staker, i, &next);
    }
    env.storage()
        .persistent()
        .remove(&DataKey::Stake(staker.clone(), count - 1));
    set_stake_count(env, staker, count - 1);
}

// ─────────────────────────────────────────────────────────
// Staker registry
// ─────────────────────────────────────────────────────────

pub fn staker_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::StakerCount)
        .unwrap_or(0)
}

fn register_staker(env: &Env, staker: &Address) {
    let index = staker_count(env);
    let key = DataKey::Staker(index);
    env.storage().persistent().set(&key, staker);
    bump_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::StakerCount, &(index + 1));
}

pub fn load_staker(env: &Env, index: u32) -> Address {
    let key = DataKey::Staker(index);
    let staker: Address = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::StakeNotFound));
    bump_persistent(env, &key);
    staker
}
