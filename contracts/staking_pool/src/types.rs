//! # Types
//!
//! Shared data structures used across all modules of the staking pool.
//!
//! ## Design decisions
//!
//! ### Config / Totals split
//!
//! The pool itself is stored as two separate instance entries:
//!
//! - [`PoolConfig`]: written by admin setters only.
//! - [`PoolTotals`]: written on every stake, unstake, withdrawal and
//!   lifecycle transition.
//!
//! The public API exposes the reconstructed [`PoolDetails`] struct for
//! convenience.
//!
//! ### State as a Finite-State Machine
//!
//! [`PoolState`] follows a strict forward-only lifecycle:
//!
//! ```text
//! Waiting ──► Fundraising ──┬──► Operating ──┬──► OperatingClosed
//!                           │        ▲       └──► OperatingStopped
//!                           ├──► FundraisingLocked
//!                           ├──► FundraisingStopped
//!                           └──► FundraisingFailed
//! ```
//!
//! `FundraisingLocked` is also entered automatically when a stake fills the
//! fundraising ceiling exactly.
//!
//! The transition table lives in [`crate::lifecycle`].

use soroban_sdk::{contracttype, Address, String};

/// Current lifecycle phase of the pool.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolState {
    /// Initial state after `init`; only configuration is possible.
    Waiting,
    /// Deposits are accepted and may be withdrawn penalty-free.
    Fundraising,
    /// The fundraising ceiling was reached; awaiting `start_operating`.
    FundraisingLocked,
    /// Fundraising halted by the admin. Terminal; principal is redeemable.
    FundraisingStopped,
    /// Fundraising declared failed. Terminal; principal is redeemable.
    FundraisingFailed,
    /// Funds are deployed; reward schedules run and rewards are claimable.
    Operating,
    /// Operation completed normally. Terminal.
    OperatingClosed,
    /// Operation halted early. Terminal.
    OperatingStopped,
}

/// Admin-controlled pool configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub name: String,
    pub description: String,
    /// Token custodied by the pool; `None` until the admin sets it.
    pub staking_token: Option<Address>,
    /// `10^decimals` of the staking token, cached when the token is set.
    pub token_unit: i128,
    /// Minimum USD value of a single stake (whole dollars).
    pub min_stake_value: i128,
    /// Fundraising floor in whole dollars. Informational.
    pub min_fundraising_value: i128,
    /// Fundraising ceiling in whole dollars. Zero rejects every stake.
    pub max_fundraising_value: i128,
    /// Annual rate over a 10 000 denominator (`100` is 1%/year).
    pub annual_interest_rate_bp: u32,
    /// Live token price scaled by `PRICE_SCALE`.
    pub current_token_price: i128,
    /// Whether deposits are admitted while `Operating`.
    pub stake_while_operating: bool,
}

/// Small, frequently written pool state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolTotals {
    pub state: PoolState,
    /// Currently staked principal valued at each record's stake-time price,
    /// in `PRICE_SCALE`-scaled USD.
    pub total_fundraising_value: i128,
}

/// Full pool view returned by `get_pool_details`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolDetails {
    pub admin: Address,
    pub name: String,
    pub description: String,
    pub staking_token: Option<Address>,
    pub state: PoolState,
    pub min_stake_value: i128,
    pub min_fundraising_value: i128,
    pub max_fundraising_value: i128,
    pub annual_interest_rate_bp: u32,
    pub current_token_price: i128,
    pub total_fundraising_value: i128,
    pub reward_schedule_count: u32,
    pub stake_while_operating: bool,
}

/// A fixed window whose accrued interest is paid out at a fixed price.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSchedule {
    /// Token price (scaled by `PRICE_SCALE`) used to monetize the window.
    pub payout_price: i128,
    pub start: u64,
    pub end: u64,
}

/// One deposit made by an account, addressed by `(account, index)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    /// Locked token quantity in the token's native units.
    pub amount_staked: i128,
    /// Token price at the moment of staking. Never changes.
    pub price_at_stake: i128,
    /// `amount_staked * price_at_stake / 365`.
    pub daily_interest_base: i128,
    /// Cumulative reward tokens paid out for this record.
    pub claimed_reward: i128,
    /// First reward schedule not yet settled for this record.
    pub pending_schedule_index: u32,
    /// Ledger timestamp of the deposit.
    pub staked_at: u64,
}
