//! # Staking Pool Contract
//!
//! An escrow-style staking pool. Depositors stake a fungible token while the
//! pool is fundraising, the admin declares time-boxed reward schedules that
//! fix a payout price for each window, and depositors later claim interest
//! and redeem principal at the token price prevailing at withdrawal time.
//!
//! | Phase          | Entry Point(s)                                              |
//! |----------------|-------------------------------------------------------------|
//! | Bootstrap      | [`StakingPool::init`]                                       |
//! | Admin          | `change_admin`, `set_*`, `update_token_price`, `transfer_staking_token` |
//! | Lifecycle      | `start_fundraising`, `lock_fundraising`, `start_operating`, `stop_fundraising`, `fail_fundraising`, `close_operating`, `stop_operating` |
//! | Rewards        | `add_reward_schedule`, `claim_reward`                       |
//! | Staking        | [`StakingPool::stake`], [`StakingPool::unstake`]            |
//! | Exit           | [`StakingPool::withdraw_all_principal`]                     |
//! | Queries        | `calculate_*`, `get_*`, `state`, `admin`                    |
//!
//! ## Architecture
//!
//! Authorization is delegated to [`access`], the lifecycle table to
//! [`lifecycle`], reward arithmetic to [`accrual`] and storage to
//! `storage`. This file holds the entry points, the ordering of checks,
//! effects and token transfers, and event emissions.
//!
//! Every entry point that moves tokens updates the ledger before calling the
//! token contract.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, log, panic_with_error, symbol_short, token, Address,
    Env, String, Symbol,
};

pub mod accrual;
pub mod access;
pub mod events;
pub mod lifecycle;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use lifecycle::Transition;
pub use types::{PoolConfig, PoolDetails, PoolState, PoolTotals, RewardSchedule, StakeRecord};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 1,
    AlreadyInitialized = 2,
    NotInitialized = 3,
    NotWaiting = 4,
    NotFundraising = 5,
    NotFundraisingOrLocked = 6,
    NotOperating = 7,
    StakingNotAllowed = 8,
    UnstakingNotAllowed = 9,
    ScheduleNotAllowed = 10,
    ClaimNotAllowed = 11,
    WithdrawNotAllowed = 12,
    InvalidAmount = 13,
    BelowMinimumStake = 14,
    ExceedsMaxFundraising = 15,
    InsufficientStake = 16,
    InvalidPrice = 17,
    InvalidSchedule = 18,
    InvalidFundraisingBounds = 19,
    UnclaimedRewards = 20,
    NoRewardAvailable = 21,
    NothingToWithdraw = 22,
    StakeNotFound = 23,
    ScheduleNotFound = 24,
    TokenNotSet = 25,
    PriceNotSet = 26,
    Overflow = 27,
}

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the pool in the `Waiting` state and set its admin.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address) {
        admin.require_auth();
        access::init_admin(&env, &admin);
        storage::init_pool(&env);
        events::emit_initialized(&env, admin);
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    /// Hand the admin role to `new_admin`. The caller loses it immediately.
    pub fn change_admin(env: Env, admin: Address, new_admin: Address) {
        access::transfer_admin(&env, &admin, &new_admin);
    }

    pub fn admin(env: Env) -> Address {
        access::admin(&env)
    }

    pub fn set_pool_name(env: Env, admin: Address, name: String) {
        Self::update_config(&env, admin, symbol_short!("name"), |config| {
            config.name = name;
        });
    }

    pub fn set_pool_description(env: Env, admin: Address, description: String) {
        Self::update_config(&env, admin, symbol_short!("desc"), |config| {
            config.description = description;
        });
    }

    /// Minimum USD value (whole dollars) of a single stake.
    pub fn set_min_stake_price(env: Env, admin: Address, value: i128) {
        if value < 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        Self::update_config(&env, admin, symbol_short!("min_stake"), |config| {
            config.min_stake_value = value;
        });
    }

    /// Fundraising floor in whole dollars.
    pub fn set_min_fundraising_price(env: Env, admin: Address, value: i128) {
        if value < 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        let env_ref = &env;
        Self::update_config(env_ref, admin, symbol_short!("min_fund"), |config| {
            if config.max_fundraising_value != 0 && value > config.max_fundraising_value {
                panic_with_error!(env_ref, Error::InvalidFundraisingBounds);
            }
            config.min_fundraising_value = value;
        });
    }

    /// Fundraising ceiling in whole dollars. Reaching it exactly locks fundraising.
    pub fn set_max_fundraising_price(env: Env, admin: Address, value: i128) {
        if value < 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        let env_ref = &env;
        Self::update_config(env_ref, admin, symbol_short!("max_fund"), |config| {
            if value != 0 && config.min_fundraising_value > value {
                panic_with_error!(env_ref, Error::InvalidFundraisingBounds);
            }
            config.max_fundraising_value = value;
        });
    }

    /// Annual interest rate over a 10 000 denominator (`100` is 1%/year).
    pub fn set_annual_interest_rate(env: Env, admin: Address, rate_bp: u32) {
        Self::update_config(&env, admin, symbol_short!("rate"), |config| {
            config.annual_interest_rate_bp = rate_bp;
        });
    }

    /// Set the custodied token and cache its decimal unit.
    pub fn set_staking_token(env: Env, admin: Address, staking_token: Address) {
        access::require_admin(&env, &admin);
        let decimals = token::Client::new(&env, &staking_token).decimals();
        let token_unit = 10i128
            .checked_pow(decimals)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));

        let mut config = storage::load_config(&env);
        config.staking_token = Some(staking_token);
        config.token_unit = token_unit;
        storage::save_config(&env, &config);
        events::emit_config_updated(&env, symbol_short!("token"), admin);
    }

    /// Whether deposits are admitted while the pool is `Operating`.
    pub fn set_stake_while_operating(env: Env, admin: Address, allowed: bool) {
        Self::update_config(&env, admin, symbol_short!("op_stake"), |config| {
            config.stake_while_operating = allowed;
        });
    }

    /// Publish the live token price, scaled by `PRICE_SCALE`.
    pub fn update_token_price(env: Env, admin: Address, price: i128) {
        access::require_admin(&env, &admin);
        if price <= 0 {
            panic_with_error!(&env, Error::InvalidPrice);
        }
        let mut config = storage::load_config(&env);
        config.current_token_price = price;
        storage::save_config(&env, &config);
        events::emit_price_updated(&env, price);
    }

    /// Move custodied tokens out of the pool.
    pub fn transfer_staking_token(env: Env, admin: Address, to: Address, amount: i128) {
        access::require_admin(&env, &admin);
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        let config = storage::load_config(&env);
        let staking_token = Self::require_token(&env, &config);

        events::emit_token_transferred(&env, to.clone(), amount);
        token::Client::new(&env, &staking_token).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    pub fn start_fundraising(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::StartFundraising);
    }

    pub fn lock_fundraising(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::LockFundraising);
    }

    pub fn start_operating(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::StartOperating);
    }

    pub fn stop_fundraising(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::StopFundraising);
    }

    pub fn fail_fundraising(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::FailFundraising);
    }

    pub fn close_operating(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::CloseOperating);
    }

    pub fn stop_operating(env: Env, admin: Address) {
        Self::transition(&env, &admin, Transition::StopOperating);
    }

    pub fn state(env: Env) -> PoolState {
        storage::load_totals(&env).state
    }

    // ─────────────────────────────────────────────────────────
    // Reward schedules
    // ─────────────────────────────────────────────────────────

    /// Append a reward window `[start, end)` paid out at `payout_price`.
    ///
    /// Returns the schedule index. Indices are stable forever.
    pub fn add_reward_schedule(
        env: Env,
        admin: Address,
        payout_price: i128,
        start: u64,
        end: u64,
    ) -> u32 {
        access::require_admin(&env, &admin);
        let totals = storage::load_totals(&env);
        if !lifecycle::can_add_schedule(totals.state) {
            panic_with_error!(&env, Error::ScheduleNotAllowed);
        }
        if payout_price <= 0 {
            panic_with_error!(&env, Error::InvalidPrice);
        }
        if end <= start {
            panic_with_error!(&env, Error::InvalidSchedule);
        }

        let schedule = RewardSchedule {
            payout_price,
            start,
            end,
        };
        let index = storage::push_schedule(&env, &schedule);
        events::emit_schedule_added(&env, index, payout_price, start, end);
        index
    }

    pub fn get_reward_schedule(env: Env, index: u32) -> RewardSchedule {
        storage::load_schedule(&env, index)
    }

    pub fn get_reward_schedule_count(env: Env) -> u32 {
        storage::schedule_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Staking
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` native token units at the current price.
    ///
    /// Appends a new stake record and returns its index. If the deposit fills
    /// the fundraising ceiling exactly while fundraising, the pool locks.
    pub fn stake(env: Env, staker: Address, amount: i128) -> u32 {
        staker.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let config = storage::load_config(&env);
        let mut totals = storage::load_totals(&env);
        if !lifecycle::can_stake(totals.state, config.stake_while_operating) {
            panic_with_error!(&env, Error::StakingNotAllowed);
        }
        let staking_token = Self::require_token(&env, &config);
        let price = config.current_token_price;
        if price <= 0 {
            panic_with_error!(&env, Error::PriceNotSet);
        }

        let usd = Self::ok_or_panic(&env, accrual::usd_value(amount, price, config.token_unit));
        let min_stake = Self::ok_or_panic(&env, accrual::scaled_usd(config.min_stake_value));
        if usd < min_stake {
            panic_with_error!(&env, Error::BelowMinimumStake);
        }
        let ceiling = Self::ok_or_panic(&env, accrual::scaled_usd(config.max_fundraising_value));
        let new_total = totals
            .total_fundraising_value
            .checked_add(usd)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        if new_total > ceiling {
            panic_with_error!(&env, Error::ExceedsMaxFundraising);
        }

        let previous_state = totals.state;
        totals.total_fundraising_value = new_total;
        if totals.state == PoolState::Fundraising && new_total == ceiling {
            totals.state = PoolState::FundraisingLocked;
            log!(&env, "fundraising ceiling reached, pool locked", new_total);
        }
        storage::save_totals(&env, &totals);

        let record = StakeRecord {
            amount_staked: amount,
            price_at_stake: price,
            daily_interest_base: Self::ok_or_panic(
                &env,
                accrual::daily_interest_base(amount, price),
            ),
            claimed_reward: 0,
            pending_schedule_index: 0,
            staked_at: env.ledger().timestamp(),
        };
        let index = storage::push_stake(&env, &staker, &record);

        events::emit_staked(&env, staker.clone(), index, amount, price);
        if totals.state != previous_state {
            events::emit_state_changed(&env, previous_state, totals.state);
        }

        token::Client::new(&env, &staking_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );
        index
    }

    /// Withdraw `amount` from record `index` while the pool is fundraising.
    ///
    /// A record reduced to zero is removed and later records shift down by
    /// one index. Returns the token amount sent back.
    pub fn unstake(env: Env, staker: Address, index: u32, amount: i128) -> i128 {
        staker.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let config = storage::load_config(&env);
        let mut totals = storage::load_totals(&env);
        if !lifecycle::can_unstake(totals.state) {
            panic_with_error!(&env, Error::UnstakingNotAllowed);
        }
        let staking_token = Self::require_token(&env, &config);

        let mut record = storage::load_stake(&env, &staker, index);
        if amount > record.amount_staked {
            panic_with_error!(&env, Error::InsufficientStake);
        }

        let debit = Self::ok_or_panic(
            &env,
            accrual::usd_value(amount, record.price_at_stake, config.token_unit),
        );
        totals.total_fundraising_value = (totals.total_fundraising_value - debit).max(0);
        storage::save_totals(&env, &totals);

        record.amount_staked -= amount;
        if record.amount_staked == 0 {
            storage::remove_stake(&env, &staker, index);
        } else {
            record.daily_interest_base = Self::ok_or_panic(
                &env,
                accrual::daily_interest_base(record.amount_staked, record.price_at_stake),
            );
            storage::save_stake(&env, &staker, index, &record);
        }

        events::emit_unstaked(&env, staker.clone(), index, amount);
        token::Client::new(&env, &staking_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );
        amount
    }

    pub fn get_stake(env: Env, account: Address, index: u32) -> StakeRecord {
        storage::load_stake(&env, &account, index)
    }

    pub fn get_stake_count(env: Env, account: Address) -> u32 {
        storage::stake_count(&env, &account)
    }

    /// Number of accounts that have ever staked.
    pub fn staker_count(env: Env) -> u32 {
        storage::staker_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Rewards
    // ─────────────────────────────────────────────────────────

    /// Pending reward of one record and the cursor a claim would move it to.
    ///
    /// Read-only: calling it never moves the record's cursor.
    pub fn calculate_pending_reward(env: Env, account: Address, index: u32) -> (i128, u32) {
        let config = storage::load_config(&env);
        let record = storage::load_stake(&env, &account, index);
        Self::pending_for(&env, &config, &record)
    }

    /// Pending reward summed over every record held by `account`.
    pub fn calculate_all_pending_reward(env: Env, account: Address) -> i128 {
        let config = storage::load_config(&env);
        Self::account_pending(&env, &config, &account)
    }

    /// Pending reward summed over every account that has ever staked.
    pub fn calculate_total_pending_reward(env: Env) -> i128 {
        let config = storage::load_config(&env);
        let mut total: i128 = 0;
        for i in 0..storage::staker_count(&env) {
            let staker = storage::load_staker(&env, i);
            total = total
                .checked_add(Self::account_pending(&env, &config, &staker))
                .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        }
        total
    }

    /// Reward tokens already paid out across every record held by `account`.
    pub fn total_claimed_reward(env: Env, account: Address) -> i128 {
        let mut total: i128 = 0;
        for i in 0..storage::stake_count(&env, &account) {
            total = total
                .checked_add(storage::load_stake(&env, &account, i).claimed_reward)
                .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        }
        total
    }

    /// Pay out the concluded, unsettled rewards of record `index`.
    ///
    /// Panics with `Error::NoRewardAvailable` instead of transferring zero.
    pub fn claim_reward(env: Env, staker: Address, index: u32) -> i128 {
        staker.require_auth();

        let config = storage::load_config(&env);
        let totals = storage::load_totals(&env);
        if !lifecycle::can_claim(totals.state) {
            panic_with_error!(&env, Error::ClaimNotAllowed);
        }
        let staking_token = Self::require_token(&env, &config);

        let mut record = storage::load_stake(&env, &staker, index);
        let (amount, next_index) = Self::pending_for(&env, &config, &record);
        if amount <= 0 {
            panic_with_error!(&env, Error::NoRewardAvailable);
        }

        record.pending_schedule_index = next_index;
        record.claimed_reward = record
            .claimed_reward
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        storage::save_stake(&env, &staker, index, &record);

        events::emit_reward_claimed(&env, staker.clone(), index, amount, next_index);
        token::Client::new(&env, &staking_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );
        amount
    }

    // ─────────────────────────────────────────────────────────
    // Exit
    // ─────────────────────────────────────────────────────────

    /// Redeem the principal of every record held by `staker` at the live price.
    ///
    /// Only legal once the pool has exited. Every concluded reward must have
    /// been claimed first. Returns the total tokens paid.
    pub fn withdraw_all_principal(env: Env, staker: Address) -> i128 {
        staker.require_auth();

        let config = storage::load_config(&env);
        let mut totals = storage::load_totals(&env);
        if !lifecycle::can_withdraw(totals.state) {
            panic_with_error!(&env, Error::WithdrawNotAllowed);
        }
        let staking_token = Self::require_token(&env, &config);
        let price = config.current_token_price;
        if price <= 0 {
            panic_with_error!(&env, Error::PriceNotSet);
        }

        let mut payout: i128 = 0;
        let mut debit: i128 = 0;
        for i in 0..storage::stake_count(&env, &staker) {
            let mut record = storage::load_stake(&env, &staker, i);
            if record.amount_staked == 0 {
                continue;
            }
            let (pending, next_index) = Self::pending_for(&env, &config, &record);
            if pending > 0 {
                panic_with_error!(&env, Error::UnclaimedRewards);
            }

            let principal = Self::ok_or_panic(&env, accrual::principal_payout(&record, price));
            let usd = Self::ok_or_panic(
                &env,
                accrual::usd_value(record.amount_staked, record.price_at_stake, config.token_unit),
            );
            payout = payout
                .checked_add(principal)
                .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
            debit = debit
                .checked_add(usd)
                .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));

            record.amount_staked = 0;
            record.daily_interest_base = 0;
            record.pending_schedule_index = next_index;
            storage::save_stake(&env, &staker, i, &record);
        }
        if payout <= 0 {
            panic_with_error!(&env, Error::NothingToWithdraw);
        }

        totals.total_fundraising_value = (totals.total_fundraising_value - debit).max(0);
        storage::save_totals(&env, &totals);

        events::emit_principal_withdrawn(&env, staker.clone(), payout);
        token::Client::new(&env, &staking_token).transfer(
            &env.current_contract_address(),
            &staker,
            &payout,
        );
        payout
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_pool_details(env: Env) -> PoolDetails {
        let config = storage::load_config(&env);
        let totals = storage::load_totals(&env);
        PoolDetails {
            admin: access::admin(&env),
            name: config.name,
            description: config.description,
            staking_token: config.staking_token,
            state: totals.state,
            min_stake_value: config.min_stake_value,
            min_fundraising_value: config.min_fundraising_value,
            max_fundraising_value: config.max_fundraising_value,
            annual_interest_rate_bp: config.annual_interest_rate_bp,
            current_token_price: config.current_token_price,
            total_fundraising_value: totals.total_fundraising_value,
            reward_schedule_count: storage::schedule_count(&env),
            stake_while_operating: config.stake_while_operating,
        }
    }

    pub fn current_token_price(env: Env) -> i128 {
        storage::load_config(&env).current_token_price
    }

    /// Currently staked principal in `PRICE_SCALE`-scaled USD.
    pub fn total_fundraising_value(env: Env) -> i128 {
        storage::load_totals(&env).total_fundraising_value
    }
}

// ─────────────────────────────────────────────────────────
// Internal Helpers
// ─────────────────────────────────────────────────────────

impl StakingPool {
    fn ok_or_panic<T>(env: &Env, result: Result<T, Error>) -> T {
        result.unwrap_or_else(|err| panic_with_error!(env, err))
    }

    fn require_token(env: &Env, config: &PoolConfig) -> Address {
        config
            .staking_token
            .clone()
            .unwrap_or_else(|| panic_with_error!(env, Error::TokenNotSet))
    }

    fn update_config<F>(env: &Env, admin: Address, setting: Symbol, apply: F)
    where
        F: FnOnce(&mut PoolConfig),
    {
        access::require_admin(env, &admin);
        let mut config = storage::load_config(env);
        apply(&mut config);
        storage::save_config(env, &config);
        events::emit_config_updated(env, setting, admin);
    }

    fn transition(env: &Env, admin: &Address, transition: Transition) {
        access::require_admin(env, admin);
        let mut totals = storage::load_totals(env);
        let from = totals.state;
        totals.state = Self::ok_or_panic(env, lifecycle::next_state(from, transition));
        storage::save_totals(env, &totals);
        events::emit_state_changed(env, from, totals.state);
    }

    fn pending_for(env: &Env, config: &PoolConfig, record: &StakeRecord) -> (i128, u32) {
        let result = accrual::scan_pending(
            record,
            storage::schedule_count(env),
            config.annual_interest_rate_bp,
            env.ledger().timestamp(),
            |i| storage::load_schedule(env, i),
        );
        Self::ok_or_panic(env, result)
    }

    fn account_pending(env: &Env, config: &PoolConfig, account: &Address) -> i128 {
        let mut total: i128 = 0;
        for i in 0..storage::stake_count(env, account) {
            let record = storage::load_stake(env, account, i);
            let (pending, _) = Self::pending_for(env, config, &record);
            total = total
                .checked_add(pending)
                .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
        }
        total
    }
}
