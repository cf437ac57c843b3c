//! # Reward accrual
//!
//! Fixed-point arithmetic for stake valuation, interest accrual and
//! principal redemption. Everything here is a pure function over plain
//! values so the entry points in `lib.rs` can decide what to persist.
//!
//! ## Units
//!
//! | Quantity               | Unit                                        |
//! |------------------------|---------------------------------------------|
//! | token amounts          | native token units (`10^decimals` per token) |
//! | prices                 | USD per token, scaled by [`PRICE_SCALE`]    |
//! | USD values             | USD scaled by [`PRICE_SCALE`]               |
//! | `daily_interest_base`  | native units × scaled price / 365           |
//!
//! A schedule pays `base × rate / 10 000 × days / payout_price`, which comes
//! out in native token units.
//!
//! ## Cursor
//!
//! Each [`StakeRecord`] carries `pending_schedule_index`. [`scan_pending`]
//! starts there and walks forward while schedules have concluded, so a
//! schedule is never counted twice and the work per call is bounded by the
//! number of schedules that ended since the last claim.

use crate::types::{RewardSchedule, StakeRecord};
use crate::Error;

/// Price scale: `1_000_000` is $1.00 per token.
pub const PRICE_SCALE: i128 = 1_000_000;
/// Denominator of `annual_interest_rate_bp`.
pub const RATE_DENOMINATOR: i128 = 10_000;
pub const DAYS_PER_YEAR: i128 = 365;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// USD value (scaled by `PRICE_SCALE`) of `amount` native units at `price`.
pub fn usd_value(amount: i128, price: i128, token_unit: i128) -> Result<i128, Error> {
    amount
        .checked_mul(price)
        .and_then(|v| v.checked_div(token_unit))
        .ok_or(Error::Overflow)
}

/// Whole-dollar threshold converted to scaled USD.
pub fn scaled_usd(dollars: i128) -> Result<i128, Error> {
    dollars.checked_mul(PRICE_SCALE).ok_or(Error::Overflow)
}

/// Per-day interest base of a deposit, before the annual rate is applied.
pub fn daily_interest_base(amount: i128, price: i128) -> Result<i128, Error> {
    amount
        .checked_mul(price)
        .map(|v| v / DAYS_PER_YEAR)
        .ok_or(Error::Overflow)
}

/// Whole days during which `staked_at` overlaps `schedule`, evaluated at `now`.
///
/// Zero when the record was created after the window closed.
pub fn overlap_days(schedule: &RewardSchedule, staked_at: u64, now: u64) -> u64 {
    let from = schedule.start.max(staked_at);
    let to = schedule.end.min(now);
    to.saturating_sub(from) / SECONDS_PER_DAY
}

/// Reward tokens `record` earns from one concluded `schedule`.
pub fn schedule_reward(
    record: &StakeRecord,
    schedule: &RewardSchedule,
    annual_interest_rate_bp: u32,
    now: u64,
) -> Result<i128, Error> {
    let days = overlap_days(schedule, record.staked_at, now);
    if days == 0 || schedule.payout_price <= 0 {
        return Ok(0);
    }
    let effective_daily = record
        .daily_interest_base
        .checked_mul(annual_interest_rate_bp as i128)
        .ok_or(Error::Overflow)?
        / RATE_DENOMINATOR;
    effective_daily
        .checked_mul(days as i128)
        .and_then(|v| v.checked_div(schedule.payout_price))
        .ok_or(Error::Overflow)
}

/// Sum the rewards of every concluded schedule from the record's cursor on.
///
/// Stops at the first schedule whose `end` is still in the future; nothing
/// of a running schedule is counted. Returns `(amount, next_cursor)` and
/// never mutates `record`.
pub fn scan_pending<F>(
    record: &StakeRecord,
    schedule_count: u32,
    annual_interest_rate_bp: u32,
    now: u64,
    load_schedule: F,
) -> Result<(i128, u32), Error>
where
    F: Fn(u32) -> RewardSchedule,
{
    let mut total: i128 = 0;
    let mut cursor = record.pending_schedule_index;
    while cursor < schedule_count {
        let schedule = load_schedule(cursor);
        if schedule.end > now {
            break;
        }
        let reward = schedule_reward(record, &schedule, annual_interest_rate_bp, now)?;
        total = total.checked_add(reward).ok_or(Error::Overflow)?;
        cursor += 1;
    }
    Ok((total, cursor))
}

/// Tokens returned for a record's principal at `current_price`.
///
/// Preserves the USD value the record had when it was staked.
pub fn principal_payout(record: &StakeRecord, current_price: i128) -> Result<i128, Error> {
    if current_price <= 0 {
        return Err(Error::PriceNotSet);
    }
    record
        .amount_staked
        .checked_mul(record.price_at_stake)
        .map(|v| v / current_price)
        .ok_or(Error::Overflow)
}
