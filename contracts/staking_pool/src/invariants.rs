#![allow(dead_code)]

extern crate std;

use crate::accrual::DAYS_PER_YEAR;
use crate::types::{PoolState, StakeRecord};

/// INV-1: A live record's interest base is derived from its current amount.
pub fn assert_daily_interest_base(record: &StakeRecord) {
    assert_eq!(
        record.daily_interest_base,
        record.amount_staked * record.price_at_stake / DAYS_PER_YEAR,
        "INV-1 violated: daily interest base {} does not match amount {} at price {}",
        record.daily_interest_base,
        record.amount_staked,
        record.price_at_stake
    );
}

/// INV-2: Amounts held by a record are never negative.
pub fn assert_amounts_non_negative(record: &StakeRecord) {
    assert!(
        record.amount_staked >= 0,
        "INV-2 violated: negative amount_staked ({})",
        record.amount_staked
    );
    assert!(
        record.claimed_reward >= 0,
        "INV-2 violated: negative claimed_reward ({})",
        record.claimed_reward
    );
}

/// INV-3: The cursor never points past the end of the schedule list.
pub fn assert_cursor_in_range(record: &StakeRecord, schedule_count: u32) {
    assert!(
        record.pending_schedule_index <= schedule_count,
        "INV-3 violated: cursor {} beyond {} schedules",
        record.pending_schedule_index,
        schedule_count
    );
}

/// INV-4: Cursor and claimed reward only move forward.
pub fn assert_progress_monotonic(before: &StakeRecord, after: &StakeRecord) {
    assert!(
        after.pending_schedule_index >= before.pending_schedule_index,
        "INV-4 violated: cursor moved back from {} to {}",
        before.pending_schedule_index,
        after.pending_schedule_index
    );
    assert!(
        after.claimed_reward >= before.claimed_reward,
        "INV-4 violated: claimed reward shrank from {} to {}",
        before.claimed_reward,
        after.claimed_reward
    );
}

/// INV-5: Fields fixed at stake time never change.
pub fn assert_record_immutable_fields(original: &StakeRecord, current: &StakeRecord) {
    assert_eq!(
        original.price_at_stake, current.price_at_stake,
        "INV-5 violated: price_at_stake changed"
    );
    assert_eq!(
        original.staked_at, current.staked_at,
        "INV-5 violated: staked_at changed"
    );
}

/// INV-6: Redeemed principal keeps its stake-time USD value, up to one token
/// unit of truncation at the redemption price.
pub fn assert_redemption_preserves_usd(
    amount: i128,
    price_at_stake: i128,
    current_price: i128,
    payout: i128,
) {
    let staked_value = amount * price_at_stake;
    assert!(
        payout * current_price <= staked_value && staked_value < (payout + 1) * current_price,
        "INV-6 violated: payout {} at price {} does not preserve value {}",
        payout,
        current_price,
        staked_value
    );
}

/// INV-7: Status transition validity. Only forward transitions are allowed:
///   Waiting           -> Fundraising
///   Fundraising       -> FundraisingLocked | FundraisingStopped | FundraisingFailed | Operating
///   FundraisingLocked -> Operating
///   Operating         -> OperatingClosed | OperatingStopped
///   terminal states   -> (none)
pub fn assert_valid_state_transition(from: &PoolState, to: &PoolState) {
    let valid = matches!(
        (from, to),
        (PoolState::Waiting, PoolState::Fundraising)
            | (PoolState::Fundraising, PoolState::FundraisingLocked)
            | (PoolState::Fundraising, PoolState::FundraisingStopped)
            | (PoolState::Fundraising, PoolState::FundraisingFailed)
            | (PoolState::Fundraising, PoolState::Operating)
            | (PoolState::FundraisingLocked, PoolState::Operating)
            | (PoolState::Operating, PoolState::OperatingClosed)
            | (PoolState::Operating, PoolState::OperatingStopped)
    );

    assert!(
        valid,
        "INV-7 violated: invalid state transition from {:?} to {:?}",
        from, to
    );
}

/// Run all stateless record invariants.
pub fn assert_all_record_invariants(record: &StakeRecord, schedule_count: u32) {
    assert_amounts_non_negative(record);
    assert_cursor_in_range(record, schedule_count);
    if record.amount_staked > 0 {
        assert_daily_interest_base(record);
    }
}
