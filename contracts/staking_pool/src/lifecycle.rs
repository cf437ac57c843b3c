//! # Lifecycle
//!
//! The pool state machine as an explicit `(state, transition) -> state`
//! table plus the admissibility predicates that gate every user operation.
//!
//! | Transition          | From                              | To                   |
//! |---------------------|-----------------------------------|----------------------|
//! | `StartFundraising`  | `Waiting`                         | `Fundraising`        |
//! | `LockFundraising`   | `Fundraising`                     | `FundraisingLocked`  |
//! | `StartOperating`    | `Fundraising`, `FundraisingLocked`| `Operating`          |
//! | `StopFundraising`   | `Fundraising`                     | `FundraisingStopped` |
//! | `FailFundraising`   | `Fundraising`                     | `FundraisingFailed`  |
//! | `CloseOperating`    | `Operating`                       | `OperatingClosed`    |
//! | `StopOperating`     | `Operating`                       | `OperatingStopped`   |
//!
//! Anything else is rejected with an error naming the required source state.

use crate::types::PoolState;
use crate::Error;

/// Admin-driven lifecycle transitions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    StartFundraising,
    LockFundraising,
    StartOperating,
    StopFundraising,
    FailFundraising,
    CloseOperating,
    StopOperating,
}

/// Resolve `transition` from `from`, or the precondition error to raise.
pub fn next_state(from: PoolState, transition: Transition) -> Result<PoolState, Error> {
    use PoolState::*;

    match (transition, from) {
        (Transition::StartFundraising, Waiting) => Ok(Fundraising),
        (Transition::StartFundraising, _) => Err(Error::NotWaiting),

        (Transition::LockFundraising, Fundraising) => Ok(FundraisingLocked),
        (Transition::LockFundraising, _) => Err(Error::NotFundraising),

        (Transition::StartOperating, Fundraising | FundraisingLocked) => Ok(Operating),
        (Transition::StartOperating, _) => Err(Error::NotFundraisingOrLocked),

        (Transition::StopFundraising, Fundraising) => Ok(FundraisingStopped),
        (Transition::StopFundraising, _) => Err(Error::NotFundraising),

        (Transition::FailFundraising, Fundraising) => Ok(FundraisingFailed),
        (Transition::FailFundraising, _) => Err(Error::NotFundraising),

        (Transition::CloseOperating, Operating) => Ok(OperatingClosed),
        (Transition::CloseOperating, _) => Err(Error::NotOperating),

        (Transition::StopOperating, Operating) => Ok(OperatingStopped),
        (Transition::StopOperating, _) => Err(Error::NotOperating),
    }
}

/// No transition leaves a terminal state.
pub fn is_terminal(state: PoolState) -> bool {
    matches!(
        state,
        PoolState::FundraisingStopped
            | PoolState::FundraisingFailed
            | PoolState::OperatingClosed
            | PoolState::OperatingStopped
    )
}

pub fn can_stake(state: PoolState, stake_while_operating: bool) -> bool {
    match state {
        PoolState::Fundraising => true,
        PoolState::Operating => stake_while_operating,
        _ => false,
    }
}

pub fn can_unstake(state: PoolState) -> bool {
    state == PoolState::Fundraising
}

/// Schedules only run while operating, so every one of them can be claimed.
pub fn can_add_schedule(state: PoolState) -> bool {
    state == PoolState::Operating
}

/// Claims stay open after operation ends; concluded schedules remain payable.
pub fn can_claim(state: PoolState) -> bool {
    matches!(
        state,
        PoolState::Operating | PoolState::OperatingClosed | PoolState::OperatingStopped
    )
}

/// Principal is only redeemable once the pool has exited.
pub fn can_withdraw(state: PoolState) -> bool {
    is_terminal(state)
}
