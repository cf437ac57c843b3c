extern crate std;

use std::vec::Vec as StdVec;

use soroban_sdk::{
    symbol_short, testutils::Address as _, testutils::Events, vec, Address, IntoVal, TryIntoVal,
    Val, Vec,
};

use crate::events::{
    AdminChanged, PrincipalWithdrawn, RewardClaimed, RewardScheduleAdded, StakingTokenTransferred,
    Staked, StateChanged, Unstaked,
};
use crate::test::{tokens, Fixture, DAY, ONE_DOLLAR};
use crate::PoolState;

/// Events published by the pool itself, oldest first. Token contract
/// events are dropped.
fn pool_events(f: &Fixture) -> StdVec<(Vec<Val>, Val)> {
    f.env
        .events()
        .all()
        .iter()
        .filter(|e| e.0 == f.client.address)
        .map(|e| (e.1, e.2))
        .collect()
}

fn last_pool_event(f: &Fixture) -> (Vec<Val>, Val) {
    pool_events(f).pop().expect("No pool events found")
}

#[test]
fn test_admin_changed_event() {
    let f = Fixture::new(100, 10_000);
    let successor = Address::generate(&f.env);
    f.client.change_admin(&f.admin, &successor);

    let (topics, data) = last_pool_event(&f);
    assert_eq!(topics, vec![&f.env, symbol_short!("admin").into_val(&f.env)]);
    let event_data: AdminChanged = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, AdminChanged {
        previous: f.admin.clone(),
        new_admin: successor,
    });
}

#[test]
fn test_config_updated_event_names_setting() {
    let f = Fixture::new(100, 10_000);
    f.client.set_annual_interest_rate(&f.admin, &250);

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("config").into_val(&f.env),
        symbol_short!("rate").into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let admin: Address = data.try_into_val(&f.env).unwrap();
    assert_eq!(admin, f.admin);
}

#[test]
fn test_price_updated_event() {
    let f = Fixture::new(100, 10_000);
    f.set_price(3 * ONE_DOLLAR);

    let (topics, data) = last_pool_event(&f);
    assert_eq!(topics, vec![&f.env, symbol_short!("price").into_val(&f.env)]);
    let price: i128 = data.try_into_val(&f.env).unwrap();
    assert_eq!(price, 3 * ONE_DOLLAR);
}

#[test]
fn test_state_changed_event() {
    let f = Fixture::new(100, 10_000);
    f.open_fundraising();

    let (topics, data) = last_pool_event(&f);
    assert_eq!(topics, vec![&f.env, symbol_short!("state").into_val(&f.env)]);
    let event_data: StateChanged = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, StateChanged {
        from: PoolState::Waiting,
        to: PoolState::Fundraising,
    });
}

#[test]
fn test_schedule_added_event() {
    let f = Fixture::new(100, 10_000);
    f.open_operating();
    let index = f.add_schedule(2 * ONE_DOLLAR, 1, 11);

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("sched").into_val(&f.env),
        index.into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: RewardScheduleAdded = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, RewardScheduleAdded {
        index,
        payout_price: 2 * ONE_DOLLAR,
        start: f.now() + DAY,
        end: f.now() + 11 * DAY,
    });
}

#[test]
fn test_staked_event() {
    let f = Fixture::new(100, 10_000);
    f.open_fundraising();
    let staker = f.staker(tokens(100));
    f.client.stake(&staker, &tokens(40));

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("staked").into_val(&f.env),
        staker.into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: Staked = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, Staked {
        staker: staker.clone(),
        index: 0,
        amount: tokens(40),
        price: ONE_DOLLAR,
    });
}

#[test]
fn test_automatic_lock_emits_state_event_after_staked() {
    let f = Fixture::new(100, 1_000);
    f.open_fundraising();
    let staker = f.staker(tokens(1_000));
    f.client.stake(&staker, &tokens(1_000));

    let events = pool_events(&f);
    let (state_topics, state_data) = events[events.len() - 1].clone();
    let (staked_topics, _) = events[events.len() - 2].clone();

    assert_eq!(
        staked_topics,
        vec![&f.env, symbol_short!("staked").into_val(&f.env), staker.into_val(&f.env)]
    );
    assert_eq!(state_topics, vec![&f.env, symbol_short!("state").into_val(&f.env)]);
    let event_data: StateChanged = state_data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, StateChanged {
        from: PoolState::Fundraising,
        to: PoolState::FundraisingLocked,
    });
}

#[test]
fn test_unstaked_event() {
    let f = Fixture::new(100, 10_000);
    f.open_fundraising();
    let staker = f.staker(tokens(100));
    f.client.stake(&staker, &tokens(40));
    f.client.unstake(&staker, &0, &tokens(15));

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("unstaked").into_val(&f.env),
        staker.into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: Unstaked = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, Unstaked {
        staker: staker.clone(),
        index: 0,
        amount: tokens(15),
    });
}

#[test]
fn test_reward_claimed_event() {
    let f = Fixture::new(1, 100_000_000);
    f.fund_pool(tokens(1_000));
    f.open_operating();
    let staker = f.staker(tokens(3_650_000));
    f.client.stake(&staker, &tokens(3_650_000));
    f.add_schedule(2 * ONE_DOLLAR, 1, 11);
    f.advance(11 * DAY);
    f.client.claim_reward(&staker, &0);

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("claimed").into_val(&f.env),
        staker.into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: RewardClaimed = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, RewardClaimed {
        staker: staker.clone(),
        index: 0,
        amount: tokens(5),
        next_schedule_index: 1,
    });
}

#[test]
fn test_principal_withdrawn_event() {
    let f = Fixture::new(100, 10_000);
    f.open_fundraising();
    let staker = f.staker(tokens(100));
    f.client.stake(&staker, &tokens(40));
    f.client.stop_fundraising(&f.admin);
    f.client.withdraw_all_principal(&staker);

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("withdrawn").into_val(&f.env),
        staker.into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: PrincipalWithdrawn = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, PrincipalWithdrawn {
        staker: staker.clone(),
        amount: tokens(40),
    });
}

#[test]
fn test_token_transferred_event() {
    let f = Fixture::new(100, 10_000);
    f.fund_pool(tokens(10));
    let treasury = Address::generate(&f.env);
    f.client.transfer_staking_token(&f.admin, &treasury, &tokens(10));

    let (topics, data) = last_pool_event(&f);
    let expected_topics = vec![
        &f.env,
        symbol_short!("xfer").into_val(&f.env),
        treasury.into_val(&f.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: StakingTokenTransferred = data.try_into_val(&f.env).unwrap();
    assert_eq!(event_data, StakingTokenTransferred {
        to: treasury.clone(),
        amount: tokens(10),
    });
}
