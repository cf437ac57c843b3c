use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::PoolState;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChanged {
    pub previous: Address,
    pub new_admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateChanged {
    pub from: PoolState,
    pub to: PoolState,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardScheduleAdded {
    pub index: u32,
    pub payout_price: i128,
    pub start: u64,
    pub end: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Staked {
    pub staker: Address,
    pub index: u32,
    pub amount: i128,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unstaked {
    pub staker: Address,
    pub index: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimed {
    pub staker: Address,
    pub index: u32,
    pub amount: i128,
    pub next_schedule_index: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrincipalWithdrawn {
    pub staker: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingTokenTransferred {
    pub to: Address,
    pub amount: i128,
}

pub fn emit_initialized(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("init"),), admin);
}

pub fn emit_admin_changed(env: &Env, previous: Address, new_admin: Address) {
    let topics = (symbol_short!("admin"),);
    let data = AdminChanged {
        previous,
        new_admin,
    };
    env.events().publish(topics, data);
}

/// Topic: `(config, setting)`. Data: the admin that made the change.
pub fn emit_config_updated(env: &Env, setting: Symbol, admin: Address) {
    env.events()
        .publish((symbol_short!("config"), setting), admin);
}

pub fn emit_price_updated(env: &Env, price: i128) {
    env.events().publish((symbol_short!("price"),), price);
}

pub fn emit_state_changed(env: &Env, from: PoolState, to: PoolState) {
    let topics = (symbol_short!("state"),);
    let data = StateChanged { from, to };
    env.events().publish(topics, data);
}

pub fn emit_schedule_added(env: &Env, index: u32, payout_price: i128, start: u64, end: u64) {
    let topics = (symbol_short!("sched"), index);
    let data = RewardScheduleAdded {
        index,
        payout_price,
        start,
        end,
    };
    env.events().publish(topics, data);
}

pub fn emit_staked(env: &Env, staker: Address, index: u32, amount: i128, price: i128) {
    let topics = (symbol_short!("staked"), staker.clone());
    let data = Staked {
        staker,
        index,
        amount,
        price,
    };
    env.events().publish(topics, data);
}

pub fn emit_unstaked(env: &Env, staker: Address, index: u32, amount: i128) {
    let topics = (symbol_short!("unstaked"), staker.clone());
    let data = Unstaked {
        staker,
        index,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_reward_claimed(
    env: &Env,
    staker: Address,
    index: u32,
    amount: i128,
    next_schedule_index: u32,
) {
    let topics = (symbol_short!("claimed"), staker.clone());
    let data = RewardClaimed {
        staker,
        index,
        amount,
        next_schedule_index,
    };
    env.events().publish(topics, data);
}

pub fn emit_principal_withdrawn(env: &Env, staker: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), staker.clone());
    let data = PrincipalWithdrawn { staker, amount };
    env.events().publish(topics, data);
}

pub fn emit_token_transferred(env: &Env, to: Address, amount: i128) {
    let topics = (symbol_short!("xfer"), to.clone());
    let data = StakingTokenTransferred { to, amount };
    env.events().publish(topics, data);
}
