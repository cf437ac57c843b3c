//! # Access control
//!
//! A single administrator owns the pool. The admin may mutate configuration,
//! drive lifecycle transitions, add reward schedules and move custodied
//! tokens. The role is transferable and there is exactly one holder at a time.
//!
//! ## Storage layout
//!
//! - `AccessKey::Admin` → `Address` (instance storage).
//!
//! ## Threat model notes
//!
//! - Every admin-gated entry point receives the caller explicitly, requires
//!   the caller's signature, and compares it with the stored admin.
//! - `transfer_admin` is the only way to replace the admin; the previous
//!   holder loses every privilege immediately.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::events;
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessKey {
    /// The one and only admin address.
    Admin,
}

/// Read the admin address, returning `None` before init.
pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessKey::Admin)
}

/// Read the admin address.
/// Panics with `Error::NotInitialized` before init.
pub fn admin(env: &Env) -> Address {
    get_admin(env).unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

/// Set the initial admin. Must be called exactly once.
/// Panics with `Error::AlreadyInitialized` if called again.
pub fn init_admin(env: &Env, admin: &Address) {
    if env.storage().instance().has(&AccessKey::Admin) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage().instance().set(&AccessKey::Admin, admin);
}

/// Assert that `caller` signed the invocation and is the admin.
/// Panics with `Error::NotAuthorized` otherwise.
pub fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    if admin(env) != *caller {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

/// Replace the admin with `new_admin`.
///
/// - `current` must authorize and must be the admin.
///
/// Emits an `admin` event.
pub fn transfer_admin(env: &Env, current: &Address, new_admin: &Address) {
    require_admin(env, current);
    env.storage().instance().set(&AccessKey::Admin, new_admin);
    events::emit_admin_changed(env, current.clone(), new_admin.clone());
}
