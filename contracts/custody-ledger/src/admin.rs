//! # Admin Registry and Roles
//!
//! Two tiers of privileged identities:
//! - **Admins** (`Role::Admin`): may mint, burn, pause, redirect assets and
//!   edit vesting schedules. Kept in an ordered list with a reverse index so
//!   membership, position lookup, insertion and removal are all O(1).
//! - **Super-admins** (`Role::SuperAdmin`): may grant and revoke either role.
//!
//! ## Registry layout
//! `AdminAt(i)` holds the admin at position `i` for `i < AdminCount`, and
//! `AdminIndex(a)` holds the position of `a`. Removal moves the last entry
//! into the vacated slot (swap-and-pop), so the list never has gaps.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::CustodyError;
use crate::storage::DataKey;

/// Privileged roles understood by `grant_role` / `revoke_role`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    SuperAdmin = 0,
    Admin = 1,
}

// ============================================================================
// Admin set
// ============================================================================

pub fn is_admin(env: &Env, id: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::AdminIndex(id.clone()))
}

pub fn count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::AdminCount)
        .unwrap_or(0)
}

/// Position of `id` in the ordered admin list.
///
/// # Errors
/// - [`CustodyError::UnknownAdmin`] if `id` is not currently an admin.
pub fn index_of(env: &Env, id: &Address) -> Result<u32, CustodyError> {
    env.storage()
        .persistent()
        .get(&DataKey::AdminIndex(id.clone()))
        .ok_or(CustodyError::UnknownAdmin)
}

/// Admin at position `index`.
///
/// # Errors
/// - [`CustodyError::UnknownAdmin`] if `index >= count()`.
pub fn at(env: &Env, index: u32) -> Result<Address, CustodyError> {
    if index >= count(env) {
        return Err(CustodyError::UnknownAdmin);
    }
    env.storage()
        .persistent()
        .get(&DataKey::AdminAt(index))
        .ok_or(CustodyError::UnknownAdmin)
}

/// Append `id` to the admin list.
///
/// # Errors
/// - [`CustodyError::AlreadyAdmin`] if `id` is already a member.
pub fn add(env: &Env, id: &Address) -> Result<u32, CustodyError> {
    if is_admin(env, id) {
        return Err(CustodyError::AlreadyAdmin);
    }

    let index = count(env);
    let storage = env.storage().persistent();
    storage.set(&DataKey::AdminAt(index), id);
    storage.set(&DataKey::AdminIndex(id.clone()), &index);
    env.storage().instance().set(&DataKey::AdminCount, &(index + 1));

    Ok(index)
}

/// Remove `id` from the admin list with swap-and-pop.
///
/// # Errors
/// - [`CustodyError::UnknownAdmin`] if `id` is not a member.
pub fn remove(env: &Env, id: &Address) -> Result<(), CustodyError> {
    let index = index_of(env, id)?;
    let last = count(env) - 1;
    let storage = env.storage().persistent();

    if index != last {
        let moved: Address = storage
            .get(&DataKey::AdminAt(last))
            .ok_or(CustodyError::UnknownAdmin)?;
        storage.set(&DataKey::AdminAt(index), &moved);
        storage.set(&DataKey::AdminIndex(moved), &index);
    }

    storage.remove(&DataKey::AdminAt(last));
    storage.remove(&DataKey::AdminIndex(id.clone()));
    env.storage().instance().set(&DataKey::AdminCount, &last);

    Ok(())
}

/// Require that `caller` is an admin.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), CustodyError> {
    if !is_admin(env, caller) {
        return Err(CustodyError::NotAnAdmin);
    }
    Ok(())
}

// ============================================================================
// Super-admin set
// ============================================================================

pub fn is_super_admin(env: &Env, id: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::SuperAdmin(id.clone()))
        .unwrap_or(false)
}

pub fn super_admin_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::SuperAdminCount)
        .unwrap_or(0)
}

/// Require that `caller` holds the super-admin role.
pub fn require_super_admin(env: &Env, caller: &Address) -> Result<(), CustodyError> {
    if !is_super_admin(env, caller) {
        return Err(CustodyError::NotSuperAdmin);
    }
    Ok(())
}

/// Grant super-admin to `id`. Granting an existing super-admin is a no-op.
pub fn grant_super_admin(env: &Env, id: &Address) {
    if is_super_admin(env, id) {
        return;
    }
    env.storage()
        .persistent()
        .set(&DataKey::SuperAdmin(id.clone()), &true);
    env.storage()
        .instance()
        .set(&DataKey::SuperAdminCount, &(super_admin_count(env) + 1));
}

/// Revoke super-admin from `id`. Revoking a non-holder is a no-op.
///
/// # Errors
/// - [`CustodyError::LastSuperAdmin`] if `id` is the only super-admin left.
pub fn revoke_super_admin(env: &Env, id: &Address) -> Result<(), CustodyError> {
    if !is_super_admin(env, id) {
        return Ok(());
    }
    let remaining = super_admin_count(env);
    if remaining <= 1 {
        return Err(CustodyError::LastSuperAdmin);
    }
    env.storage()
        .persistent()
        .remove(&DataKey::SuperAdmin(id.clone()));
    env.storage()
        .instance()
        .set(&DataKey::SuperAdminCount, &(remaining - 1));
    Ok(())
}

/// Check whether `account` holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    match role {
        Role::SuperAdmin => is_super_admin(env, account),
        Role::Admin => is_admin(env, account),
    }
}
