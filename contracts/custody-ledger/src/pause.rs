use soroban_sdk::{Address, Env};

use crate::admin::require_admin;
use crate::errors::CustodyError;
use crate::events::emit_pause;
use crate::storage::DataKey;

/// Set the global pause flag (admin only)
///
/// # Arguments
/// * `env` - The contract environment
/// * `admin` - The admin address
/// * `paused` - True to pause, false to unpause
pub fn set_paused(env: &Env, admin: &Address, paused: bool) -> Result<(), CustodyError> {
    require_admin(env, admin)?;

    env.storage().instance().set(&DataKey::Paused, &paused);
    emit_pause(env, paused, admin);
    Ok(())
}

/// Check whether transfers are paused
pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

/// Transfer predicate: non-admins are blocked while paused, admins never are.
///
/// Independent of vesting; a non-admin transfer must pass both gates.
pub fn authorize(env: &Env, caller_is_admin: bool) -> Result<(), CustodyError> {
    if caller_is_admin || !is_paused(env) {
        return Ok(());
    }
    Err(CustodyError::Paused)
}
