//! # Vesting Ledger
//!
//! Per `(holder, asset id)` release timestamps. A holder that is not an
//! admin may not move units of an asset before its release time.
//!
//! A release time of `0` means "no restriction": an absent entry, an entry
//! ended early and an entry whose time has passed all authorize transfers
//! the same way.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::CustodyError;
use crate::events::emit_release_time_updated;
use crate::ledger::ensure_lengths;
use crate::storage::DataKey;

/// Value stored for a released (or never scheduled) pair.
pub const RELEASED: u64 = 0;

/// Release time for `(holder, id)`, `0` when none is recorded.
pub fn release_time(env: &Env, holder: &Address, id: u64) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Release(holder.clone(), id))
        .unwrap_or(RELEASED)
}

/// Record `release_time` for `(holder, id)`, overwriting any prior value.
pub fn schedule(env: &Env, holder: &Address, id: u64, release_time: u64) {
    let key = DataKey::Release(holder.clone(), id);
    if release_time == RELEASED {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &release_time);
    }
    emit_release_time_updated(env, holder, id, release_time);
}

/// Batched [`schedule`]. Nothing is written unless all three arrays have
/// the same length.
pub fn schedule_many(
    env: &Env,
    holders: &Vec<Address>,
    ids: &Vec<u64>,
    release_times: &Vec<u64>,
) -> Result<(), CustodyError> {
    ensure_lengths(holders.len(), ids.len())?;
    ensure_lengths(holders.len(), release_times.len())?;

    for i in 0..holders.len() {
        schedule(
            env,
            &holders.get_unchecked(i),
            ids.get_unchecked(i),
            release_times.get_unchecked(i),
        );
    }
    Ok(())
}

/// Release every `(holders[i], ids[i])` pair immediately. Already released
/// pairs are left as they are.
pub fn end_early(env: &Env, holders: &Vec<Address>, ids: &Vec<u64>) -> Result<(), CustodyError> {
    ensure_lengths(holders.len(), ids.len())?;

    for i in 0..holders.len() {
        let holder = holders.get_unchecked(i);
        let id = ids.get_unchecked(i);
        if release_time(env, &holder, id) != RELEASED {
            schedule(env, &holder, id, RELEASED);
        }
    }
    Ok(())
}

/// Transfer predicate for a single asset id.
///
/// Admins bypass vesting entirely, including for assets they do not own.
pub fn authorize_transfer(
    env: &Env,
    now: u64,
    holder: &Address,
    id: u64,
    caller_is_admin: bool,
) -> Result<(), CustodyError> {
    if caller_is_admin {
        return Ok(());
    }
    if now < release_time(env, holder, id) {
        return Err(CustodyError::IncompleteVesting);
    }
    Ok(())
}

/// [`authorize_transfer`] over a whole batch. Fails if any id is still
/// vesting.
pub fn authorize_batch(
    env: &Env,
    now: u64,
    holder: &Address,
    ids: &Vec<u64>,
    caller_is_admin: bool,
) -> Result<(), CustodyError> {
    if caller_is_admin {
        return Ok(());
    }
    for id in ids.iter() {
        authorize_transfer(env, now, holder, id, false)?;
    }
    Ok(())
}
