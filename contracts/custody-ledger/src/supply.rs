use soroban_sdk::{Env, Vec};

use crate::errors::CustodyError;
use crate::storage::DataKey;

/// Units of `id` currently in circulation.
pub fn supply_of(env: &Env, id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Supply(id))
        .unwrap_or(0)
}

/// Sum of [`supply_of`] over every id.
pub fn total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn exists(env: &Env, id: u64) -> bool {
    supply_of(env, id) > 0
}

/// Every id ever minted, in first-mint order.
pub fn minted_ids(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::MintedIds)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn record_mint(env: &Env, id: u64, amount: i128) -> Result<(), CustodyError> {
    let supply = supply_of(env, id)
        .checked_add(amount)
        .ok_or(CustodyError::Overflow)?;
    let total = total_supply(env)
        .checked_add(amount)
        .ok_or(CustodyError::Overflow)?;

    if !env.storage().persistent().has(&DataKey::Minted(id)) {
        env.storage().persistent().set(&DataKey::Minted(id), &true);
        let mut ids = minted_ids(env);
        ids.push_back(id);
        env.storage().instance().set(&DataKey::MintedIds, &ids);
    }

    env.storage().persistent().set(&DataKey::Supply(id), &supply);
    env.storage().instance().set(&DataKey::TotalSupply, &total);
    Ok(())
}

pub fn record_burn(env: &Env, id: u64, amount: i128) -> Result<(), CustodyError> {
    let supply = supply_of(env, id)
        .checked_sub(amount)
        .filter(|s| *s >= 0)
        .ok_or(CustodyError::InsufficientBalance)?;
    let total = total_supply(env)
        .checked_sub(amount)
        .filter(|t| *t >= 0)
        .ok_or(CustodyError::InsufficientBalance)?;

    env.storage().persistent().set(&DataKey::Supply(id), &supply);
    env.storage().instance().set(&DataKey::TotalSupply, &total);
    Ok(())
}
