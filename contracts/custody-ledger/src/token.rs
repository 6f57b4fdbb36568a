//! # Token Controller
//!
//! Orchestrates every balance-moving call. Each call runs through
//! `AdminCheck → validation → ConsensusCheck → AuthorizationCheck → Mutate`
//! and exits with an error at the first failing step. All checks that can
//! fail run before the first balance write.
//!
//! Privileged calls (mint, burn and vesting edits) go through the consensus
//! gate and return the resulting [`Admission`]; on `Pending` nothing but the
//! proposal's approval set is written.

use soroban_sdk::{Address, Env, Vec};

use crate::admin::{self, require_admin};
use crate::consensus::{
    self, Action, Admission, BurnBatchRequest, BurnRequest, MintBatchRequest, MintRequest,
    ReleaseEnd, ReleaseUpdate,
};
use crate::errors::CustodyError;
use crate::events::{
    emit_admin_transfer, emit_burn_batch, emit_burn_single, emit_holder_registered,
    emit_mint_batch, emit_mint_single, emit_transfer_batch, emit_transfer_single, AdminTransfer,
    BurnBatch, BurnSingle, MintBatch, MintSingle, TransferBatch, TransferSingle,
};
use crate::ledger::{ensure_covered, ensure_lengths, Ledger, StorageLedger};
use crate::pause;
use crate::storage::DataKey;
use crate::supply;
use crate::vesting;

// ============================================================================
// Mint
// ============================================================================

pub fn mint(
    env: &Env,
    caller: &Address,
    id: u64,
    amount: i128,
    to: &Address,
    release_time: u64,
) -> Result<Admission, CustodyError> {
    require_admin(env, caller)?;
    if amount <= 0 {
        return Err(CustodyError::InvalidAmount);
    }

    let action = Action::Mint(MintRequest {
        id,
        amount,
        to: to.clone(),
        release_time,
    });
    if let Admission::Pending(n) = consensus::propose(env, &action, caller)? {
        return Ok(Admission::Pending(n));
    }

    let ledger = StorageLedger::new(env);
    ledger.credit(to, id, amount)?;
    supply::record_mint(env, id, amount)?;
    vesting::schedule(env, to, id, release_time);
    register_holder(env, &ledger, to);

    emit_mint_single(
        env,
        MintSingle {
            admin: caller.clone(),
            to: to.clone(),
            id,
            amount,
            release_time,
        },
    );
    Ok(Admission::Admitted)
}

pub fn mint_batch(
    env: &Env,
    caller: &Address,
    ids: &Vec<u64>,
    amounts: &Vec<i128>,
    to: &Address,
    release_times: &Vec<u64>,
) -> Result<Admission, CustodyError> {
    require_admin(env, caller)?;
    ensure_lengths(ids.len(), amounts.len())?;
    ensure_lengths(ids.len(), release_times.len())?;
    if ids.is_empty() {
        return Err(CustodyError::InvalidAmount);
    }
    for amount in amounts.iter() {
        if amount <= 0 {
            return Err(CustodyError::InvalidAmount);
        }
    }

    let action = Action::MintBatch(MintBatchRequest {
        ids: ids.clone(),
        amounts: amounts.clone(),
        to: to.clone(),
        release_times: release_times.clone(),
    });
    if let Admission::Pending(n) = consensus::propose(env, &action, caller)? {
        return Ok(Admission::Pending(n));
    }

    let ledger = StorageLedger::new(env);
    for i in 0..ids.len() {
        let id = ids.get_unchecked(i);
        let amount = amounts.get_unchecked(i);
        ledger.credit(to, id, amount)?;
        supply::record_mint(env, id, amount)?;
        vesting::schedule(env, to, id, release_times.get_unchecked(i));
    }
    register_holder(env, &ledger, to);

    emit_mint_batch(
        env,
        MintBatch {
            admin: caller.clone(),
            to: to.clone(),
            ids: ids.clone(),
            amounts: amounts.clone(),
        },
    );
    Ok(Admission::Admitted)
}

// ============================================================================
// Burn
// ============================================================================

/// Burn from any holder. The holder's approval is not required.
pub fn burn(
    env: &Env,
    caller: &Address,
    from: &Address,
    id: u64,
    amount: i128,
) -> Result<Admission, CustodyError> {
    require_admin(env, caller)?;
    if amount <= 0 {
        return Err(CustodyError::InvalidAmount);
    }
    let ledger = StorageLedger::new(env);
    if ledger.balance_of(from, id) < amount {
        return Err(CustodyError::InsufficientBalance);
    }

    let action = Action::Burn(BurnRequest {
        from: from.clone(),
        id,
        amount,
    });
    if let Admission::Pending(n) = consensus::propose(env, &action, caller)? {
        return Ok(Admission::Pending(n));
    }

    ledger.debit(from, id, amount)?;
    supply::record_burn(env, id, amount)?;

    emit_burn_single(
        env,
        BurnSingle {
            admin: caller.clone(),
            from: from.clone(),
            id,
            amount,
        },
    );
    Ok(Admission::Admitted)
}

pub fn burn_batch(
    env: &Env,
    caller: &Address,
    from: &Address,
    ids: &Vec<u64>,
    amounts: &Vec<i128>,
) -> Result<Admission, CustodyError> {
    require_admin(env, caller)?;
    let ledger = StorageLedger::new(env);
    ensure_covered(env, &ledger, from, ids, amounts)?;

    let action = Action::BurnBatch(BurnBatchRequest {
        from: from.clone(),
        ids: ids.clone(),
        amounts: amounts.clone(),
    });
    if let Admission::Pending(n) = consensus::propose(env, &action, caller)? {
        return Ok(Admission::Pending(n));
    }

    for i in 0..ids.len() {
        let id = ids.get_unchecked(i);
        let amount = amounts.get_unchecked(i);
        ledger.debit(from, id, amount)?;
        supply::record_burn(env, id, amount)?;
    }

    emit_burn_batch(
        env,
        BurnBatch {
            admin: caller.clone(),
            from: from.clone(),
            ids: ids.clone(),
            amounts: amounts.clone(),
        },
    );
    Ok(Admission::Admitted)
}

// ============================================================================
// Vesting edits
// ============================================================================

pub fn modify_release_time(
    env: &Env,
    caller: &Address,
    holders: &Vec<Address>,
    ids: &Vec<u64>,
    release_times: &Vec<u64>,
) -> Result<Admission, CustodyError> {
    require_admin(env, caller)?;
    ensure_lengths(holders.len(), ids.len())?;
    ensure_lengths(holders.len(), release_times.len())?;

    let action = Action::ModifyRelease(ReleaseUpdate {
        holders: holders.clone(),
        ids: ids.clone(),
        release_times: release_times.clone(),
    });
    if let Admission::Pending(n) = consensus::propose(env, &action, caller)? {
        return Ok(Admission::Pending(n));
    }

    vesting::schedule_many(env, holders, ids, release_times)?;
    Ok(Admission::Admitted)
}

pub fn end_release_time(
    env: &Env,
    caller: &Address,
    holders: &Vec<Address>,
    ids: &Vec<u64>,
) -> Result<Admission, CustodyError> {
    require_admin(env, caller)?;
    ensure_lengths(holders.len(), ids.len())?;

    let action = Action::EndRelease(ReleaseEnd {
        holders: holders.clone(),
        ids: ids.clone(),
    });
    if let Admission::Pending(n) = consensus::propose(env, &action, caller)? {
        return Ok(Admission::Pending(n));
    }

    vesting::end_early(env, holders, ids)?;
    Ok(Admission::Admitted)
}

// ============================================================================
// Transfers
// ============================================================================

pub fn transfer(
    env: &Env,
    caller: &Address,
    from: &Address,
    to: &Address,
    id: u64,
    amount: i128,
) -> Result<(), CustodyError> {
    let ledger = StorageLedger::new(env);
    let mut ids = Vec::new(env);
    ids.push_back(id);
    let mut amounts = Vec::new(env);
    amounts.push_back(amount);

    authorize_transfer(env, &ledger, caller, from, &ids, &amounts)?;

    ledger.debit(from, id, amount)?;
    ledger.credit(to, id, amount)?;
    register_holder(env, &ledger, to);

    emit_transfer_single(
        env,
        TransferSingle {
            operator: caller.clone(),
            from: from.clone(),
            to: to.clone(),
            id,
            amount,
        },
    );
    Ok(())
}

pub fn batch_transfer(
    env: &Env,
    caller: &Address,
    from: &Address,
    to: &Address,
    ids: &Vec<u64>,
    amounts: &Vec<i128>,
) -> Result<(), CustodyError> {
    let ledger = StorageLedger::new(env);
    authorize_transfer(env, &ledger, caller, from, ids, amounts)?;

    for i in 0..ids.len() {
        let id = ids.get_unchecked(i);
        let amount = amounts.get_unchecked(i);
        ledger.debit(from, id, amount)?;
        ledger.credit(to, id, amount)?;
    }
    register_holder(env, &ledger, to);

    emit_transfer_batch(
        env,
        TransferBatch {
            operator: caller.clone(),
            from: from.clone(),
            to: to.clone(),
            ids: ids.clone(),
            amounts: amounts.clone(),
        },
    );
    Ok(())
}

/// Fan out assets from one holder to many recipients, setting each
/// recipient's release time. Admin only; neither pause nor vesting apply.
pub fn admin_transfer(
    env: &Env,
    caller: &Address,
    from: &Address,
    recipients: &Vec<Address>,
    ids: &Vec<u64>,
    release_times: &Vec<u64>,
    amounts: &Vec<i128>,
) -> Result<(), CustodyError> {
    require_admin(env, caller)?;
    ensure_lengths(recipients.len(), ids.len())?;
    ensure_lengths(recipients.len(), release_times.len())?;
    let ledger = StorageLedger::new(env);
    ensure_covered(env, &ledger, from, ids, amounts)?;

    for i in 0..recipients.len() {
        let recipient = recipients.get_unchecked(i);
        let id = ids.get_unchecked(i);
        let amount = amounts.get_unchecked(i);
        ledger.debit(from, id, amount)?;
        ledger.credit(&recipient, id, amount)?;
        vesting::schedule(env, &recipient, id, release_times.get_unchecked(i));
        register_holder(env, &ledger, &recipient);
    }

    emit_admin_transfer(
        env,
        AdminTransfer {
            admin: caller.clone(),
            from: from.clone(),
            recipients: recipients.clone(),
            ids: ids.clone(),
            release_times: release_times.clone(),
            amounts: amounts.clone(),
        },
    );
    Ok(())
}

/// Owner/operator check, then the pause and vesting gates, then balance
/// sufficiency over the whole batch.
fn authorize_transfer<L: Ledger>(
    env: &Env,
    ledger: &L,
    caller: &Address,
    from: &Address,
    ids: &Vec<u64>,
    amounts: &Vec<i128>,
) -> Result<(), CustodyError> {
    ensure_lengths(ids.len(), amounts.len())?;
    if caller != from && !ledger.is_approved_for_all(from, caller) {
        return Err(CustodyError::NotApproved);
    }

    let caller_is_admin = admin::is_admin(env, caller);
    pause::authorize(env, caller_is_admin)?;
    vesting::authorize_batch(env, env.ledger().timestamp(), from, ids, caller_is_admin)?;

    ensure_covered(env, ledger, from, ids, amounts)
}

// ============================================================================
// Holders
// ============================================================================

/// On an address's first receipt, approve every current admin as its
/// operator.
fn register_holder<L: Ledger>(env: &Env, ledger: &L, holder: &Address) {
    let key = DataKey::Holder(holder.clone());
    if env.storage().persistent().has(&key) {
        return;
    }
    env.storage().persistent().set(&key, &true);

    let mut operators = 0u32;
    for i in 0..admin::count(env) {
        if let Ok(operator) = admin::at(env, i) {
            if &operator != holder {
                ledger.set_approval_for_all(holder, &operator, true);
                operators += 1;
            }
        }
    }
    emit_holder_registered(env, holder, operators);
}

pub fn is_holder(env: &Env, holder: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Holder(holder.clone()))
}
