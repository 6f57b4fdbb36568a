//! # Custody Ledger – Event Logging
//!
//! Every state change publishes one `#[contractevent]` struct. The macro uses
//! the snake_case struct name as the leading topic and packs the fields into
//! a map payload, so indexers can decode each event by name.
//!
//! Mint and burn completion events are published only by the call that
//! actually executes the action: a consensus call that merely records an
//! approval publishes [`ProposalApproved`] instead.
use soroban_sdk::{contractevent, Address, BytesN, Env, Vec};

use crate::admin::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Supply changes
// ─────────────────────────────────────────────────────────────────────────────

/// Emitted when a single mint executes.
///
/// # Fields
/// * `admin` – The admin whose call executed the mint.
/// * `to` – Recipient of the new units.
/// * `id` – Asset id.
/// * `amount` – Units minted.
/// * `release_time` – Vesting release time recorded for `(to, id)`.
#[contractevent]
#[derive(Clone, Debug)]
pub struct MintSingle {
    pub admin: Address,
    pub to: Address,
    pub id: u64,
    pub amount: i128,
    pub release_time: u64,
}

/// Emitted when a batch mint executes.
#[contractevent]
#[derive(Clone, Debug)]
pub struct MintBatch {
    pub admin: Address,
    pub to: Address,
    pub ids: Vec<u64>,
    pub amounts: Vec<i128>,
}

/// Emitted when a single burn executes.
#[contractevent]
#[derive(Clone, Debug)]
pub struct BurnSingle {
    pub admin: Address,
    pub from: Address,
    pub id: u64,
    pub amount: i128,
}

/// Emitted when a batch burn executes.
#[contractevent]
#[derive(Clone, Debug)]
pub struct BurnBatch {
    pub admin: Address,
    pub from: Address,
    pub ids: Vec<u64>,
    pub amounts: Vec<i128>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Balance movements
// ─────────────────────────────────────────────────────────────────────────────

/// Emitted by `transfer`.
#[contractevent]
#[derive(Clone, Debug)]
pub struct TransferSingle {
    pub operator: Address,
    pub from: Address,
    pub to: Address,
    pub id: u64,
    pub amount: i128,
}

/// Emitted by `batch_transfer`.
#[contractevent]
#[derive(Clone, Debug)]
pub struct TransferBatch {
    pub operator: Address,
    pub from: Address,
    pub to: Address,
    pub ids: Vec<u64>,
    pub amounts: Vec<i128>,
}

/// Emitted by the admin fan-out transfer.
///
/// `recipients[i]` received `amounts[i]` of `ids[i]` with release time
/// `release_times[i]`.
#[contractevent]
#[derive(Clone, Debug)]
pub struct AdminTransfer {
    pub admin: Address,
    pub from: Address,
    pub recipients: Vec<Address>,
    pub ids: Vec<u64>,
    pub release_times: Vec<u64>,
    pub amounts: Vec<i128>,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct ApprovalForAll {
    pub owner: Address,
    pub operator: Address,
    pub approved: bool,
}

/// Emitted the first time an address receives any asset. Every admin at
/// that moment was granted approval-for-all over the holder.
#[contractevent]
#[derive(Clone, Debug)]
pub struct HolderRegistered {
    pub holder: Address,
    pub operators: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Access control and consensus
// ─────────────────────────────────────────────────────────────────────────────

#[contractevent]
#[derive(Clone, Debug)]
pub struct PauseEvent {
    pub paused: bool,
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct MultisigToggled {
    pub enabled: bool,
    pub admin: Address,
    pub epoch: u32,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct ThresholdUpdated {
    pub required_approvals: u32,
    pub admin: Address,
}

/// Emitted when a consensus call records an approval without reaching the
/// threshold.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalApproved {
    pub signature: BytesN<32>,
    pub approver: Address,
    pub approvals: u32,
    pub required: u32,
}

/// Emitted when an approval crosses the threshold and the round closes.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalExecuted {
    pub signature: BytesN<32>,
    pub executor: Address,
    pub round: u32,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct RoleGranted {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct ReleaseTimeUpdated {
    pub holder: Address,
    pub id: u64,
    pub release_time: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Emit helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn emit_mint_single(env: &Env, event: MintSingle) {
    event.publish(env);
}

pub fn emit_mint_batch(env: &Env, event: MintBatch) {
    event.publish(env);
}

pub fn emit_burn_single(env: &Env, event: BurnSingle) {
    event.publish(env);
}

pub fn emit_burn_batch(env: &Env, event: BurnBatch) {
    event.publish(env);
}

pub fn emit_transfer_single(env: &Env, event: TransferSingle) {
    event.publish(env);
}

pub fn emit_transfer_batch(env: &Env, event: TransferBatch) {
    event.publish(env);
}

pub fn emit_admin_transfer(env: &Env, event: AdminTransfer) {
    event.publish(env);
}

pub fn emit_approval_for_all(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    ApprovalForAll {
        owner: owner.clone(),
        operator: operator.clone(),
        approved,
    }
    .publish(env);
}

pub fn emit_holder_registered(env: &Env, holder: &Address, operators: u32) {
    HolderRegistered {
        holder: holder.clone(),
        operators,
    }
    .publish(env);
}

pub fn emit_pause(env: &Env, paused: bool, admin: &Address) {
    PauseEvent {
        paused,
        admin: admin.clone(),
    }
    .publish(env);
}

pub fn emit_multisig_toggled(env: &Env, enabled: bool, admin: &Address, epoch: u32) {
    MultisigToggled {
        enabled,
        admin: admin.clone(),
        epoch,
    }
    .publish(env);
}

pub fn emit_threshold_updated(env: &Env, required_approvals: u32, admin: &Address) {
    ThresholdUpdated {
        required_approvals,
        admin: admin.clone(),
    }
    .publish(env);
}

pub fn emit_proposal_approved(
    env: &Env,
    signature: &BytesN<32>,
    approver: &Address,
    approvals: u32,
    required: u32,
) {
    ProposalApproved {
        signature: signature.clone(),
        approver: approver.clone(),
        approvals,
        required,
    }
    .publish(env);
}

pub fn emit_proposal_executed(env: &Env, signature: &BytesN<32>, executor: &Address, round: u32) {
    ProposalExecuted {
        signature: signature.clone(),
        executor: executor.clone(),
        round,
    }
    .publish(env);
}

pub fn emit_role_granted(env: &Env, role: Role, account: &Address, sender: &Address) {
    RoleGranted {
        role,
        account: account.clone(),
        sender: sender.clone(),
    }
    .publish(env);
}

pub fn emit_role_revoked(env: &Env, role: Role, account: &Address, sender: &Address) {
    RoleRevoked {
        role,
        account: account.clone(),
        sender: sender.clone(),
    }
    .publish(env);
}

pub fn emit_release_time_updated(env: &Env, holder: &Address, id: u64, release_time: u64) {
    ReleaseTimeUpdated {
        holder: holder.clone(),
        id,
        release_time,
    }
    .publish(env);
}
