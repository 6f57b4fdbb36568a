//! # Consensus Gate
//!
//! N-of-M approval for privileged actions. When the gate is enabled, an
//! action only executes once `required_approvals` distinct admins have
//! submitted the *identical* action. There is no separate approve/execute
//! step: every matching call is an approval, and the call that reaches the
//! threshold is the one that executes.
//!
//! ## Proposal identity
//! A proposal is keyed by the sha256 of the XDR encoding of its [`Action`],
//! which carries the operation kind and its full argument tuple. Any
//! difference in any argument yields a different proposal.
//!
//! ## Rounds
//! Once a proposal executes its approval set is cleared, so submitting the
//! same action again starts a fresh round that needs M approvals again.
//!
//! ## Toggling
//! With `reset_on_toggle` set, every change of the `enabled` flag bumps the
//! consensus epoch and approvals recorded under an older epoch are
//! discarded the next time their proposal is touched. With it unset,
//! pending approvals survive a disable/enable cycle, unless the action is
//! executed directly while the gate is off: that closes the round.
//!
//! ## Revoked admins
//! Approvals from identities that are no longer admins are pruned before
//! counting, so they never contribute to the threshold.

use soroban_sdk::{contracttype, xdr::ToXdr, Address, BytesN, Env, Vec};

use crate::admin::{self, require_admin, require_super_admin};
use crate::errors::CustodyError;
use crate::events::{
    emit_multisig_toggled, emit_proposal_approved, emit_proposal_executed, emit_threshold_updated,
};
use crate::storage::DataKey;

// ============================================================================
// Types
// ============================================================================

/// Gate configuration, kept in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsensusConfig {
    /// Whether privileged actions need M approvals.
    pub enabled: bool,
    /// M, the number of distinct admin approvals needed.
    pub required_approvals: u32,
    /// Discard pending approvals whenever `enabled` changes.
    pub reset_on_toggle: bool,
    /// Bumped on every toggle while `reset_on_toggle` is set.
    pub epoch: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintRequest {
    pub id: u64,
    pub amount: i128,
    pub to: Address,
    pub release_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintBatchRequest {
    pub ids: Vec<u64>,
    pub amounts: Vec<i128>,
    pub to: Address,
    pub release_times: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnRequest {
    pub from: Address,
    pub id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnBatchRequest {
    pub from: Address,
    pub ids: Vec<u64>,
    pub amounts: Vec<i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseUpdate {
    pub holders: Vec<Address>,
    pub ids: Vec<u64>,
    pub release_times: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseEnd {
    pub holders: Vec<Address>,
    pub ids: Vec<u64>,
}

/// A privileged action subject to the gate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Mint(MintRequest),
    MintBatch(MintBatchRequest),
    Burn(BurnRequest),
    BurnBatch(BurnBatchRequest),
    ModifyRelease(ReleaseUpdate),
    EndRelease(ReleaseEnd),
}

/// Approval state of one action.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub action: Action,
    /// Approvers of the current round, in arrival order.
    pub approvals: Vec<Address>,
    /// Consensus epoch the approvals were recorded under.
    pub epoch: u32,
    /// Number of rounds that reached the threshold.
    pub executions: u32,
    pub last_executed_at: u64,
}

/// Outcome of submitting an action to the gate.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Admission {
    /// The action may run now.
    Admitted,
    /// Approval recorded; carries the live approval count.
    Pending(u32),
}

// ============================================================================
// Strategies
// ============================================================================

pub trait ConsensusStrategy {
    fn admit(
        &self,
        env: &Env,
        signature: &BytesN<32>,
        action: &Action,
        approver: &Address,
    ) -> Result<Admission, CustodyError>;
}

/// Gate disabled: every admin call executes immediately.
///
/// A round left pending from while the gate was enabled is closed by the
/// direct execution, so its approvals cannot be spent a second time.
pub struct Direct;

impl ConsensusStrategy for Direct {
    fn admit(
        &self,
        env: &Env,
        signature: &BytesN<32>,
        _action: &Action,
        approver: &Address,
    ) -> Result<Admission, CustodyError> {
        let key = DataKey::Proposal(signature.clone());
        if let Some(proposal) = env.storage().persistent().get::<_, Proposal>(&key) {
            close_round(env, &key, proposal, signature, approver)?;
        }
        Ok(Admission::Admitted)
    }
}

/// Gate enabled: aggregate approvals until `required` distinct live admins
/// agree.
pub struct ThresholdGated {
    pub required: u32,
    pub epoch: u32,
}

impl ConsensusStrategy for ThresholdGated {
    fn admit(
        &self,
        env: &Env,
        signature: &BytesN<32>,
        action: &Action,
        approver: &Address,
    ) -> Result<Admission, CustodyError> {
        let key = DataKey::Proposal(signature.clone());
        let mut proposal: Proposal = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| Proposal {
                action: action.clone(),
                approvals: Vec::new(env),
                epoch: self.epoch,
                executions: 0,
                last_executed_at: 0,
            });

        if proposal.epoch != self.epoch {
            proposal.approvals = Vec::new(env);
            proposal.epoch = self.epoch;
        }

        let mut live = Vec::new(env);
        for existing in proposal.approvals.iter() {
            if admin::is_admin(env, &existing) {
                live.push_back(existing);
            }
        }
        if !live.contains(approver) {
            live.push_back(approver.clone());
        }

        let approvals = live.len();
        if approvals >= self.required {
            close_round(env, &key, proposal, signature, approver)?;
            return Ok(Admission::Admitted);
        }

        proposal.approvals = live;
        env.storage().persistent().set(&key, &proposal);

        emit_proposal_approved(env, signature, approver, approvals, self.required);
        Ok(Admission::Pending(approvals))
    }
}

/// Clear the approval set and record the execution.
fn close_round(
    env: &Env,
    key: &DataKey,
    mut proposal: Proposal,
    signature: &BytesN<32>,
    executor: &Address,
) -> Result<(), CustodyError> {
    proposal.approvals = Vec::new(env);
    proposal.executions = proposal
        .executions
        .checked_add(1)
        .ok_or(CustodyError::Overflow)?;
    proposal.last_executed_at = env.ledger().timestamp();
    env.storage().persistent().set(key, &proposal);

    emit_proposal_executed(env, signature, executor, proposal.executions);
    Ok(())
}

// ============================================================================
// Gate
// ============================================================================

/// Content hash identifying `action`.
pub fn signature_of(env: &Env, action: &Action) -> BytesN<32> {
    env.crypto().sha256(&action.clone().to_xdr(env)).to_bytes()
}

/// Submit `action` on behalf of `approver`, who must already be checked as
/// an admin. The strategy is picked from the gate's current state.
pub fn propose(env: &Env, action: &Action, approver: &Address) -> Result<Admission, CustodyError> {
    let config = config(env);
    let signature = signature_of(env, action);

    if config.enabled {
        ThresholdGated {
            required: config.required_approvals,
            epoch: config.epoch,
        }
        .admit(env, &signature, action, approver)
    } else {
        Direct.admit(env, &signature, action, approver)
    }
}

// ============================================================================
// Configuration
// ============================================================================

pub fn config(env: &Env) -> ConsensusConfig {
    env.storage()
        .instance()
        .get(&DataKey::ConsensusConfig)
        .unwrap_or(ConsensusConfig {
            enabled: false,
            required_approvals: 1,
            reset_on_toggle: false,
            epoch: 0,
        })
}

pub(crate) fn store_config(env: &Env, config: &ConsensusConfig) {
    env.storage()
        .instance()
        .set(&DataKey::ConsensusConfig, config);
}

/// Enable or disable the gate (admin only).
pub fn set_multisig(env: &Env, caller: &Address, enabled: bool) -> Result<(), CustodyError> {
    require_admin(env, caller)?;

    let mut config = config(env);
    if config.enabled != enabled && config.reset_on_toggle {
        config.epoch = config.epoch.checked_add(1).ok_or(CustodyError::Overflow)?;
    }
    config.enabled = enabled;
    store_config(env, &config);

    emit_multisig_toggled(env, enabled, caller, config.epoch);
    Ok(())
}

/// Change M (super-admin only).
///
/// # Errors
/// - [`CustodyError::NotSuperAdmin`] if `caller` lacks the role.
/// - [`CustodyError::InvalidThreshold`] unless `1 <= required <= admin count`.
pub fn set_required_approvals(
    env: &Env,
    caller: &Address,
    required: u32,
) -> Result<(), CustodyError> {
    require_super_admin(env, caller)?;
    if required == 0 || required > admin::count(env) {
        return Err(CustodyError::InvalidThreshold);
    }

    let mut config = config(env);
    config.required_approvals = required;
    store_config(env, &config);

    emit_threshold_updated(env, required, caller);
    Ok(())
}

/// Choose whether toggling the gate discards pending approvals
/// (super-admin only).
pub fn set_proposal_retention(
    env: &Env,
    caller: &Address,
    reset_on_toggle: bool,
) -> Result<(), CustodyError> {
    require_super_admin(env, caller)?;

    let mut config = config(env);
    config.reset_on_toggle = reset_on_toggle;
    store_config(env, &config);
    Ok(())
}

pub fn get_proposal(env: &Env, signature: &BytesN<32>) -> Option<Proposal> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(signature.clone()))
}
