//! # Custody Ledger Contract
//!
//! A multi-asset custody ledger with layered access control:
//!
//! - an ordered **admin set** that can mint, burn, pause and redirect assets,
//!   managed by a **super-admin** tier;
//! - an optional **N-of-M consensus gate**: when enabled, a privileged action
//!   executes only once M distinct admins have submitted the identical call;
//! - a per-holder, per-asset **vesting clock** blocking non-admin transfers
//!   until a release time;
//! - a global **pause switch** blocking non-admin transfers.
//!
//! Balances are plain `(holder, id) -> amount` bookkeeping behind the
//! [`ledger::Ledger`] trait. Every failed invocation is rolled back in full.

#![no_std]
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, Vec};

pub mod admin;
pub mod consensus;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod pause;
pub mod storage;
pub mod supply;
pub mod token;
pub mod vesting;

#[cfg(test)]
mod tests;

use admin::Role;
use consensus::{Action, Admission, ConsensusConfig, Proposal};
use errors::CustodyError;
use events::{emit_approval_for_all, emit_role_granted, emit_role_revoked};
use ledger::{Ledger, StorageLedger};
use storage::DataKey;

#[contract]
pub struct CustodyLedgerContract;

#[contractimpl]
impl CustodyLedgerContract {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the ledger.
    ///
    /// # Arguments
    /// * `super_admin` - First holder of the super-admin role (must authorize)
    /// * `admins` - Initial admin set, in index order
    /// * `required_approvals` - M for the consensus gate, which starts disabled
    ///
    /// # Errors
    /// - `AlreadyInitialized` - Called more than once
    /// - `AlreadyAdmin` - `admins` contains a duplicate
    /// - `InvalidThreshold` - `required_approvals` outside `1..=admins.len()`
    pub fn initialize(
        env: Env,
        super_admin: Address,
        admins: Vec<Address>,
        required_approvals: u32,
    ) -> Result<(), CustodyError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(CustodyError::AlreadyInitialized);
        }
        super_admin.require_auth();

        if required_approvals == 0 || required_approvals > admins.len() {
            return Err(CustodyError::InvalidThreshold);
        }

        admin::grant_super_admin(&env, &super_admin);
        for id in admins.iter() {
            admin::add(&env, &id)?;
        }
        consensus::store_config(
            &env,
            &ConsensusConfig {
                enabled: false,
                required_approvals,
                reset_on_toggle: false,
                epoch: 0,
            },
        );
        env.storage().instance().set(&DataKey::Initialized, &true);

        log!(
            &env,
            "custody ledger initialized with {} admins, threshold {}",
            admins.len(),
            required_approvals
        );
        Ok(())
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Grant `role` to `account` (super-admin only).
    ///
    /// Granting `Role::Admin` appends `account` to the admin list; granting
    /// `Role::SuperAdmin` to an existing super-admin is a no-op.
    ///
    /// # Errors
    /// - `NotSuperAdmin` - Caller lacks the super-admin role
    /// - `AlreadyAdmin` - `account` is already an admin
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        admin::require_super_admin(&env, &caller)?;

        match role {
            Role::Admin => {
                admin::add(&env, &account)?;
            }
            Role::SuperAdmin => admin::grant_super_admin(&env, &account),
        }

        log!(&env, "role granted: {} -> {}", role, account);
        emit_role_granted(&env, role, &account, &caller);
        Ok(())
    }

    /// Revoke `role` from `account` (super-admin only).
    ///
    /// Revoking `Role::Admin` removes `account` from the admin list with
    /// swap-and-pop. Pending approvals it recorded stop counting.
    ///
    /// # Errors
    /// - `NotSuperAdmin` - Caller lacks the super-admin role
    /// - `UnknownAdmin` - `account` is not an admin
    /// - `LastSuperAdmin` - `account` is the only super-admin left
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        admin::require_super_admin(&env, &caller)?;

        match role {
            Role::Admin => admin::remove(&env, &account)?,
            Role::SuperAdmin => admin::revoke_super_admin(&env, &account)?,
        }

        log!(&env, "role revoked: {} -> {}", role, account);
        emit_role_revoked(&env, role, &account, &caller);
        Ok(())
    }

    // ========================================================================
    // Consensus gate
    // ========================================================================

    /// Enable or disable the consensus gate (admin only).
    pub fn set_multisig(env: Env, caller: Address, enabled: bool) -> Result<(), CustodyError> {
        caller.require_auth();
        consensus::set_multisig(&env, &caller, enabled)?;
        log!(&env, "multisig enabled: {}", enabled);
        Ok(())
    }

    /// Set M (super-admin only).
    ///
    /// # Errors
    /// - `NotSuperAdmin` - Caller lacks the super-admin role
    /// - `InvalidThreshold` - `required` outside `1..=admin_count`
    pub fn set_required_approvals(
        env: Env,
        caller: Address,
        required: u32,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        consensus::set_required_approvals(&env, &caller, required)?;
        log!(&env, "required approvals: {}", required);
        Ok(())
    }

    /// Choose whether toggling the gate discards pending approvals
    /// (super-admin only).
    pub fn set_proposal_retention(
        env: Env,
        caller: Address,
        reset_on_toggle: bool,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        consensus::set_proposal_retention(&env, &caller, reset_on_toggle)
    }

    // ========================================================================
    // Pause
    // ========================================================================

    /// Pause or resume non-admin transfers (admin only).
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), CustodyError> {
        caller.require_auth();
        pause::set_paused(&env, &caller, paused)?;
        log!(&env, "paused: {}", paused);
        Ok(())
    }

    // ========================================================================
    // Mint / burn
    // ========================================================================

    /// Mint `amount` of `id` to `to` and set its release time (admin only,
    /// consensus-gated).
    ///
    /// # Returns
    /// `Admitted` if the mint executed, `Pending(n)` if the approval was
    /// recorded and `n` admins have now submitted this exact mint.
    ///
    /// # Errors
    /// - `NotAnAdmin` - Caller is not an admin
    /// - `InvalidAmount` - `amount <= 0`
    pub fn mint(
        env: Env,
        caller: Address,
        id: u64,
        amount: i128,
        to: Address,
        release_time: u64,
    ) -> Result<Admission, CustodyError> {
        caller.require_auth();
        let admission = token::mint(&env, &caller, id, amount, &to, release_time)?;
        log!(&env, "mint id {} amount {}: {}", id, amount, admission);
        Ok(admission)
    }

    /// Batched [`Self::mint`] to a single recipient.
    ///
    /// # Errors
    /// - `NotAnAdmin` - Caller is not an admin
    /// - `ArrayLengthMismatch` - Parallel arrays differ in length
    /// - `InvalidAmount` - Any amount `<= 0`
    pub fn mint_batch(
        env: Env,
        caller: Address,
        ids: Vec<u64>,
        amounts: Vec<i128>,
        to: Address,
        release_times: Vec<u64>,
    ) -> Result<Admission, CustodyError> {
        caller.require_auth();
        let admission = token::mint_batch(&env, &caller, &ids, &amounts, &to, &release_times)?;
        log!(&env, "mint batch of {}: {}", ids.len(), admission);
        Ok(admission)
    }

    /// Burn `amount` of `id` from any holder (admin only, consensus-gated).
    ///
    /// # Errors
    /// - `NotAnAdmin` - Caller is not an admin
    /// - `InvalidAmount` - `amount <= 0`
    /// - `InsufficientBalance` - `from` holds less than `amount`
    pub fn burn(
        env: Env,
        caller: Address,
        from: Address,
        id: u64,
        amount: i128,
    ) -> Result<Admission, CustodyError> {
        caller.require_auth();
        let admission = token::burn(&env, &caller, &from, id, amount)?;
        log!(&env, "burn id {} amount {}: {}", id, amount, admission);
        Ok(admission)
    }

    pub fn burn_batch(
        env: Env,
        caller: Address,
        from: Address,
        ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<Admission, CustodyError> {
        caller.require_auth();
        let admission = token::burn_batch(&env, &caller, &from, &ids, &amounts)?;
        log!(&env, "burn batch of {}: {}", ids.len(), admission);
        Ok(admission)
    }

    // ========================================================================
    // Vesting
    // ========================================================================

    /// Overwrite release times for `(holders[i], ids[i])` (admin only,
    /// consensus-gated).
    pub fn modify_release_time(
        env: Env,
        caller: Address,
        holders: Vec<Address>,
        ids: Vec<u64>,
        release_times: Vec<u64>,
    ) -> Result<Admission, CustodyError> {
        caller.require_auth();
        token::modify_release_time(&env, &caller, &holders, &ids, &release_times)
    }

    /// Release `(holders[i], ids[i])` immediately (admin only,
    /// consensus-gated). Already released pairs are left untouched.
    pub fn end_release_time(
        env: Env,
        caller: Address,
        holders: Vec<Address>,
        ids: Vec<u64>,
    ) -> Result<Admission, CustodyError> {
        caller.require_auth();
        token::end_release_time(&env, &caller, &holders, &ids)
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    /// Move `amount` of `id` from `from` to `to`.
    ///
    /// The caller must be `from` or an operator approved by `from`. Non-admin
    /// callers are subject to the pause switch and to `from`'s vesting clock.
    ///
    /// # Errors
    /// - `NotApproved` - Caller is neither owner nor approved operator
    /// - `Paused` - Transfers are paused and caller is not an admin
    /// - `IncompleteVesting` - `id` has not been released for `from`
    /// - `InsufficientBalance` - `from` holds less than `amount`
    pub fn transfer(
        env: Env,
        caller: Address,
        from: Address,
        to: Address,
        id: u64,
        amount: i128,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        token::transfer(&env, &caller, &from, &to, id, amount)
    }

    /// Batched [`Self::transfer`]. Fails as a whole if any id is still
    /// vesting.
    pub fn batch_transfer(
        env: Env,
        caller: Address,
        from: Address,
        to: Address,
        ids: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        token::batch_transfer(&env, &caller, &from, &to, &ids, &amounts)
    }

    /// Move `amounts[i]` of `ids[i]` from `from` to `recipients[i]` and set
    /// the recipient's release time to `release_times[i]` (admin only).
    pub fn admin_transfer(
        env: Env,
        caller: Address,
        from: Address,
        recipients: Vec<Address>,
        ids: Vec<u64>,
        release_times: Vec<u64>,
        amounts: Vec<i128>,
    ) -> Result<(), CustodyError> {
        caller.require_auth();
        token::admin_transfer(
            &env,
            &caller,
            &from,
            &recipients,
            &ids,
            &release_times,
            &amounts,
        )?;
        log!(&env, "admin transfer to {} recipients", recipients.len());
        Ok(())
    }

    /// Approve or revoke `operator` over all of `owner`'s assets.
    ///
    /// # Errors
    /// - `SelfApproval` - `owner == operator`
    pub fn set_approval_for_all(
        env: Env,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), CustodyError> {
        owner.require_auth();
        if owner == operator {
            return Err(CustodyError::SelfApproval);
        }
        StorageLedger::new(&env).set_approval_for_all(&owner, &operator, approved);
        emit_approval_for_all(&env, &owner, &operator, approved);
        Ok(())
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn admin_count(env: Env) -> u32 {
        admin::count(&env)
    }

    pub fn admin_at(env: Env, index: u32) -> Result<Address, CustodyError> {
        admin::at(&env, index)
    }

    pub fn admin_index(env: Env, account: Address) -> Result<u32, CustodyError> {
        admin::index_of(&env, &account)
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        admin::is_admin(&env, &account)
    }

    pub fn is_super_admin(env: Env, account: Address) -> bool {
        admin::is_super_admin(&env, &account)
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        admin::has_role(&env, role, &account)
    }

    pub fn is_multisig_enabled(env: Env) -> bool {
        consensus::config(&env).enabled
    }

    pub fn required_approvals(env: Env) -> u32 {
        consensus::config(&env).required_approvals
    }

    pub fn consensus_config(env: Env) -> ConsensusConfig {
        consensus::config(&env)
    }

    /// Content hash a proposal for `action` is stored under.
    pub fn proposal_signature(env: Env, action: Action) -> BytesN<32> {
        consensus::signature_of(&env, &action)
    }

    pub fn get_proposal(env: Env, signature: BytesN<32>) -> Option<Proposal> {
        consensus::get_proposal(&env, &signature)
    }

    pub fn release_time(env: Env, holder: Address, id: u64) -> u64 {
        vesting::release_time(&env, &holder, id)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    pub fn supply_of(env: Env, id: u64) -> i128 {
        supply::supply_of(&env, id)
    }

    pub fn total_supply(env: Env) -> i128 {
        supply::total_supply(&env)
    }

    pub fn exists(env: Env, id: u64) -> bool {
        supply::exists(&env, id)
    }

    pub fn minted_ids(env: Env) -> Vec<u64> {
        supply::minted_ids(&env)
    }

    pub fn minted_id_at(env: Env, index: u32) -> Option<u64> {
        supply::minted_ids(&env).get(index)
    }

    pub fn balance_of(env: Env, holder: Address, id: u64) -> i128 {
        StorageLedger::new(&env).balance_of(&holder, id)
    }

    /// Balances of `(holders[i], ids[i])`.
    pub fn balance_of_batch(
        env: Env,
        holders: Vec<Address>,
        ids: Vec<u64>,
    ) -> Result<Vec<i128>, CustodyError> {
        ledger::ensure_lengths(holders.len(), ids.len())?;
        let ledger = StorageLedger::new(&env);
        let mut balances = Vec::new(&env);
        for i in 0..holders.len() {
            balances.push_back(ledger.balance_of(&holders.get_unchecked(i), ids.get_unchecked(i)));
        }
        Ok(balances)
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        StorageLedger::new(&env).is_approved_for_all(&owner, &operator)
    }

    pub fn is_holder(env: Env, account: Address) -> bool {
        token::is_holder(&env, &account)
    }
}
