//! # Balance Ledger
//!
//! The plain multi-asset bookkeeping the access-control layer sits on:
//! balances per `(holder, id)` and the approval-for-all table.
//!
//! [`Ledger`] is the seam the token controller is written against;
//! [`StorageLedger`] is the implementation backed by contract storage.

use soroban_sdk::{Address, Env, Map, Vec};

use crate::errors::CustodyError;
use crate::storage::DataKey;

pub trait Ledger {
    fn credit(&self, holder: &Address, id: u64, amount: i128) -> Result<(), CustodyError>;

    /// # Errors
    /// - [`CustodyError::InsufficientBalance`] if `amount` exceeds the balance.
    fn debit(&self, holder: &Address, id: u64, amount: i128) -> Result<(), CustodyError>;

    fn balance_of(&self, holder: &Address, id: u64) -> i128;

    fn is_approved_for_all(&self, holder: &Address, operator: &Address) -> bool;

    fn set_approval_for_all(&self, holder: &Address, operator: &Address, approved: bool);
}

pub struct StorageLedger<'a> {
    env: &'a Env,
}

impl<'a> StorageLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl Ledger for StorageLedger<'_> {
    fn credit(&self, holder: &Address, id: u64, amount: i128) -> Result<(), CustodyError> {
        let balance = self
            .balance_of(holder, id)
            .checked_add(amount)
            .ok_or(CustodyError::Overflow)?;
        self.env
            .storage()
            .persistent()
            .set(&DataKey::Balance(holder.clone(), id), &balance);
        Ok(())
    }

    fn debit(&self, holder: &Address, id: u64, amount: i128) -> Result<(), CustodyError> {
        let current = self.balance_of(holder, id);
        if amount > current {
            return Err(CustodyError::InsufficientBalance);
        }
        let key = DataKey::Balance(holder.clone(), id);
        let remaining = current - amount;
        if remaining == 0 {
            self.env.storage().persistent().remove(&key);
        } else {
            self.env.storage().persistent().set(&key, &remaining);
        }
        Ok(())
    }

    fn balance_of(&self, holder: &Address, id: u64) -> i128 {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Balance(holder.clone(), id))
            .unwrap_or(0)
    }

    fn is_approved_for_all(&self, holder: &Address, operator: &Address) -> bool {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Operator(holder.clone(), operator.clone()))
            .unwrap_or(false)
    }

    fn set_approval_for_all(&self, holder: &Address, operator: &Address, approved: bool) {
        let key = DataKey::Operator(holder.clone(), operator.clone());
        if approved {
            self.env.storage().persistent().set(&key, &true);
        } else {
            self.env.storage().persistent().remove(&key);
        }
    }
}

/// Validate that `holder` can cover every debit of a batch before anything
/// is written. Repeated ids are summed.
///
/// # Errors
/// - [`CustodyError::ArrayLengthMismatch`] if `ids` and `amounts` differ in length.
/// - [`CustodyError::InvalidAmount`] for an empty batch or a non-positive amount.
/// - [`CustodyError::InsufficientBalance`] if any aggregated debit is not covered.
pub fn ensure_covered<L: Ledger>(
    env: &Env,
    ledger: &L,
    holder: &Address,
    ids: &Vec<u64>,
    amounts: &Vec<i128>,
) -> Result<(), CustodyError> {
    ensure_lengths(ids.len(), amounts.len())?;
    if ids.is_empty() {
        return Err(CustodyError::InvalidAmount);
    }

    let mut pending: Map<u64, i128> = Map::new(env);
    for i in 0..ids.len() {
        let id = ids.get_unchecked(i);
        let amount = amounts.get_unchecked(i);
        if amount <= 0 {
            return Err(CustodyError::InvalidAmount);
        }
        let total = pending
            .get(id)
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(CustodyError::Overflow)?;
        if total > ledger.balance_of(holder, id) {
            return Err(CustodyError::InsufficientBalance);
        }
        pending.set(id, total);
    }
    Ok(())
}

/// Parallel argument arrays must have the same length.
pub fn ensure_lengths(left: u32, right: u32) -> Result<(), CustodyError> {
    if left != right {
        return Err(CustodyError::ArrayLengthMismatch);
    }
    Ok(())
}
