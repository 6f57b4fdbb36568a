use super::test_helpers::{addresses, amounts, ids, setup};
use crate::admin::Role;
use crate::errors::CustodyError;
use crate::ledger::{ensure_covered, ensure_lengths, Ledger, StorageLedger};
use soroban_sdk::{testutils::Address as _, Address};

#[test]
fn test_owner_transfer_moves_balance() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    ctx.client.transfer(&holder, &holder, &friend, &1, &4);

    assert_eq!(ctx.client.balance_of(&holder, &1), 6);
    assert_eq!(ctx.client.balance_of(&friend, &1), 4);
    assert_eq!(ctx.client.supply_of(&1), 10);
}

#[test]
fn test_first_receipt_approves_current_admins() {
    let ctx = setup(2, 1);
    let holder = Address::generate(&ctx.env);
    assert!(!ctx.client.is_holder(&holder));

    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    assert!(ctx.client.is_holder(&holder));
    assert!(ctx.client.is_approved_for_all(&holder, &ctx.admin(0)));
    assert!(ctx.client.is_approved_for_all(&holder, &ctx.admin(1)));
    assert!(!ctx.client.is_approved_for_all(&holder, &ctx.super_admin));
}

#[test]
fn test_admin_holder_is_not_its_own_operator() {
    let ctx = setup(2, 1);
    let admin = ctx.admin(0);
    ctx.client.mint(&ctx.admin(1), &1, &10, &admin, &0);

    assert!(!ctx.client.is_approved_for_all(&admin, &admin));
    assert!(ctx.client.is_approved_for_all(&admin, &ctx.admin(1)));
}

#[test]
fn test_stranger_cannot_transfer() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let thief = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    assert_eq!(
        ctx.client.try_transfer(&thief, &holder, &thief, &1, &1),
        Err(Ok(CustodyError::NotApproved))
    );
}

#[test]
fn test_approved_operator_can_transfer() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let operator = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    ctx.client.set_approval_for_all(&holder, &operator, &true);
    ctx.client.transfer(&operator, &holder, &friend, &1, &2);
    assert_eq!(ctx.client.balance_of(&friend, &1), 2);

    ctx.client.set_approval_for_all(&holder, &operator, &false);
    assert_eq!(
        ctx.client.try_transfer(&operator, &holder, &friend, &1, &2),
        Err(Ok(CustodyError::NotApproved))
    );
}

#[test]
fn test_self_approval_rejected() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    assert_eq!(
        ctx.client.try_set_approval_for_all(&holder, &holder, &true),
        Err(Ok(CustodyError::SelfApproval))
    );
}

#[test]
fn test_transfer_over_balance_fails() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    assert_eq!(
        ctx.client.try_transfer(&holder, &holder, &friend, &1, &11),
        Err(Ok(CustodyError::InsufficientBalance))
    );
    assert_eq!(
        ctx.client.try_transfer(&holder, &holder, &friend, &1, &0),
        Err(Ok(CustodyError::InvalidAmount))
    );
}

#[test]
fn test_batch_transfer_sums_repeated_ids() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &5, &holder, &0);

    assert_eq!(
        ctx.client.try_batch_transfer(
            &holder,
            &holder,
            &friend,
            &ids(&ctx.env, &[1, 1]),
            &amounts(&ctx.env, &[3, 3]),
        ),
        Err(Ok(CustodyError::InsufficientBalance))
    );

    ctx.client.batch_transfer(
        &holder,
        &holder,
        &friend,
        &ids(&ctx.env, &[1, 1]),
        &amounts(&ctx.env, &[3, 2]),
    );
    assert_eq!(ctx.client.balance_of(&holder, &1), 0);
    assert_eq!(ctx.client.balance_of(&friend, &1), 5);
}

#[test]
fn test_batch_transfer_rejects_mismatched_arrays() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    assert_eq!(
        ctx.client.try_batch_transfer(
            &holder,
            &holder,
            &friend,
            &ids(&ctx.env, &[1, 2]),
            &amounts(&ctx.env, &[1]),
        ),
        Err(Ok(CustodyError::ArrayLengthMismatch))
    );
}

#[test]
fn test_admin_transfer_fans_out() {
    let ctx = setup(1, 1);
    let admin = ctx.admin(0);
    let source = Address::generate(&ctx.env);
    let r1 = Address::generate(&ctx.env);
    let r2 = Address::generate(&ctx.env);
    ctx.client.mint_batch(
        &admin,
        &ids(&ctx.env, &[1, 2]),
        &amounts(&ctx.env, &[10, 10]),
        &source,
        &ids(&ctx.env, &[0, 0]),
    );

    ctx.client.admin_transfer(
        &admin,
        &source,
        &addresses(&ctx.env, &[r1.clone(), r2.clone()]),
        &ids(&ctx.env, &[1, 2]),
        &ids(&ctx.env, &[100, 200]),
        &amounts(&ctx.env, &[3, 7]),
    );

    assert_eq!(ctx.client.balance_of(&source, &1), 7);
    assert_eq!(ctx.client.balance_of(&source, &2), 3);
    assert_eq!(ctx.client.balance_of(&r1, &1), 3);
    assert_eq!(ctx.client.balance_of(&r2, &2), 7);
    assert_eq!(ctx.client.release_time(&r1, &1), 100);
    assert_eq!(ctx.client.release_time(&r2, &2), 200);
    assert!(ctx.client.is_approved_for_all(&r2, &admin));
}

#[test]
fn test_admin_transfer_validation() {
    let ctx = setup(1, 1);
    let admin = ctx.admin(0);
    let source = Address::generate(&ctx.env);
    let r1 = Address::generate(&ctx.env);
    ctx.client.mint(&admin, &1, &5, &source, &0);

    assert_eq!(
        ctx.client.try_admin_transfer(
            &source,
            &source,
            &addresses(&ctx.env, &[r1.clone()]),
            &ids(&ctx.env, &[1]),
            &ids(&ctx.env, &[0]),
            &amounts(&ctx.env, &[1]),
        ),
        Err(Ok(CustodyError::NotAnAdmin))
    );
    assert_eq!(
        ctx.client.try_admin_transfer(
            &admin,
            &source,
            &addresses(&ctx.env, &[r1.clone()]),
            &ids(&ctx.env, &[1, 1]),
            &ids(&ctx.env, &[0]),
            &amounts(&ctx.env, &[1]),
        ),
        Err(Ok(CustodyError::ArrayLengthMismatch))
    );
    assert_eq!(
        ctx.client.try_admin_transfer(
            &admin,
            &source,
            &addresses(&ctx.env, &[r1]),
            &ids(&ctx.env, &[1]),
            &ids(&ctx.env, &[0]),
            &amounts(&ctx.env, &[6]),
        ),
        Err(Ok(CustodyError::InsufficientBalance))
    );
}

#[test]
fn test_balance_of_batch() {
    let ctx = setup(1, 1);
    let a = Address::generate(&ctx.env);
    let b = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &3, &a, &0);
    ctx.client.mint(&ctx.admin(0), &2, &4, &b, &0);

    let balances = ctx.client.balance_of_batch(
        &addresses(&ctx.env, &[a.clone(), b.clone(), a]),
        &ids(&ctx.env, &[1, 2, 2]),
    );
    assert_eq!(balances, amounts(&ctx.env, &[3, 4, 0]));
    assert_eq!(
        ctx.client
            .try_balance_of_batch(&addresses(&ctx.env, &[b]), &ids(&ctx.env, &[1, 2])),
        Err(Ok(CustodyError::ArrayLengthMismatch))
    );
}

#[test]
fn test_storage_ledger_credit_and_debit() {
    let ctx = setup(1, 1);
    let env = &ctx.env;
    let holder = Address::generate(env);

    env.as_contract(&ctx.contract_id, || {
        let ledger = StorageLedger::new(env);
        ledger.credit(&holder, 4, 20).unwrap();
        assert_eq!(ledger.debit(&holder, 4, 21), Err(CustodyError::InsufficientBalance));
        ledger.debit(&holder, 4, 20).unwrap();
        assert_eq!(ledger.balance_of(&holder, 4), 0);

        ledger.credit(&holder, 4, i128::MAX).unwrap();
        assert_eq!(ledger.credit(&holder, 4, 1), Err(CustodyError::Overflow));

        assert_eq!(
            ensure_covered(env, &ledger, &holder, &ids(env, &[4]), &amounts(env, &[-1])),
            Err(CustodyError::InvalidAmount)
        );
        assert_eq!(
            ensure_covered(env, &ledger, &holder, &ids(env, &[]), &amounts(env, &[])),
            Err(CustodyError::InvalidAmount)
        );
        assert_eq!(ensure_lengths(2, 2), Ok(()));
        assert_eq!(ensure_lengths(2, 1), Err(CustodyError::ArrayLengthMismatch));
    });
}

#[test]
fn test_empty_batch_transfer_does_not_register_recipient() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &5, &holder, &0);

    assert_eq!(
        ctx.client.try_batch_transfer(
            &holder,
            &holder,
            &friend,
            &ids(&ctx.env, &[]),
            &amounts(&ctx.env, &[]),
        ),
        Err(Ok(CustodyError::InvalidAmount))
    );
    assert!(!ctx.client.is_holder(&friend));
}

#[test]
fn test_revoked_admin_keeps_operator_approval() {
    let ctx = setup(2, 1);
    let holder = Address::generate(&ctx.env);
    let friend = Address::generate(&ctx.env);
    let departing = ctx.admin(1);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    ctx.client
        .revoke_role(&ctx.super_admin, &Role::Admin, &departing);

    // Approval granted at registration is the holder's to withdraw.
    assert!(ctx.client.is_approved_for_all(&holder, &departing));
    ctx.client.set_approval_for_all(&holder, &departing, &false);
    assert_eq!(
        ctx.client.try_transfer(&departing, &holder, &friend, &1, &1),
        Err(Ok(CustodyError::NotApproved))
    );
}
