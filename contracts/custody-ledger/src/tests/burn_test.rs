use super::test_helpers::{amounts, ids, setup};
use crate::consensus::{Action, Admission, BurnRequest};
use crate::errors::CustodyError;
use soroban_sdk::{testutils::Address as _, Address};

#[test]
fn test_admin_burns_without_holder_approval() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);
    ctx.client
        .set_approval_for_all(&holder, &ctx.admin(0), &false);

    assert_eq!(
        ctx.client.burn(&ctx.admin(0), &holder, &1, &4),
        Admission::Admitted
    );
    assert_eq!(ctx.client.balance_of(&holder, &1), 6);
    assert_eq!(ctx.client.supply_of(&1), 6);
    assert_eq!(ctx.client.total_supply(), 6);
}

#[test]
fn test_non_admin_cannot_burn() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    assert_eq!(
        ctx.client.try_burn(&holder, &holder, &1, &1),
        Err(Ok(CustodyError::NotAnAdmin))
    );
}

#[test]
fn test_burn_over_balance_fails_before_any_approval() {
    let ctx = setup(2, 2);
    ctx.enable_multisig();
    let holder = Address::generate(&ctx.env);

    assert_eq!(
        ctx.client.try_burn(&ctx.admin(0), &holder, &1, &1),
        Err(Ok(CustodyError::InsufficientBalance))
    );

    let signature = ctx.client.proposal_signature(&Action::Burn(BurnRequest {
        from: holder,
        id: 1,
        amount: 1,
    }));
    assert_eq!(ctx.client.get_proposal(&signature), None);
}

#[test]
fn test_burn_rejects_non_positive_amount() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    assert_eq!(
        ctx.client.try_burn(&ctx.admin(0), &holder, &1, &0),
        Err(Ok(CustodyError::InvalidAmount))
    );
}

#[test]
fn test_burn_batch() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    ctx.client.mint_batch(
        &ctx.admin(0),
        &ids(&ctx.env, &[1, 2]),
        &amounts(&ctx.env, &[10, 20]),
        &holder,
        &ids(&ctx.env, &[0, 0]),
    );

    ctx.client.burn_batch(
        &ctx.admin(0),
        &holder,
        &ids(&ctx.env, &[1, 2, 2]),
        &amounts(&ctx.env, &[10, 5, 5]),
    );

    assert_eq!(ctx.client.balance_of(&holder, &1), 0);
    assert_eq!(ctx.client.balance_of(&holder, &2), 10);
    assert_eq!(ctx.client.total_supply(), 10);
}

#[test]
fn test_burn_batch_checks_aggregated_debits() {
    let ctx = setup(1, 1);
    let holder = Address::generate(&ctx.env);
    ctx.client.mint(&ctx.admin(0), &1, &10, &holder, &0);

    assert_eq!(
        ctx.client.try_burn_batch(
            &ctx.admin(0),
            &holder,
            &ids(&ctx.env, &[1, 1]),
            &amounts(&ctx.env, &[6, 6]),
        ),
        Err(Ok(CustodyError::InsufficientBalance))
    );
    assert_eq!(
        ctx.client.try_burn_batch(
            &ctx.admin(0),
            &holder,
            &ids(&ctx.env, &[1]),
            &amounts(&ctx.env, &[6, 6]),
        ),
        Err(Ok(CustodyError::ArrayLengthMismatch))
    );
    assert_eq!(ctx.client.balance_of(&holder, &1), 10);
}
