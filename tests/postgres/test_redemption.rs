//! Single-use invite redemption inside one transaction.

use exam_portal_lib::models::Role;
use exam_portal_lib::store::{PortalStore, Redemption};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_code_redeems_exactly_once() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let code = create_invite(&pool, Role::Moderator).await;

    let first = pool
        .redeem_invite(&code, new_profile(&unique_name("first"), real_today()))
        .await
        .unwrap();
    let Redemption::Created(profile) = first else {
        panic!("expected a new profile, got {:?}", first);
    };
    assert_eq!(profile.role, Role::Moderator);

    let second_name = unique_name("second");
    let second = pool
        .redeem_invite(&code, new_profile(&second_name, real_today()))
        .await
        .unwrap();
    assert_eq!(second, Redemption::CodeUsed);
    assert!(
        pool.find_profile_by_username(&second_name)
            .await
            .unwrap()
            .is_none()
    );

    let invite = pool.find_invite(&code).await.unwrap().unwrap();
    assert_eq!(invite.used_by, Some(profile.id));
    assert!(invite.used_at.is_some());
}

#[actix_rt::test]
async fn test_unknown_code_and_taken_username() {
    let Some(pool) = create_test_pool().await else {
        return;
    };

    let missing = pool
        .redeem_invite("inv_does_not_exist", new_profile(&unique_name("ghost"), real_today()))
        .await
        .unwrap();
    assert_eq!(missing, Redemption::UnknownCode);

    let name = unique_name("taken");
    let code_a = create_invite(&pool, Role::Student).await;
    let code_b = create_invite(&pool, Role::Student).await;
    pool.redeem_invite(&code_a, new_profile(&name, real_today()))
        .await
        .unwrap();

    let clash = pool
        .redeem_invite(&code_b, new_profile(&name.to_uppercase(), real_today()))
        .await
        .unwrap();
    assert_eq!(clash, Redemption::UsernameTaken);
    // The losing code stays redeemable
    assert!(!pool.find_invite(&code_b).await.unwrap().unwrap().is_used());
}

#[actix_rt::test]
async fn test_concurrent_redemptions_of_one_code() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let code = create_invite(&pool, Role::Student).await;

    let (a, b) = tokio::join!(
        pool.redeem_invite(&code, new_profile(&unique_name("racer"), real_today())),
        pool.redeem_invite(&code, new_profile(&unique_name("racer"), real_today())),
    );
    let outcomes = [a.unwrap(), b.unwrap()];

    let created = outcomes
        .iter()
        .filter(|o| matches!(o, Redemption::Created(_)))
        .count();
    let used = outcomes
        .iter()
        .filter(|o| **o == Redemption::CodeUsed)
        .count();
    assert_eq!((created, used), (1, 1));
}
