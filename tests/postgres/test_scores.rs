//! Score recording: row insert and profile credit in one transaction.

use chrono::Utc;
use exam_portal_lib::models::{Role, Score, SubmitScoreRequest};
use exam_portal_lib::services::scores::submit_score;
use exam_portal_lib::store::PortalStore;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_overlapping_submissions_both_count() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let profile = seed_profile(&pool, Role::Student, real_today(), None).await;
    let req = |correct| SubmitScoreRequest {
        exam: "cardiology".to_string(),
        correct,
        total: 10,
    };

    let (req_a, req_b) = (req(10), req(4));
    let (a, b) = tokio::join!(
        submit_score(&pool, profile.id, &req_a, real_today()),
        submit_score(&pool, profile.id, &req_b, real_today()),
    );
    a.unwrap();
    b.unwrap();

    let stored = pool.find_profile(profile.id).await.unwrap().unwrap();
    assert_eq!(stored.total_exams_completed, 2);
    assert_eq!(stored.gpa(), Some(70.0));
    assert_eq!(stored.streak_count, 1);
    assert_eq!(stored.last_mock_date, Some(real_today()));
    assert_eq!(pool.list_scores(profile.id).await.unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_record_score_for_missing_owner_writes_nothing() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let ghost = Uuid::new_v4();

    let result = pool
        .record_score(&Score {
            id: Uuid::now_v7(),
            user_id: ghost,
            exam: "renal".to_string(),
            correct: 1,
            total: 2,
            percentage: 50.0,
            taken_on: real_today(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(pool.list_scores(ghost).await.unwrap().is_empty());
}
