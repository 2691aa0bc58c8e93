mod common;

use std::collections::HashSet;

use engine::{EngineError, PrStatus};

use chrono::{Duration, Utc};
use sea_orm::ConnectionTrait;

use common::{engine_with_db, insert_pr, insert_pr_at, member, seed_team};

#[tokio::test]
async fn deactivating_two_reviewers_backfills_their_open_prs() {
    let (engine, db) = engine_with_db().await;
    seed_team(&engine, "T", "user", 20).await;
    seed_team(&engine, "authors", "author", 1).await;

    for i in 0..50 {
        let first = format!("user-{}", i % 10 + 1);
        let second = format!("user-{}", i % 10 + 11);
        insert_pr(
            &db,
            &format!("pr-{i}"),
            "author-1",
            "OPEN",
            &[first.as_str(), second.as_str()],
        )
        .await;
    }

    let result = engine
        .deactivate_and_reassign("T", &["user-1".to_string(), "user-2".to_string()])
        .await
        .unwrap();

    assert_eq!(result.deactivated_count, 2);
    assert_eq!(result.reassigned_count, 10);
    assert!(result.errors.is_empty());

    for i in 0..50 {
        let pr = engine.pull_request(&format!("pr-{i}")).await.unwrap();
        assert_eq!(pr.reviewers.len(), 2, "pr-{i}");
        assert!(!pr.has_reviewer("user-1"));
        assert!(!pr.has_reviewer("user-2"));
        let distinct: HashSet<_> = pr.reviewers.iter().collect();
        assert_eq!(distinct.len(), 2);
    }
    assert!(!engine.user("user-1").await.unwrap().is_active);
    assert!(!engine.user("user-2").await.unwrap().is_active);
    assert!(engine.user("user-3").await.unwrap().is_active);
}

#[tokio::test]
async fn empty_pool_deactivates_nobody() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_team("T", vec![member("u1", true), member("u2", true), member("u3", false)])
        .await
        .unwrap();

    let err = engine
        .deactivate_and_reassign("T", &["u1".to_string(), "u2".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::NoReplacementPool("T".to_string()));
    assert!(engine.user("u1").await.unwrap().is_active);
    assert!(engine.user("u2").await.unwrap().is_active);
}

#[tokio::test]
async fn unknown_team_and_empty_batch_are_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .deactivate_and_reassign("ghosts", &["u1".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::TeamNotFound("ghosts".to_string()));

    let err = engine.deactivate_and_reassign("T", &[]).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn unknown_user_is_reported_and_batch_continues() {
    let (engine, _db) = engine_with_db().await;
    seed_team(&engine, "T", "u", 3).await;

    let result = engine
        .deactivate_and_reassign("T", &["ghost".to_string(), "u-1".to_string()])
        .await
        .unwrap();

    assert_eq!(result.deactivated_count, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].user_id, "ghost");
    assert_eq!(result.errors[0].error, "failed to deactivate");
    assert!(!engine.user("u-1").await.unwrap().is_active);
}

#[tokio::test]
async fn merged_prs_are_left_untouched() {
    let (engine, db) = engine_with_db().await;
    seed_team(&engine, "T", "u", 4).await;
    insert_pr(&db, "merged", "u-4", "MERGED", &["u-1", "u-2"]).await;
    insert_pr(&db, "open", "u-4", "OPEN", &["u-1", "u-2"]).await;

    let result = engine
        .deactivate_and_reassign("T", &["u-1".to_string()])
        .await
        .unwrap();

    assert_eq!(result.reassigned_count, 1);
    let merged = engine.pull_request("merged").await.unwrap();
    assert_eq!(merged.status, PrStatus::Merged);
    assert_eq!(merged.reviewers, vec!["u-1", "u-2"]);

    // u-3 is the only pool member that is neither the author nor assigned.
    let open = engine.pull_request("open").await.unwrap();
    assert_eq!(open.reviewers, vec!["u-2", "u-3"]);
}

#[tokio::test]
async fn pr_keeps_fewer_reviewers_when_pool_is_exhausted() {
    let (engine, db) = engine_with_db().await;
    seed_team(&engine, "T", "u", 3).await;
    insert_pr(&db, "pr-1", "u-3", "OPEN", &["u-1", "u-2"]).await;

    let result = engine
        .deactivate_and_reassign("T", &["u-1".to_string()])
        .await
        .unwrap();

    assert_eq!(result.reassigned_count, 1);
    let pr = engine.pull_request("pr-1").await.unwrap();
    assert_eq!(pr.reviewers, vec!["u-2"]);
}

#[tokio::test]
async fn storage_failure_stops_batch_and_keeps_earlier_prs() {
    let (engine, db) = engine_with_db().await;
    seed_team(&engine, "T", "user", 6).await;
    seed_team(&engine, "authors", "author", 1).await;

    // pr-0 is the newest, so it is rewritten first.
    let now = Utc::now();
    for i in 0..10 {
        let other = format!("user-{}", i % 3 + 2);
        insert_pr_at(
            &db,
            &format!("pr-{i}"),
            "author-1",
            "OPEN",
            &["user-1", other.as_str()],
            now - Duration::seconds(i),
        )
        .await;
    }
    db.execute_unprepared(
        "CREATE TRIGGER fail_pr5 BEFORE INSERT ON pr_reviewers \
         WHEN NEW.pull_request_id = 'pr-5' \
         BEGIN SELECT RAISE(ABORT, 'pr-5 is read only'); END",
    )
    .await
    .unwrap();

    let err = engine
        .deactivate_and_reassign("T", &["user-1".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Database(_)), "{err:?}");

    assert!(!engine.user("user-1").await.unwrap().is_active);
    for i in 0..5 {
        let pr = engine.pull_request(&format!("pr-{i}")).await.unwrap();
        assert!(!pr.has_reviewer("user-1"), "pr-{i}");
        assert_eq!(pr.reviewers.len(), 2, "pr-{i}");
    }
    for i in 5..10 {
        let pr = engine.pull_request(&format!("pr-{i}")).await.unwrap();
        assert!(pr.has_reviewer("user-1"), "pr-{i}");
        assert_eq!(pr.reviewers.len(), 2, "pr-{i}");
    }
}

#[tokio::test]
async fn statistics_count_every_assignment() {
    let (engine, db) = engine_with_db().await;
    seed_team(&engine, "T", "u", 11).await;

    for i in 0..1000 {
        let first = format!("u-{}", i % 10 + 1);
        let second = format!("u-{}", (i + 1) % 10 + 1);
        let status = if i % 5 == 0 { "MERGED" } else { "OPEN" };
        insert_pr(
            &db,
            &format!("pr-{i}"),
            "u-11",
            status,
            &[first.as_str(), second.as_str()],
        )
        .await;
    }
    insert_pr(&db, "draft", "u-11", "DRAFT", &["u-1"]).await;

    let stats = engine.statistics().await.unwrap();

    assert_eq!(stats.total_assignments, 2001);
    assert_eq!(stats.by_user.values().sum::<u64>(), 2001);
    assert_eq!(stats.by_user.len(), 10);
    assert_eq!(stats.by_status.merged, 200);
    assert_eq!(stats.by_status.open, 800);
}
