#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, TeamMember};
use migration::MigratorTrait;
use uuid::Uuid;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

pub fn member(user_id: &str, is_active: bool) -> TeamMember {
    TeamMember {
        user_id: user_id.to_string(),
        username: format!("name of {user_id}"),
        is_active,
    }
}

/// Team `team_name` with `size` active members `{prefix}-1..={prefix}-size`.
pub async fn seed_team(engine: &Engine, team_name: &str, prefix: &str, size: usize) {
    let members = (1..=size)
        .map(|i| member(&format!("{prefix}-{i}"), true))
        .collect();
    engine.add_team(team_name, members).await.unwrap();
}

/// Stores a PR with a fixed reviewer list, bypassing random selection.
pub async fn insert_pr(
    db: &DatabaseConnection,
    pr_id: &str,
    author_id: &str,
    status: &str,
    reviewers: &[&str],
) {
    insert_pr_at(db, pr_id, author_id, status, reviewers, Utc::now()).await;
}

/// Like [`insert_pr`] with an explicit creation time.
pub async fn insert_pr_at(
    db: &DatabaseConnection,
    pr_id: &str,
    author_id: &str,
    status: &str,
    reviewers: &[&str],
    created_at: DateTime<Utc>,
) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO pull_requests (pull_request_id, pull_request_name, author_id, status, created_at) VALUES (?, ?, ?, ?, ?)",
        vec![
            pr_id.into(),
            format!("change {pr_id}").into(),
            author_id.into(),
            status.into(),
            created_at.into(),
        ],
    ))
    .await
    .unwrap();
    for reviewer in reviewers {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO pr_reviewers (pull_request_id, user_id) VALUES (?, ?)",
            vec![pr_id.into(), (*reviewer).into()],
        ))
        .await
        .unwrap();
    }
}
