//! Initial schema migration.
//!
//! - `teams`: team names
//! - `users`: reviewers and authors, each pointing at (at most) one team
//! - `pull_requests`: review lifecycle of a PR
//! - `pr_reviewers`: reviewer assignments, one row per (PR, reviewer)
//!
//! Team membership is not stored on the team: it is the back-reference
//! `users.team_name`, so the active flag only lives on the user row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Teams {
    Table,
    TeamName,
}

#[derive(Iden)]
enum Users {
    Table,
    UserId,
    Username,
    TeamName,
    IsActive,
}

#[derive(Iden)]
enum PullRequests {
    Table,
    PullRequestId,
    PullRequestName,
    AuthorId,
    Status,
    CreatedAt,
    MergedAt,
}

#[derive(Iden)]
enum PrReviewers {
    Table,
    PullRequestId,
    UserId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Teams
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::TeamName)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::TeamName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-team_name")
                    .table(Users::Table)
                    .col(Users::TeamName)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Pull requests
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PullRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequests::PullRequestId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::PullRequestName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequests::AuthorId).string().not_null())
                    .col(
                        ColumnDef::new(PullRequests::Status)
                            .string()
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(PullRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequests::MergedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-pull_requests-author_id")
                    .table(PullRequests::Table)
                    .col(PullRequests::AuthorId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Reviewer assignments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PrReviewers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrReviewers::PullRequestId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PrReviewers::UserId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(PrReviewers::PullRequestId)
                            .col(PrReviewers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pr_reviewers-pull_request_id")
                            .from(PrReviewers::Table, PrReviewers::PullRequestId)
                            .to(PullRequests::Table, PullRequests::PullRequestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookup used by "reviews for user" and batch deactivation.
        manager
            .create_index(
                Index::create()
                    .name("idx-pr_reviewers-user_id")
                    .table(PrReviewers::Table)
                    .col(PrReviewers::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrReviewers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        Ok(())
    }
}
