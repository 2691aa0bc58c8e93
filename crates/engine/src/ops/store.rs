//! Storage access shared by the operations.
//!
//! Every helper takes any connection, so the same query runs on the pool or
//! inside an open transaction.

use sea_orm::{
    ActiveValue, ConnectionTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, prelude::*,
    sea_query::Expr,
};

use crate::{
    PrStatus, PullRequest, ResultEngine, TeamMember, User, pr_reviewers, pull_requests, teams,
    users,
};

pub(super) async fn find_user<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<Option<User>> {
    Ok(users::Entity::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .map(User::from))
}

pub(super) async fn upsert_user<C: ConnectionTrait>(db: &C, user: &User) -> ResultEngine<()> {
    let active = users::ActiveModel::from(user);
    match users::Entity::find_by_id(user.user_id.clone()).one(db).await? {
        Some(_) => {
            active.update(db).await?;
        }
        None => {
            active.insert(db).await?;
        }
    }
    Ok(())
}

/// Flips the active flag. Returns `false` when no such user exists.
pub(super) async fn set_user_active<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    is_active: bool,
) -> ResultEngine<bool> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::IsActive, Expr::value(is_active))
        .filter(users::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub(super) async fn team_exists<C: ConnectionTrait>(
    db: &C,
    team_name: &str,
) -> ResultEngine<bool> {
    Ok(teams::Entity::find_by_id(team_name.to_string())
        .one(db)
        .await?
        .is_some())
}

pub(super) async fn insert_team<C: ConnectionTrait>(db: &C, team_name: &str) -> ResultEngine<()> {
    teams::ActiveModel {
        team_name: ActiveValue::Set(team_name.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Roster of a team ordered by `user_id`, active flags as stored on users.
pub(super) async fn team_members<C: ConnectionTrait>(
    db: &C,
    team_name: &str,
) -> ResultEngine<Vec<TeamMember>> {
    Ok(users::Entity::find()
        .filter(users::Column::TeamName.eq(team_name))
        .order_by_asc(users::Column::UserId)
        .all(db)
        .await?
        .into_iter()
        .map(TeamMember::from)
        .collect())
}

pub(super) async fn find_pull_request<C: ConnectionTrait>(
    db: &C,
    pr_id: &str,
) -> ResultEngine<Option<PullRequest>> {
    let Some(model) = pull_requests::Entity::find_by_id(pr_id.to_string())
        .one(db)
        .await?
    else {
        return Ok(None);
    };
    let reviewers = pr_reviewers::Entity::find()
        .filter(pr_reviewers::Column::PullRequestId.eq(pr_id))
        .all(db)
        .await?;
    PullRequest::try_from((model, reviewers)).map(Some)
}

pub(super) async fn pull_request_exists<C: ConnectionTrait>(
    db: &C,
    pr_id: &str,
) -> ResultEngine<bool> {
    Ok(pull_requests::Entity::find_by_id(pr_id.to_string())
        .one(db)
        .await?
        .is_some())
}

pub(super) async fn insert_pull_request<C: ConnectionTrait>(
    db: &C,
    pr: &PullRequest,
) -> ResultEngine<()> {
    pr.check_reviewers()?;
    pull_requests::ActiveModel::from(pr).insert(db).await?;
    insert_reviewers(db, pr).await
}

/// Writes status, merge time and the full reviewer list of `pr`.
pub(super) async fn save_pull_request<C: ConnectionTrait>(
    db: &C,
    pr: &PullRequest,
) -> ResultEngine<()> {
    pr.check_reviewers()?;
    pull_requests::ActiveModel::from(pr).update(db).await?;
    pr_reviewers::Entity::delete_many()
        .filter(pr_reviewers::Column::PullRequestId.eq(pr.id.as_str()))
        .exec(db)
        .await?;
    insert_reviewers(db, pr).await
}

async fn insert_reviewers<C: ConnectionTrait>(db: &C, pr: &PullRequest) -> ResultEngine<()> {
    if pr.reviewers.is_empty() {
        return Ok(());
    }
    let rows = pr.reviewers.iter().map(|reviewer| pr_reviewers::ActiveModel {
        pull_request_id: ActiveValue::Set(pr.id.clone()),
        user_id: ActiveValue::Set(reviewer.clone()),
    });
    pr_reviewers::Entity::insert_many(rows)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Every PR with its reviewers.
pub(super) async fn all_pull_requests<C: ConnectionTrait>(
    db: &C,
) -> ResultEngine<Vec<(pull_requests::Model, Vec<pr_reviewers::Model>)>> {
    Ok(pull_requests::Entity::find()
        .order_by_asc(pull_requests::Column::PullRequestId)
        .find_with_related(pr_reviewers::Entity)
        .all(db)
        .await?)
}

/// PRs the user reviews, newest first. `status` narrows the result.
pub(super) async fn pull_requests_reviewed_by<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    status: Option<PrStatus>,
) -> ResultEngine<Vec<pull_requests::Model>> {
    let mut query = pull_requests::Entity::find()
        .join(JoinType::InnerJoin, pull_requests::Relation::Reviewers.def())
        .filter(pr_reviewers::Column::UserId.eq(user_id));
    if let Some(status) = status {
        query = query.filter(pull_requests::Column::Status.eq(status.as_str()));
    }
    Ok(query
        .order_by_desc(pull_requests::Column::CreatedAt)
        .order_by_asc(pull_requests::Column::PullRequestId)
        .all(db)
        .await?)
}
