use std::collections::HashSet;

use chrono::Utc;
use sea_orm::TransactionTrait;

use crate::{
    EngineError, MAX_REVIEWERS, PullRequest, ResultEngine,
    selection::{eligible_reviewers, select_one, select_reviewers},
};

use super::{Engine, normalize_required_id, store, with_tx};

/// Outcome of a successful reassignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

impl Engine {
    /// Opens a PR and assigns up to [`MAX_REVIEWERS`] active teammates of the
    /// author, chosen at random.
    ///
    /// The author is never a reviewer. A team with fewer eligible members
    /// yields fewer reviewers, possibly none.
    pub async fn create_pull_request(
        &self,
        pr_id: &str,
        name: &str,
        author_id: &str,
    ) -> ResultEngine<PullRequest> {
        let pr_id = normalize_required_id(pr_id, "pull_request_id")?;
        let author_id = normalize_required_id(author_id, "author_id")?;
        let created_at = Utc::now();

        let _guard = self.pr_locks.acquire(&pr_id).await;
        let pr = with_tx!(self, |db_tx| {
            if store::pull_request_exists(&db_tx, &pr_id).await? {
                return Err(EngineError::PullRequestExists(pr_id));
            }
            let author = store::find_user(&db_tx, &author_id)
                .await?
                .ok_or_else(|| EngineError::AuthorNotFound(author_id.clone()))?;
            if !author.has_team() {
                return Err(EngineError::AuthorHasNoTeam(author_id));
            }

            let roster = store::team_members(&db_tx, &author.team_name).await?;
            let candidates = eligible_reviewers(&roster, &author.user_id, &HashSet::new());
            let reviewers = select_reviewers(&candidates, MAX_REVIEWERS)?;

            let pr = PullRequest::open(
                pr_id.clone(),
                name.to_string(),
                author.user_id,
                reviewers,
                created_at,
            )?;
            store::insert_pull_request(&db_tx, &pr).await?;
            Ok(pr)
        })?;

        tracing::info!(
            pull_request = %pr.id,
            author = %pr.author_id,
            reviewers = ?pr.reviewers,
            "pull request created"
        );
        Ok(pr)
    }

    /// Marks the PR as merged. Calling it again is a no-op that returns the
    /// PR as stored.
    pub async fn merge_pull_request(&self, pr_id: &str) -> ResultEngine<PullRequest> {
        let pr_id = normalize_required_id(pr_id, "pull_request_id")?;
        let merged_at = Utc::now();
        let _guard = self.pr_locks.acquire(&pr_id).await;
        with_tx!(self, |db_tx| {
            let mut pr = store::find_pull_request(&db_tx, &pr_id)
                .await?
                .ok_or_else(|| EngineError::PullRequestNotFound(pr_id.clone()))?;
            if pr.merge(merged_at) {
                store::save_pull_request(&db_tx, &pr).await?;
                tracing::info!(pull_request = %pr.id, "pull request merged");
            }
            Ok(pr)
        })
    }

    pub async fn pull_request(&self, pr_id: &str) -> ResultEngine<PullRequest> {
        let pr_id = normalize_required_id(pr_id, "pull_request_id")?;
        store::find_pull_request(&self.database, &pr_id)
            .await?
            .ok_or(EngineError::PullRequestNotFound(pr_id))
    }

    /// Replaces `old_reviewer_id` on an open PR by a random active member of
    /// the departing reviewer's team.
    ///
    /// Candidates exclude the departing reviewer, whoever is already assigned
    /// and the author. Nothing is written when any check fails.
    pub async fn reassign_reviewer(
        &self,
        pr_id: &str,
        old_reviewer_id: &str,
    ) -> ResultEngine<Reassignment> {
        let pr_id = normalize_required_id(pr_id, "pull_request_id")?;
        let old_reviewer = normalize_required_id(old_reviewer_id, "old_user_id")?;
        let old_reviewer_id = old_reviewer.as_str();
        let _guard = self.pr_locks.acquire(&pr_id).await;
        let reassignment = with_tx!(self, |db_tx| {
            let mut pr = store::find_pull_request(&db_tx, &pr_id)
                .await?
                .ok_or_else(|| EngineError::PullRequestNotFound(pr_id.clone()))?;
            if !pr.is_open() {
                return Err(EngineError::PullRequestMerged(pr.id));
            }
            if !pr.has_reviewer(old_reviewer_id) {
                return Err(EngineError::ReviewerNotAssigned {
                    pull_request: pr.id,
                    reviewer: old_reviewer_id.to_string(),
                });
            }

            let departing = store::find_user(&db_tx, old_reviewer_id)
                .await?
                .ok_or_else(|| EngineError::UserNotFound(old_reviewer_id.to_string()))?;
            if !departing.has_team() {
                return Err(EngineError::NoReplacementCandidate(pr.id));
            }
            let roster = store::team_members(&db_tx, &departing.team_name).await?;

            let mut taken: HashSet<&str> = pr.reviewers.iter().map(String::as_str).collect();
            taken.insert(pr.author_id.as_str());
            let candidates = eligible_reviewers(&roster, old_reviewer_id, &taken);
            let Some(replacement) = select_one(&candidates)? else {
                return Err(EngineError::NoReplacementCandidate(pr.id));
            };

            pr.replace_reviewer(old_reviewer_id, replacement.clone())?;
            store::save_pull_request(&db_tx, &pr).await?;
            Ok(Reassignment {
                pull_request: pr,
                replaced_by: replacement,
            })
        })?;

        tracing::info!(
            pull_request = %reassignment.pull_request.id,
            old = old_reviewer_id,
            new = %reassignment.replaced_by,
            "reviewer reassigned"
        );
        Ok(reassignment)
    }
}
