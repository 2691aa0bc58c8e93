//! Batch deactivation with reviewer backfill.
//!
//! Users are deactivated one by one; a failure on one user is recorded and
//! the batch moves on. Afterwards every open PR that lost a reviewer gets a
//! replacement drawn from the members of the team that stay active. The
//! same replacement may be drawn for many PRs.
//!
//! Each PR is rewritten in its own transaction while holding its lock, so
//! the call as a whole is not atomic: when persisting one PR fails, the call
//! returns that error and the PRs updated before it stay updated.

use std::collections::HashSet;

use sea_orm::TransactionTrait;

use crate::{
    EngineError, MAX_REVIEWERS, PrStatus, ResultEngine, TeamMember,
    selection::{eligible_reviewers, select_one},
};

use super::{Engine, normalize_required_id, store, with_tx};

const DEACTIVATION_FAILED: &str = "failed to deactivate";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeactivationFailure {
    pub user_id: String,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchDeactivateResult {
    pub deactivated_count: u64,
    /// Open PRs rewritten because one of their reviewers left.
    pub reassigned_count: u64,
    pub errors: Vec<DeactivationFailure>,
}

impl Engine {
    /// Deactivates `user_ids` and backfills their open reviews from the
    /// remaining active members of `team_name`.
    ///
    /// Fails with [`EngineError::NoReplacementPool`] before touching anything
    /// when no member of the team would stay active.
    pub async fn deactivate_and_reassign(
        &self,
        team_name: &str,
        user_ids: &[String],
    ) -> ResultEngine<BatchDeactivateResult> {
        let team_name = normalize_required_id(team_name, "team_name")?;
        let mut requested: Vec<String> = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let user_id = normalize_required_id(user_id, "user_id")?;
            if !requested.contains(&user_id) {
                requested.push(user_id);
            }
        }
        if requested.is_empty() {
            return Err(EngineError::InvalidInput(
                "user_ids must not be empty".to_string(),
            ));
        }

        if !store::team_exists(&self.database, &team_name).await? {
            return Err(EngineError::TeamNotFound(team_name));
        }
        let leaving: HashSet<&str> = requested.iter().map(String::as_str).collect();
        let pool: Vec<TeamMember> = store::team_members(&self.database, &team_name)
            .await?
            .into_iter()
            .filter(|m| m.is_active && !leaving.contains(m.user_id.as_str()))
            .collect();
        if pool.is_empty() {
            return Err(EngineError::NoReplacementPool(team_name));
        }

        let mut result = BatchDeactivateResult::default();
        let mut deactivated = Vec::with_capacity(requested.len());
        for user_id in &requested {
            match store::set_user_active(&self.database, user_id, false).await {
                Ok(true) => {
                    result.deactivated_count += 1;
                    deactivated.push(user_id.as_str());
                }
                Ok(false) => {
                    tracing::warn!(user_id = %user_id, "cannot deactivate unknown user");
                    result.errors.push(failure(user_id));
                }
                Err(err) => {
                    tracing::warn!(user_id = %user_id, error = %err, "cannot deactivate user");
                    result.errors.push(failure(user_id));
                }
            }
        }

        for user_id in deactivated {
            let pr_ids: Vec<String> =
                store::pull_requests_reviewed_by(&self.database, user_id, Some(PrStatus::Open))
                    .await?
                    .into_iter()
                    .map(|model| model.pull_request_id)
                    .collect();
            for pr_id in pr_ids {
                if self.backfill_reviewer(&pr_id, user_id, &pool).await? {
                    result.reassigned_count += 1;
                }
            }
        }

        tracing::info!(
            team = %team_name,
            deactivated = result.deactivated_count,
            reassigned = result.reassigned_count,
            failed = result.errors.len(),
            "batch deactivation finished"
        );
        Ok(result)
    }

    /// Drops `leaving` from the PR and tops the list up from `pool`.
    /// Returns `false` when the PR changed under us and needs no rewrite.
    async fn backfill_reviewer(
        &self,
        pr_id: &str,
        leaving: &str,
        pool: &[TeamMember],
    ) -> ResultEngine<bool> {
        let _guard = self.pr_locks.acquire(pr_id).await;
        with_tx!(self, |db_tx| {
            let Some(mut pr) = store::find_pull_request(&db_tx, pr_id).await? else {
                return Ok(false);
            };
            if !pr.is_open() || !pr.remove_reviewer(leaving)? {
                return Ok(false);
            }

            if pr.reviewers.len() < MAX_REVIEWERS {
                let assigned: HashSet<&str> = pr.reviewers.iter().map(String::as_str).collect();
                let candidates = eligible_reviewers(pool, &pr.author_id, &assigned);
                if let Some(replacement) = select_one(&candidates)? {
                    pr.add_reviewer(replacement)?;
                } else {
                    tracing::debug!(pull_request = %pr.id, "no replacement left for pull request");
                }
            }

            store::save_pull_request(&db_tx, &pr).await?;
            Ok(true)
        })
    }
}

fn failure(user_id: &str) -> DeactivationFailure {
    DeactivationFailure {
        user_id: user_id.to_string(),
        error: DEACTIVATION_FAILED.to_string(),
    }
}
