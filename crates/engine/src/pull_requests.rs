//! Pull requests and their reviewer list.
//!
//! A `PullRequest` is created `Open` with its reviewers already chosen and
//! moves once, irreversibly, to `Merged`. The reviewer list can only change
//! while the PR is open and never contains the author or the same reviewer
//! twice; every mutating method re-checks both before returning. Reviewers
//! are kept sorted by id.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

use super::pr_reviewers;

/// Number of reviewers a PR gets when the team is large enough.
pub const MAX_REVIEWERS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }

    /// Parses the stored representation, `None` for anything unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(Self::Open),
            "MERGED" => Some(Self::Merged),
            _ => None,
        }
    }
}

impl TryFrom<&str> for PrStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| {
            EngineError::InvalidInput(format!("invalid pull request status: {value}"))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Builds a freshly opened PR, rejecting an invalid reviewer list.
    pub fn open(
        id: String,
        name: String,
        author_id: String,
        reviewers: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let mut pr = Self {
            id,
            name,
            author_id,
            status: PrStatus::Open,
            reviewers,
            created_at,
            merged_at: None,
        };
        pr.check_reviewers()?;
        pr.reviewers.sort();
        Ok(pr)
    }

    pub fn is_open(&self) -> bool {
        self.status == PrStatus::Open
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r == user_id)
    }

    /// Marks the PR as merged. Returns `false` when it already was, leaving
    /// `merged_at` untouched.
    pub fn merge(&mut self, at: DateTime<Utc>) -> bool {
        if self.status == PrStatus::Merged {
            return false;
        }
        self.status = PrStatus::Merged;
        self.merged_at = Some(at);
        true
    }

    /// Swaps `old` for `new` in place.
    pub fn replace_reviewer(&mut self, old: &str, new: String) -> ResultEngine<()> {
        self.require_open()?;
        let slot = self
            .reviewers
            .iter()
            .position(|r| r == old)
            .ok_or_else(|| EngineError::ReviewerNotAssigned {
                pull_request: self.id.clone(),
                reviewer: old.to_string(),
            })?;
        let previous = std::mem::replace(&mut self.reviewers[slot], new);
        if let Err(err) = self.check_reviewers() {
            self.reviewers[slot] = previous;
            return Err(err);
        }
        self.reviewers.sort();
        Ok(())
    }

    /// Drops `user_id` from the reviewers. Returns whether it was there.
    pub fn remove_reviewer(&mut self, user_id: &str) -> ResultEngine<bool> {
        self.require_open()?;
        let before = self.reviewers.len();
        self.reviewers.retain(|r| r != user_id);
        Ok(self.reviewers.len() != before)
    }

    pub fn add_reviewer(&mut self, user_id: String) -> ResultEngine<()> {
        self.require_open()?;
        self.reviewers.push(user_id);
        if let Err(err) = self.check_reviewers() {
            self.reviewers.pop();
            return Err(err);
        }
        self.reviewers.sort();
        Ok(())
    }

    fn require_open(&self) -> ResultEngine<()> {
        if !self.is_open() {
            return Err(EngineError::PullRequestMerged(self.id.clone()));
        }
        Ok(())
    }

    /// No self-review and no duplicate reviewer.
    pub fn check_reviewers(&self) -> ResultEngine<()> {
        if self.has_reviewer(&self.author_id) {
            return Err(EngineError::InvariantViolation(format!(
                "author \"{}\" cannot review pull request \"{}\"",
                self.author_id, self.id
            )));
        }
        for (i, reviewer) in self.reviewers.iter().enumerate() {
            if self.reviewers[..i].contains(reviewer) {
                return Err(EngineError::InvariantViolation(format!(
                    "reviewer \"{reviewer}\" assigned twice to pull request \"{}\"",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

impl From<&PullRequest> for ActiveModel {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: ActiveValue::Set(pr.id.clone()),
            pull_request_name: ActiveValue::Set(pr.name.clone()),
            author_id: ActiveValue::Set(pr.author_id.clone()),
            status: ActiveValue::Set(pr.status.as_str().to_string()),
            created_at: ActiveValue::Set(pr.created_at),
            merged_at: ActiveValue::Set(pr.merged_at),
        }
    }
}

impl TryFrom<(Model, Vec<pr_reviewers::Model>)> for PullRequest {
    type Error = EngineError;

    fn try_from(
        (model, reviewers): (Model, Vec<pr_reviewers::Model>),
    ) -> Result<Self, Self::Error> {
        let mut reviewers: Vec<String> = reviewers.into_iter().map(|r| r.user_id).collect();
        reviewers.sort();
        Ok(Self {
            status: PrStatus::try_from(model.status.as_str())?,
            id: model.pull_request_id,
            name: model.pull_request_name,
            author_id: model.author_id,
            reviewers,
            created_at: model.created_at,
            merged_at: model.merged_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pull_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub merged_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pr_reviewers::Entity")]
    Reviewers,
}

impl Related<super::pr_reviewers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_pr(reviewers: &[&str]) -> ResultEngine<PullRequest> {
        PullRequest::open(
            "pr-1".to_string(),
            "Add search".to_string(),
            "author".to_string(),
            reviewers.iter().map(|r| String::from(*r)).collect(),
            Utc::now(),
        )
    }

    #[test]
    fn open_rejects_author_as_reviewer() {
        let err = open_pr(&["u1", "author"]).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn open_rejects_duplicate_reviewer() {
        let err = open_pr(&["u1", "u1"]).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn replace_reviewer_keeps_list_on_duplicate() {
        let mut pr = open_pr(&["u1", "u2"]).unwrap();
        let err = pr.replace_reviewer("u1", "u2".to_string()).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
        assert_eq!(pr.reviewers, vec!["u1", "u2"]);
    }

    #[test]
    fn replace_reviewer_requires_assignment() {
        let mut pr = open_pr(&["u1"]).unwrap();
        let err = pr.replace_reviewer("u9", "u2".to_string()).unwrap_err();
        assert_eq!(
            err,
            EngineError::ReviewerNotAssigned {
                pull_request: "pr-1".to_string(),
                reviewer: "u9".to_string(),
            }
        );
    }

    #[test]
    fn reviewers_stay_sorted() {
        let mut pr = open_pr(&["u3", "u1"]).unwrap();
        assert_eq!(pr.reviewers, vec!["u1", "u3"]);
        pr.replace_reviewer("u1", "u5".to_string()).unwrap();
        assert_eq!(pr.reviewers, vec!["u3", "u5"]);
        assert!(pr.remove_reviewer("u5").unwrap());
        pr.add_reviewer("u2".to_string()).unwrap();
        assert_eq!(pr.reviewers, vec!["u2", "u3"]);
    }

    #[test]
    fn merged_pr_is_frozen() {
        let mut pr = open_pr(&["u1"]).unwrap();
        assert!(pr.merge(Utc::now()));
        assert_eq!(
            pr.add_reviewer("u2".to_string()).unwrap_err(),
            EngineError::PullRequestMerged("pr-1".to_string())
        );
        assert!(pr.remove_reviewer("u1").is_err());
        assert_eq!(pr.reviewers, vec!["u1"]);
    }

    #[test]
    fn merge_twice_keeps_first_timestamp() {
        let mut pr = open_pr(&[]).unwrap();
        let first = Utc::now();
        assert!(pr.merge(first));
        assert!(!pr.merge(first + chrono::Duration::seconds(5)));
        assert_eq!(pr.merged_at, Some(first));
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert_eq!(PrStatus::parse("DRAFT"), None);
        assert_eq!(PrStatus::parse("MERGED"), Some(PrStatus::Merged));
    }
}
