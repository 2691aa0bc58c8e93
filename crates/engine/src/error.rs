//! The module contains the errors the engine can throw.
//!
//! Every variant belongs to one [`ErrorKind`], which is what callers should
//! branch on:
//!
//! - [`NotFound`]: a PR, team, user or author is missing.
//! - [`InvalidState`]: the request does not fit the current state (merged PR,
//!   reviewer not assigned, author without team). Nothing was mutated.
//! - [`NoCandidate`]: no eligible replacement reviewer exists.
//! - [`Conflict`]: the identifier is already taken.
//! - [`InvalidInput`]: blank identifiers or an empty batch.
//! - [`Storage`]: persistence or random source failure, propagated unchanged.
//!
//!  [`NotFound`]: ErrorKind::NotFound
//!  [`InvalidState`]: ErrorKind::InvalidState
//!  [`NoCandidate`]: ErrorKind::NoCandidate
//!  [`Conflict`]: ErrorKind::Conflict
//!  [`InvalidInput`]: ErrorKind::InvalidInput
//!  [`Storage`]: ErrorKind::Storage
use sea_orm::DbErr;
use thiserror::Error;

/// Coarse classification of [`EngineError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    NoCandidate,
    Conflict,
    InvalidInput,
    Storage,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("author \"{0}\" not found")]
    AuthorNotFound(String),
    #[error("author \"{0}\" has no team")]
    AuthorHasNoTeam(String),
    #[error("pull request \"{0}\" not found")]
    PullRequestNotFound(String),
    #[error("team \"{0}\" not found")]
    TeamNotFound(String),
    #[error("user \"{0}\" not found")]
    UserNotFound(String),
    #[error("cannot reassign on merged pull request \"{0}\"")]
    PullRequestMerged(String),
    #[error("reviewer \"{reviewer}\" is not assigned to pull request \"{pull_request}\"")]
    ReviewerNotAssigned {
        pull_request: String,
        reviewer: String,
    },
    #[error("no active replacement candidate for \"{0}\"")]
    NoReplacementCandidate(String),
    #[error("team \"{0}\" has no active members left to take over reviews")]
    NoReplacementPool(String),
    #[error("team \"{0}\" already exists")]
    TeamExists(String),
    #[error("pull request \"{0}\" already exists")]
    PullRequestExists(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("reviewer invariant violated: {0}")]
    InvariantViolation(String),
    #[error("random source failure: {0}")]
    RandomSource(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthorNotFound(_)
            | Self::PullRequestNotFound(_)
            | Self::TeamNotFound(_)
            | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::PullRequestMerged(_)
            | Self::ReviewerNotAssigned { .. }
            | Self::AuthorHasNoTeam(_) => ErrorKind::InvalidState,
            Self::NoReplacementCandidate(_) | Self::NoReplacementPool(_) => {
                ErrorKind::NoCandidate
            }
            Self::TeamExists(_) | Self::PullRequestExists(_) => ErrorKind::Conflict,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvariantViolation(_) | Self::RandomSource(_) | Self::Database(_) => {
                ErrorKind::Storage
            }
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AuthorNotFound(a), Self::AuthorNotFound(b)) => a == b,
            (Self::AuthorHasNoTeam(a), Self::AuthorHasNoTeam(b)) => a == b,
            (Self::PullRequestNotFound(a), Self::PullRequestNotFound(b)) => a == b,
            (Self::TeamNotFound(a), Self::TeamNotFound(b)) => a == b,
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (Self::PullRequestMerged(a), Self::PullRequestMerged(b)) => a == b,
            (
                Self::ReviewerNotAssigned {
                    pull_request: pa,
                    reviewer: ra,
                },
                Self::ReviewerNotAssigned {
                    pull_request: pb,
                    reviewer: rb,
                },
            ) => pa == pb && ra == rb,
            (Self::NoReplacementCandidate(a), Self::NoReplacementCandidate(b)) => a == b,
            (Self::NoReplacementPool(a), Self::NoReplacementPool(b)) => a == b,
            (Self::TeamExists(a), Self::TeamExists(b)) => a == b,
            (Self::PullRequestExists(a), Self::PullRequestExists(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvariantViolation(a), Self::InvariantViolation(b)) => a == b,
            (Self::RandomSource(a), Self::RandomSource(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
