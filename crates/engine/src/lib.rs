//! Reviewer assignment engine.
//!
//! [`Engine`] owns the database connection and exposes every operation of the
//! service: team and user management, reviewer assignment at PR creation,
//! reassignment of a single reviewer, batch deactivation with backfill and
//! review load statistics.

pub use error::{EngineError, ErrorKind};
pub use ops::{BatchDeactivateResult, DeactivationFailure, Engine, EngineBuilder, Reassignment};
pub use pull_requests::{MAX_REVIEWERS, PrStatus, PullRequest};
pub use statistics::{Statistics, StatusCounts};
pub use teams::{Team, TeamMember};
pub use users::User;

mod error;
mod locks;
mod ops;
mod pr_reviewers;
mod pull_requests;
pub mod selection;
mod statistics;
mod teams;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
