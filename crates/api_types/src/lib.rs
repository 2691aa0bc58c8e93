//! Wire types of the HTTP API.
//!
//! Field names follow the JSON contract exactly; the server converts engine
//! types into these before serializing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    Open,
    Merged,
}

pub mod error {
    use super::*;

    /// Machine readable error codes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ErrorCode {
        TeamExists,
        PrExists,
        PrMerged,
        NotAssigned,
        NoCandidate,
        NotFound,
        InvalidRequest,
        InternalError,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub code: ErrorCode,
        pub message: String,
    }

    /// `{"error": {"code": ..., "message": ...}}`
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: ErrorBody,
    }
}

pub mod team {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TeamMember {
        pub user_id: String,
        pub username: String,
        pub is_active: bool,
    }

    /// Request body of `/team/add` and response of `/team/get`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Team {
        pub team_name: String,
        pub members: Vec<TeamMember>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TeamResponse {
        pub team: Team,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TeamQuery {
        pub team_name: String,
    }
}

pub mod user {
    use super::*;

    use crate::pull_request::PullRequestShort;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub user_id: String,
        pub username: String,
        pub team_name: String,
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserResponse {
        pub user: User,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SetIsActive {
        pub user_id: String,
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserQuery {
        pub user_id: String,
    }

    /// PRs a user has to review.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserReviews {
        pub user_id: String,
        pub pull_requests: Vec<PullRequestShort>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DeactivateBatch {
        pub team_name: String,
        pub user_ids: Vec<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DeactivationError {
        pub user_id: String,
        pub error: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DeactivateBatchResult {
        pub deactivated_count: u64,
        pub reassigned_count: u64,
        pub errors: Vec<DeactivationError>,
    }
}

pub mod pull_request {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PullRequest {
        pub pull_request_id: String,
        pub pull_request_name: String,
        pub author_id: String,
        pub status: PullRequestStatus,
        pub assigned_reviewers: Vec<String>,
        #[serde(rename = "createdAt")]
        pub created_at: DateTime<Utc>,
        #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none", default)]
        pub merged_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PullRequestShort {
        pub pull_request_id: String,
        pub pull_request_name: String,
        pub author_id: String,
        pub status: PullRequestStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PullRequestCreate {
        pub pull_request_id: String,
        pub pull_request_name: String,
        pub author_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PullRequestMerge {
        pub pull_request_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PullRequestReassign {
        pub pull_request_id: String,
        pub old_user_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PullRequestResponse {
        pub pr: PullRequest,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReassignResponse {
        pub pr: PullRequest,
        pub replaced_by: String,
    }
}

pub mod stats {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StatusBreakdown {
        pub open: u64,
        pub merged: u64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Statistics {
        pub total_assignments: u64,
        pub by_user: BTreeMap<String, u64>,
        pub by_status: StatusBreakdown,
    }
}
