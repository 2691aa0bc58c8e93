//! Pull request API endpoints

use api_types::{
    PullRequestStatus,
    pull_request::{
        PullRequest, PullRequestCreate, PullRequestMerge, PullRequestReassign,
        PullRequestResponse, PullRequestShort, ReassignResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use engine::PrStatus;

use crate::{ServerError, server::ServerState};

fn status_view(status: PrStatus) -> PullRequestStatus {
    match status {
        PrStatus::Open => PullRequestStatus::Open,
        PrStatus::Merged => PullRequestStatus::Merged,
    }
}

fn pull_request_view(pr: engine::PullRequest) -> PullRequest {
    PullRequest {
        pull_request_id: pr.id,
        pull_request_name: pr.name,
        author_id: pr.author_id,
        status: status_view(pr.status),
        assigned_reviewers: pr.reviewers,
        created_at: pr.created_at,
        merged_at: pr.merged_at,
    }
}

pub(crate) fn pull_request_short(pr: engine::PullRequest) -> PullRequestShort {
    PullRequestShort {
        pull_request_id: pr.id,
        pull_request_name: pr.name,
        author_id: pr.author_id,
        status: status_view(pr.status),
    }
}

/// Handle requests for opening a pull request with assigned reviewers
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<PullRequestCreate>, ServerError>,
) -> Result<(StatusCode, Json<PullRequestResponse>), ServerError> {
    let pr = state
        .engine
        .create_pull_request(
            &payload.pull_request_id,
            &payload.pull_request_name,
            &payload.author_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PullRequestResponse {
            pr: pull_request_view(pr),
        }),
    ))
}

/// Handle requests for merging a pull request
pub async fn merge(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<PullRequestMerge>, ServerError>,
) -> Result<Json<PullRequestResponse>, ServerError> {
    let pr = state
        .engine
        .merge_pull_request(&payload.pull_request_id)
        .await?;
    Ok(Json(PullRequestResponse {
        pr: pull_request_view(pr),
    }))
}

/// Handle requests for replacing one reviewer
pub async fn reassign(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<PullRequestReassign>, ServerError>,
) -> Result<Json<ReassignResponse>, ServerError> {
    let reassignment = state
        .engine
        .reassign_reviewer(&payload.pull_request_id, &payload.old_user_id)
        .await?;
    Ok(Json(ReassignResponse {
        pr: pull_request_view(reassignment.pull_request),
        replaced_by: reassignment.replaced_by,
    }))
}
