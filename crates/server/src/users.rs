//! User API endpoints

use api_types::user::{
    DeactivateBatch, DeactivateBatchResult, DeactivationError, SetIsActive, User, UserQuery,
    UserResponse, UserReviews,
};
use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, pull_requests::pull_request_short, server::ServerState};

/// Handle requests for toggling the active flag of a user
pub async fn set_is_active(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<SetIsActive>, ServerError>,
) -> Result<Json<UserResponse>, ServerError> {
    let user = state
        .engine
        .set_user_active(&payload.user_id, payload.is_active)
        .await?;

    Ok(Json(UserResponse {
        user: User {
            user_id: user.user_id,
            username: user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        },
    }))
}

/// Handle requests for the pull requests a user reviews
pub async fn get_review(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<UserQuery>, ServerError>,
) -> Result<Json<UserReviews>, ServerError> {
    if query.user_id.is_empty() {
        return Err(ServerError::Generic(
            "user_id parameter is required".to_string(),
        ));
    }
    let reviews = state.engine.reviews_for(&query.user_id).await?;

    Ok(Json(UserReviews {
        user_id: query.user_id,
        pull_requests: reviews.into_iter().map(pull_request_short).collect(),
    }))
}

/// Handle requests for deactivating several users of a team at once
pub async fn deactivate_batch(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<DeactivateBatch>, ServerError>,
) -> Result<Json<DeactivateBatchResult>, ServerError> {
    if payload.user_ids.is_empty() {
        return Err(ServerError::Generic("user_ids cannot be empty".to_string()));
    }
    let result = state
        .engine
        .deactivate_and_reassign(&payload.team_name, &payload.user_ids)
        .await?;

    Ok(Json(DeactivateBatchResult {
        deactivated_count: result.deactivated_count,
        reassigned_count: result.reassigned_count,
        errors: result
            .errors
            .into_iter()
            .map(|failure| DeactivationError {
                user_id: failure.user_id,
                error: failure.error,
            })
            .collect(),
    }))
}
