use api_types::error::{ErrorBody, ErrorCode, ErrorResponse};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{EngineError, ErrorKind};

pub use server::{router, run_with_listener};

mod pull_requests;
mod server;
mod statistics;
mod teams;
mod users;

pub mod types {
    pub mod team {
        pub use api_types::team::{Team, TeamMember, TeamQuery, TeamResponse};
    }

    pub mod user {
        pub use api_types::user::{
            DeactivateBatch, DeactivateBatchResult, SetIsActive, User, UserQuery, UserResponse,
            UserReviews,
        };
    }

    pub mod pull_request {
        pub use api_types::pull_request::{
            PullRequest, PullRequestCreate, PullRequestMerge, PullRequestReassign,
            PullRequestResponse, PullRequestShort, ReassignResponse,
        };
    }

    pub mod stats {
        pub use api_types::stats::Statistics;
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// Malformed request, answered with `400 INVALID_REQUEST`.
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> (StatusCode, ErrorCode) {
    match err {
        EngineError::TeamExists(_) => (StatusCode::BAD_REQUEST, ErrorCode::TeamExists),
        EngineError::PullRequestExists(_) => (StatusCode::CONFLICT, ErrorCode::PrExists),
        EngineError::PullRequestMerged(_) => (StatusCode::CONFLICT, ErrorCode::PrMerged),
        EngineError::ReviewerNotAssigned { .. } => (StatusCode::CONFLICT, ErrorCode::NotAssigned),
        EngineError::NoReplacementCandidate(_) | EngineError::NoReplacementPool(_) => {
            (StatusCode::CONFLICT, ErrorCode::NoCandidate)
        }
        EngineError::AuthorNotFound(_)
        | EngineError::AuthorHasNoTeam(_)
        | EngineError::PullRequestNotFound(_)
        | EngineError::TeamNotFound(_)
        | EngineError::UserNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        EngineError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest),
        EngineError::InvariantViolation(_)
        | EngineError::RandomSource(_)
        | EngineError::Database(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err.kind() {
        ErrorKind::Storage => {
            tracing::error!("storage error: {err}");
            "internal server error".to_string()
        }
        _ => err.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            ServerError::Engine(err) => {
                let (status, code) = status_for_engine_error(&err);
                (status, code, message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest, err),
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody { code, message },
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;

    fn status_of(err: EngineError) -> StatusCode {
        ServerError::from(err).into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            status_of(EngineError::PullRequestNotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EngineError::AuthorHasNoTeam("x".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn team_exists_maps_to_400() {
        assert_eq!(
            status_of(EngineError::TeamExists("x".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn reassignment_conflicts_map_to_409() {
        assert_eq!(
            status_of(EngineError::PullRequestMerged("x".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(EngineError::NoReplacementPool("x".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(EngineError::PullRequestExists("x".to_string())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn storage_maps_to_500() {
        assert_eq!(
            status_of(EngineError::Database(DbErr::Custom("boom".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(EngineError::RandomSource("no entropy".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
