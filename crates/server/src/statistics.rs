//! Statistics API endpoints

use api_types::stats::{Statistics, StatusBreakdown};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for review load statistics
pub async fn get_stats(State(state): State<ServerState>) -> Result<Json<Statistics>, ServerError> {
    let stats = state.engine.statistics().await?;

    Ok(Json(Statistics {
        total_assignments: stats.total_assignments,
        by_user: stats.by_user,
        by_status: StatusBreakdown {
            open: stats.by_status.open,
            merged: stats.by_status.merged,
        },
    }))
}
