//! Team API endpoints

use api_types::team::{Team, TeamMember, TeamQuery, TeamResponse};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, server::ServerState};

fn team_view(team: engine::Team) -> Team {
    Team {
        team_name: team.name,
        members: team
            .members
            .into_iter()
            .map(|m| TeamMember {
                user_id: m.user_id,
                username: m.username,
                is_active: m.is_active,
            })
            .collect(),
    }
}

/// Handle requests for creating a team together with its members
pub async fn add(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<Team>, ServerError>,
) -> Result<(StatusCode, Json<TeamResponse>), ServerError> {
    let members = payload
        .members
        .into_iter()
        .map(|m| engine::TeamMember {
            user_id: m.user_id,
            username: m.username,
            is_active: m.is_active,
        })
        .collect();
    let team = state.engine.add_team(&payload.team_name, members).await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamResponse {
            team: team_view(team),
        }),
    ))
}

/// Handle requests for reading a team
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TeamQuery>, ServerError>,
) -> Result<Json<Team>, ServerError> {
    if query.team_name.is_empty() {
        return Err(ServerError::Generic(
            "team_name parameter is required".to_string(),
        ));
    }
    let team = state.engine.team(&query.team_name).await?;
    Ok(Json(team_view(team)))
}
