use sea_orm::TransactionTrait;

use crate::{EngineError, ResultEngine, Team, TeamMember, User};

use super::{Engine, normalize_required_id, store, with_tx};

impl Engine {
    /// Creates a team and upserts its members.
    ///
    /// A member that already exists is moved to the new team and takes the
    /// given username and active flag.
    pub async fn add_team(&self, team_name: &str, members: Vec<TeamMember>) -> ResultEngine<Team> {
        let team_name = normalize_required_id(team_name, "team_name")?;
        let mut users = Vec::with_capacity(members.len());
        for member in members {
            users.push(User {
                user_id: normalize_required_id(&member.user_id, "user_id")?,
                username: member.username,
                team_name: team_name.clone(),
                is_active: member.is_active,
            });
        }

        let team = with_tx!(self, |db_tx| {
            if store::team_exists(&db_tx, &team_name).await? {
                return Err(EngineError::TeamExists(team_name));
            }
            store::insert_team(&db_tx, &team_name).await?;
            for user in &users {
                store::upsert_user(&db_tx, user).await?;
            }
            let members = store::team_members(&db_tx, &team_name).await?;
            Ok(Team {
                name: team_name.clone(),
                members,
            })
        })?;

        tracing::info!(team = %team.name, members = team.members.len(), "team created");
        Ok(team)
    }

    /// Return the team with its members ordered by `user_id`.
    pub async fn team(&self, team_name: &str) -> ResultEngine<Team> {
        let team_name = normalize_required_id(team_name, "team_name")?;
        if !store::team_exists(&self.database, &team_name).await? {
            return Err(EngineError::TeamNotFound(team_name));
        }
        let members = store::team_members(&self.database, &team_name).await?;
        Ok(Team {
            name: team_name,
            members,
        })
    }
}
