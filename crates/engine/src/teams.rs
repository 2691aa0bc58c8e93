//! Teams.
//!
//! A team row only carries its name. Members are the users whose `team_name`
//! points at it, so the active flag of a member is always the one stored on
//! the user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Summary of a team member as seen by the assignment logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Members ordered by `user_id`.
    pub members: Vec<TeamMember>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
