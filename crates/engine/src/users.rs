//! Users table.
//!
//! `team_name` is empty when the user belongs to no team.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::TeamMember;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl User {
    pub fn has_team(&self) -> bool {
        !self.team_name.is_empty()
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            username: model.username,
            team_name: model.team_name,
            is_active: model.is_active,
        }
    }
}

impl From<Model> for TeamMember {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            username: model.username,
            is_active: model.is_active,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            user_id: ActiveValue::Set(user.user_id.clone()),
            username: ActiveValue::Set(user.username.clone()),
            team_name: ActiveValue::Set(user.team_name.clone()),
            is_active: ActiveValue::Set(user.is_active),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
