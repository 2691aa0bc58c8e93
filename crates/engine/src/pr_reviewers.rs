//! Reviewer assignments.
//!
//! The composite primary key makes a duplicate reviewer on the same PR
//! impossible at the storage level too.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pr_reviewers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pull_request_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_requests::Entity",
        from = "Column::PullRequestId",
        to = "super::pull_requests::Column::PullRequestId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PullRequests,
}

impl Related<super::pull_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PullRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
