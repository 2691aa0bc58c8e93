use sea_orm::ModelTrait;

use crate::{EngineError, PullRequest, ResultEngine, User, pr_reviewers, pull_requests};

use super::{Engine, normalize_required_id, store};

impl Engine {
    pub async fn user(&self, user_id: &str) -> ResultEngine<User> {
        let user_id = normalize_required_id(user_id, "user_id")?;
        store::find_user(&self.database, &user_id)
            .await?
            .ok_or(EngineError::UserNotFound(user_id))
    }

    /// Set the active flag of a user.
    ///
    /// Reviewer lists are left as they are: an inactive user simply stops
    /// being picked for new assignments.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> ResultEngine<User> {
        let user_id = normalize_required_id(user_id, "user_id")?;
        if !store::set_user_active(&self.database, &user_id, is_active).await? {
            return Err(EngineError::UserNotFound(user_id));
        }
        tracing::debug!(user_id = %user_id, is_active, "user active flag updated");
        self.user(&user_id).await
    }

    /// Every PR the user reviews, open or merged, newest first.
    ///
    /// An unknown user simply has no reviews.
    pub async fn reviews_for(&self, user_id: &str) -> ResultEngine<Vec<PullRequest>> {
        let user_id = normalize_required_id(user_id, "user_id")?;
        let models = store::pull_requests_reviewed_by(&self.database, &user_id, None).await?;
        let mut reviews = Vec::with_capacity(models.len());
        for model in models {
            let reviewers = reviewers_of(self, &model).await?;
            reviews.push(PullRequest::try_from((model, reviewers))?);
        }
        Ok(reviews)
    }
}

async fn reviewers_of(
    engine: &Engine,
    model: &pull_requests::Model,
) -> ResultEngine<Vec<pr_reviewers::Model>> {
    Ok(model
        .find_related(pr_reviewers::Entity)
        .all(&engine.database)
        .await?)
}
