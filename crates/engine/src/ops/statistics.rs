use crate::{PrStatus, ResultEngine, Statistics};

use super::{Engine, store};

impl Engine {
    /// Review load over every PR, computed from storage on each call.
    pub async fn statistics(&self) -> ResultEngine<Statistics> {
        let rows = store::all_pull_requests(&self.database).await?;
        let mut stats = Statistics::default();
        for (pr, reviewers) in &rows {
            stats.record(
                PrStatus::parse(&pr.status),
                reviewers.iter().map(|r| r.user_id.as_str()),
            );
        }
        Ok(stats)
    }
}
