use tracing::info;

use super::ReviewService;
use crate::types::error::{AppError, Resource};
use crate::types::pull_request::PullRequestShort;
use crate::types::user::User;

impl ReviewService {
    /// Flips the availability flag. Existing review assignments are left alone.
    pub async fn set_user_active(&self, user_id: &str, active: bool) -> Result<User, AppError> {
        self.gateway.set_user_active(user_id, active).await?;
        info!(user = user_id, active, "user activity changed");

        self.gateway
            .get_user(user_id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    pub async fn get_review_assignments(&self, user_id: &str) -> Result<Vec<PullRequestShort>, AppError> {
        if self.gateway.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound(Resource::User));
        }
        self.gateway.list_prs_for_reviewer(user_id).await
    }
}
