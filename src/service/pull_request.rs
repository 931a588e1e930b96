use chrono::Utc;
use tracing::{info, warn};

use super::ReviewService;
use crate::engine::ReassignmentEngine;
use crate::types::error::{AppError, Resource};
use crate::types::pull_request::{NewPullRequest, PullRequest};

impl ReviewService {
    /// Opens a PR and assigns up to `reviewers_per_pr` active teammates of
    /// the author. The PR row and its reviewer edges are written together.
    pub async fn create_pr(
        &self,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest, AppError> {
        let mut tx = self.gateway.begin().await?;
        if tx.pr_exists(pull_request_id).await? {
            return Err(AppError::PrExists);
        }
        let author = tx
            .get_user(author_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Author))?;

        let pool = tx.get_active_members(&author.team_name, &author.user_id).await?;
        let reviewers = self
            .selector
            .select(&pool, &author.user_id, self.reviewers_per_pr);

        let new_pr = NewPullRequest {
            pull_request_id: pull_request_id.to_string(),
            pull_request_name: pull_request_name.to_string(),
            author_id: author.user_id.clone(),
            created_at: Utc::now(),
        };
        tx.create_pr(&new_pr, &reviewers).await?;
        tx.commit().await?;

        info!(
            pr = pull_request_id,
            author = %author.user_id,
            reviewers = ?reviewers,
            "pull request created"
        );
        self.reload_pr(pull_request_id).await
    }

    /// Moves the PR to `MERGED`. Merging a merged PR returns it unchanged.
    pub async fn merge_pr(&self, pull_request_id: &str) -> Result<PullRequest, AppError> {
        let mut tx = self.gateway.begin().await?;
        let pr = tx
            .lock_pr(pull_request_id)
            .await?
            .ok_or(AppError::NotFound(Resource::PullRequest))?;
        if !pr.is_open() {
            return Ok(pr);
        }

        tx.set_merged(pull_request_id, Utc::now()).await?;
        tx.commit().await?;

        info!(pr = pull_request_id, "pull request merged");
        self.reload_pr(pull_request_id).await
    }

    /// Replaces `old_reviewer_id` on an open PR with a random eligible
    /// teammate of the departing reviewer. Returns the refreshed PR and the
    /// id of the replacement.
    pub async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<(PullRequest, String), AppError> {
        let mut tx = self.gateway.begin().await?;
        let locked = tx.lock_pr(pull_request_id).await?;
        let pr = ReassignmentEngine::validate(locked.as_ref(), old_reviewer_id).inspect_err(|err| {
            if matches!(err, AppError::PrMerged | AppError::NotAssigned) {
                warn!(
                    pr = pull_request_id,
                    reviewer = old_reviewer_id,
                    error = %err,
                    "reassignment rejected"
                );
            }
        })?;

        let old_reviewer = tx
            .get_user(old_reviewer_id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))?;
        let team_active = tx.get_active_members(&old_reviewer.team_name, "").await?;
        let replacement = self.reassigner.pick_replacement(pr, &team_active)?;

        tx.unassign_reviewer(pull_request_id, old_reviewer_id).await?;
        tx.assign_reviewer(pull_request_id, &replacement).await?;
        tx.commit().await?;

        info!(
            pr = pull_request_id,
            old = old_reviewer_id,
            new = %replacement,
            "reviewer reassigned"
        );
        let refreshed = self.reload_pr(pull_request_id).await?;
        Ok((refreshed, replacement))
    }

    async fn reload_pr(&self, pull_request_id: &str) -> Result<PullRequest, AppError> {
        self.gateway.get_pr(pull_request_id).await?.ok_or_else(|| {
            AppError::Internal(format!("pull request {pull_request_id} vanished after commit"))
        })
    }
}
