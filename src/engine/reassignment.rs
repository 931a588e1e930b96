use std::sync::Arc;
use tracing::debug;

use super::sampler::Sampler;
use crate::types::error::{AppError, Resource};
use crate::types::pull_request::PullRequest;
use crate::types::user::User;

/// Decides who replaces a reviewer on an open pull request.
#[derive(Debug, Clone)]
pub struct ReassignmentEngine {
    sampler: Arc<Sampler>,
}

impl ReassignmentEngine {
    pub fn new(sampler: Arc<Sampler>) -> Self {
        Self { sampler }
    }

    /// Checks, in order: the PR exists, it is still open, and `old_reviewer`
    /// is currently on it. The first failing check wins.
    pub fn validate<'a>(
        pr: Option<&'a PullRequest>,
        old_reviewer: &str,
    ) -> Result<&'a PullRequest, AppError> {
        let pr = pr.ok_or(AppError::NotFound(Resource::PullRequest))?;
        if !pr.is_open() {
            return Err(AppError::PrMerged);
        }
        if !pr.has_reviewer(old_reviewer) {
            return Err(AppError::NotAssigned);
        }
        Ok(pr)
    }

    /// Active teammates minus the PR author and anyone already reviewing it,
    /// in id order.
    pub fn eligible_pool<'a>(pr: &PullRequest, team_active_members: &'a [User]) -> Vec<&'a User> {
        let mut pool: Vec<&User> = team_active_members
            .iter()
            .filter(|u| u.is_active)
            .filter(|u| u.user_id != pr.author_id)
            .filter(|u| !pr.has_reviewer(&u.user_id))
            .collect();
        pool.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        pool.dedup_by(|a, b| a.user_id == b.user_id);
        pool
    }

    /// Uniformly picks one member of the eligible pool.
    pub fn pick_replacement(
        &self,
        pr: &PullRequest,
        team_active_members: &[User],
    ) -> Result<String, AppError> {
        let pool = Self::eligible_pool(pr, team_active_members);
        let chosen = self.sampler.pick_one(&pool).ok_or(AppError::NoCandidate)?;
        debug!(
            pr = %pr.pull_request_id,
            pool = pool.len(),
            chosen = %chosen.user_id,
            "picked replacement reviewer"
        );
        Ok(chosen.user_id.clone())
    }
}
