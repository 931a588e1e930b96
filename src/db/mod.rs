//! Persistence gateway.
//!
//! `Gateway` holds the reads and single-row writes the service needs;
//! anything that touches more than one row goes through a [`GatewayTx`]
//! opened with [`Gateway::begin`]. A unit of work that is dropped without
//! `commit` leaves no trace, so a cancelled request can never half-apply a
//! reviewer swap.

pub mod memory;
pub mod service;

mod pull_request;
mod teams;
mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::types::error::AppError;
use crate::types::pull_request::{NewPullRequest, PullRequest, PullRequestShort};
use crate::types::user::User;

pub use memory::InMemoryGateway;
pub use service::DbService;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Opens a unit of work.
    async fn begin(&self) -> Result<Box<dyn GatewayTx>, AppError>;

    async fn team_exists(&self, team_name: &str) -> Result<bool, AppError>;

    /// Members ordered by user id.
    async fn get_team_members(&self, team_name: &str) -> Result<Vec<User>, AppError>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Active users of `team_name` other than `exclude_user_id`, ordered by id.
    async fn get_active_members(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>, AppError>;

    /// Fails with `NotFound(User)` when the user does not exist.
    async fn set_user_active(&self, user_id: &str, active: bool) -> Result<(), AppError>;

    async fn pr_exists(&self, pr_id: &str) -> Result<bool, AppError>;

    /// The PR together with its current reviewer set.
    async fn get_pr(&self, pr_id: &str) -> Result<Option<PullRequest>, AppError>;

    async fn is_reviewer_assigned(&self, pr_id: &str, user_id: &str) -> Result<bool, AppError>;

    /// PRs the user currently reviews, newest first.
    async fn list_prs_for_reviewer(&self, user_id: &str) -> Result<Vec<PullRequestShort>, AppError>;

    /// Number of reviewer edges per user; users without edges are absent.
    async fn count_reviewer_assignments(&self) -> Result<BTreeMap<String, u64>, AppError>;

    async fn count_prs(&self) -> Result<u64, AppError>;
}

/// A single atomic unit of work against the gateway.
#[async_trait]
pub trait GatewayTx: Send {
    async fn team_exists(&mut self, team_name: &str) -> Result<bool, AppError>;

    /// Fails with `TeamExists` when the name is taken.
    async fn create_team(&mut self, team_name: &str) -> Result<(), AppError>;

    /// Inserts or overwrites the user, including its team (last write wins).
    async fn upsert_user(&mut self, user: &User) -> Result<(), AppError>;

    async fn get_user(&mut self, user_id: &str) -> Result<Option<User>, AppError>;

    async fn get_active_members(
        &mut self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>, AppError>;

    async fn pr_exists(&mut self, pr_id: &str) -> Result<bool, AppError>;

    /// Reads the PR and holds it until the unit of work ends, so competing
    /// units of work on the same PR run one after another.
    async fn lock_pr(&mut self, pr_id: &str) -> Result<Option<PullRequest>, AppError>;

    /// Inserts the PR row and all reviewer edges. Fails with `PrExists` when
    /// the id is taken.
    async fn create_pr(&mut self, pr: &NewPullRequest, reviewers: &[String]) -> Result<(), AppError>;

    /// Marks the PR merged at `merged_at`. No-op when it is already merged.
    async fn set_merged(&mut self, pr_id: &str, merged_at: DateTime<Utc>) -> Result<(), AppError>;

    /// Adds a reviewer edge; adding an existing edge is a no-op.
    async fn assign_reviewer(&mut self, pr_id: &str, user_id: &str) -> Result<(), AppError>;

    async fn unassign_reviewer(&mut self, pr_id: &str, user_id: &str) -> Result<(), AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
