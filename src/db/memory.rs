//! In-memory implementation of [`Gateway`].
//!
//! All state lives behind one async mutex and is lost on restart. A unit of
//! work holds that mutex for its whole lifetime and edits a staged copy, so
//! units of work are fully serialised and an uncommitted one simply vanishes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Gateway, GatewayTx};
use crate::types::error::{AppError, Resource};
use crate::types::pull_request::{NewPullRequest, PrStatus, PullRequest, PullRequestShort};
use crate::types::user::User;

#[derive(Debug, Clone)]
struct PrRow {
    pull_request_name: String,
    author_id: String,
    status: PrStatus,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
struct Store {
    teams: BTreeSet<String>,
    users: BTreeMap<String, User>,
    prs: BTreeMap<String, PrRow>,
    /// (pull_request_id, user_id) edges.
    reviewers: BTreeSet<(String, String)>,
}

impl Store {
    fn members(&self, team_name: &str) -> Vec<User> {
        self.users
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .collect()
    }

    fn active_members(&self, team_name: &str, exclude_user_id: &str) -> Vec<User> {
        self.users
            .values()
            .filter(|u| u.team_name == team_name && u.is_active && u.user_id != exclude_user_id)
            .cloned()
            .collect()
    }

    fn reviewers_of(&self, pr_id: &str) -> Vec<String> {
        self.reviewers
            .iter()
            .filter(|(pr, _)| pr == pr_id)
            .map(|(_, user)| user.clone())
            .collect()
    }

    fn pr(&self, pr_id: &str) -> Option<PullRequest> {
        let row = self.prs.get(pr_id)?;
        Some(PullRequest {
            pull_request_id: pr_id.to_string(),
            pull_request_name: row.pull_request_name.clone(),
            author_id: row.author_id.clone(),
            status: row.status,
            assigned_reviewers: self.reviewers_of(pr_id),
            created_at: row.created_at,
            merged_at: row.merged_at,
        })
    }

    fn edge(pr_id: &str, user_id: &str) -> (String, String) {
        (pr_id.to_string(), user_id.to_string())
    }
}

/// In-memory gateway.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    store: Arc<Mutex<Store>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Gateway for InMemoryGateway {
    async fn begin(&self) -> Result<Box<dyn GatewayTx>, AppError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTx { guard, staged }))
    }

    async fn team_exists(&self, team_name: &str) -> Result<bool, AppError> {
        Ok(self.store.lock().await.teams.contains(team_name))
    }

    async fn get_team_members(&self, team_name: &str) -> Result<Vec<User>, AppError> {
        Ok(self.store.lock().await.members(team_name))
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.store.lock().await.users.get(user_id).cloned())
    }

    async fn get_active_members(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>, AppError> {
        Ok(self.store.lock().await.active_members(team_name, exclude_user_id))
    }

    async fn set_user_active(&self, user_id: &str, active: bool) -> Result<(), AppError> {
        let mut store = self.store.lock().await;
        let user = store
            .users
            .get_mut(user_id)
            .ok_or(AppError::NotFound(Resource::User))?;
        user.is_active = active;
        Ok(())
    }

    async fn pr_exists(&self, pr_id: &str) -> Result<bool, AppError> {
        Ok(self.store.lock().await.prs.contains_key(pr_id))
    }

    async fn get_pr(&self, pr_id: &str) -> Result<Option<PullRequest>, AppError> {
        Ok(self.store.lock().await.pr(pr_id))
    }

    async fn is_reviewer_assigned(&self, pr_id: &str, user_id: &str) -> Result<bool, AppError> {
        Ok(self
            .store
            .lock()
            .await
            .reviewers
            .contains(&Store::edge(pr_id, user_id)))
    }

    async fn list_prs_for_reviewer(&self, user_id: &str) -> Result<Vec<PullRequestShort>, AppError> {
        let store = self.store.lock().await;
        let mut prs: Vec<PullRequest> = store
            .reviewers
            .iter()
            .filter(|(_, reviewer)| reviewer == user_id)
            .filter_map(|(pr_id, _)| store.pr(pr_id))
            .collect();
        prs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.pull_request_id.cmp(&b.pull_request_id))
        });
        Ok(prs.iter().map(PullRequest::short).collect())
    }

    async fn count_reviewer_assignments(&self) -> Result<BTreeMap<String, u64>, AppError> {
        let store = self.store.lock().await;
        let mut counts = BTreeMap::new();
        for (_, user_id) in &store.reviewers {
            *counts.entry(user_id.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_prs(&self) -> Result<u64, AppError> {
        Ok(self.store.lock().await.prs.len() as u64)
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<Store>,
    staged: Store,
}

#[async_trait]
impl GatewayTx for MemoryTx {
    async fn team_exists(&mut self, team_name: &str) -> Result<bool, AppError> {
        Ok(self.staged.teams.contains(team_name))
    }

    async fn create_team(&mut self, team_name: &str) -> Result<(), AppError> {
        if !self.staged.teams.insert(team_name.to_string()) {
            return Err(AppError::TeamExists);
        }
        Ok(())
    }

    async fn upsert_user(&mut self, user: &User) -> Result<(), AppError> {
        if !self.staged.teams.contains(&user.team_name) {
            return Err(AppError::Internal(format!(
                "user {} references unknown team {}",
                user.user_id, user.team_name
            )));
        }
        self.staged.users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&mut self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.staged.users.get(user_id).cloned())
    }

    async fn get_active_members(
        &mut self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>, AppError> {
        Ok(self.staged.active_members(team_name, exclude_user_id))
    }

    async fn pr_exists(&mut self, pr_id: &str) -> Result<bool, AppError> {
        Ok(self.staged.prs.contains_key(pr_id))
    }

    async fn lock_pr(&mut self, pr_id: &str) -> Result<Option<PullRequest>, AppError> {
        // the whole store is already held by this unit of work
        Ok(self.staged.pr(pr_id))
    }

    async fn create_pr(&mut self, pr: &NewPullRequest, reviewers: &[String]) -> Result<(), AppError> {
        if self.staged.prs.contains_key(&pr.pull_request_id) {
            return Err(AppError::PrExists);
        }
        self.staged.prs.insert(
            pr.pull_request_id.clone(),
            PrRow {
                pull_request_name: pr.pull_request_name.clone(),
                author_id: pr.author_id.clone(),
                status: PrStatus::Open,
                created_at: pr.created_at,
                merged_at: None,
            },
        );
        for reviewer in reviewers {
            self.staged
                .reviewers
                .insert(Store::edge(&pr.pull_request_id, reviewer));
        }
        Ok(())
    }

    async fn set_merged(&mut self, pr_id: &str, merged_at: DateTime<Utc>) -> Result<(), AppError> {
        let row = self
            .staged
            .prs
            .get_mut(pr_id)
            .ok_or(AppError::NotFound(Resource::PullRequest))?;
        if row.status != PrStatus::Merged {
            row.status = PrStatus::Merged;
            row.merged_at = Some(merged_at);
        }
        Ok(())
    }

    async fn assign_reviewer(&mut self, pr_id: &str, user_id: &str) -> Result<(), AppError> {
        self.staged.reviewers.insert(Store::edge(pr_id, user_id));
        Ok(())
    }

    async fn unassign_reviewer(&mut self, pr_id: &str, user_id: &str) -> Result<(), AppError> {
        self.staged.reviewers.remove(&Store::edge(pr_id, user_id));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryTx { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, team: &str, active: bool) -> User {
        User {
            user_id: id.to_string(),
            username: id.to_uppercase(),
            team_name: team.to_string(),
            is_active: active,
        }
    }

    async fn seeded_gateway() -> InMemoryGateway {
        let gateway = InMemoryGateway::new();
        let mut tx = gateway.begin().await.unwrap();
        tx.create_team("backend").await.unwrap();
        tx.upsert_user(&user("u1", "backend", true)).await.unwrap();
        tx.upsert_user(&user("u2", "backend", true)).await.unwrap();
        tx.upsert_user(&user("u3", "backend", false)).await.unwrap();
        tx.commit().await.unwrap();
        gateway
    }

    #[tokio::test]
    async fn dropped_unit_of_work_leaves_no_trace() {
        let gateway = seeded_gateway().await;
        {
            let mut tx = gateway.begin().await.unwrap();
            tx.create_team("frontend").await.unwrap();
        }
        assert!(!gateway.team_exists("frontend").await.unwrap());
        assert!(gateway.team_exists("backend").await.unwrap());
    }

    #[tokio::test]
    async fn active_members_skip_inactive_and_excluded() {
        let gateway = seeded_gateway().await;
        let members = gateway.get_active_members("backend", "u1").await.unwrap();
        let ids: Vec<&str> = members.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, vec!["u2"]);
    }

    #[tokio::test]
    async fn set_merged_keeps_first_timestamp() {
        let gateway = seeded_gateway().await;
        let created = Utc::now();
        let mut tx = gateway.begin().await.unwrap();
        tx.create_pr(
            &NewPullRequest {
                pull_request_id: "pr-1".into(),
                pull_request_name: "Add search".into(),
                author_id: "u1".into(),
                created_at: created,
            },
            &["u2".to_string()],
        )
        .await
        .unwrap();
        let first = created + chrono::Duration::seconds(5);
        tx.set_merged("pr-1", first).await.unwrap();
        tx.set_merged("pr-1", first + chrono::Duration::seconds(5)).await.unwrap();
        tx.commit().await.unwrap();

        let pr = gateway.get_pr("pr-1").await.unwrap().unwrap();
        assert_eq!(pr.status, PrStatus::Merged);
        assert_eq!(pr.merged_at, Some(first));
    }

    #[tokio::test]
    async fn unknown_user_cannot_be_activated() {
        let gateway = seeded_gateway().await;
        let err = gateway.set_user_active("ghost", true).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(Resource::User)));
    }
}
