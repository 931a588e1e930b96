use async_trait::async_trait;
use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use std::collections::BTreeMap;
use tracing::info;

use super::{pull_request, teams, user, Gateway, GatewayTx};
use crate::types::error::AppError;
use crate::types::pull_request::{NewPullRequest, PullRequest, PullRequestShort};
use crate::types::user::User;

/// SeaORM-backed gateway. Postgres in production; any SeaORM URL works,
/// which lets tests run against `sqlite::memory:`.
#[derive(Clone)]
pub struct DbService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DbService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let database_connection = Database::connect(uri).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Migrations finished.");
        Ok(Self { database_connection })
    }
}

#[async_trait]
impl Gateway for DbService {
    async fn begin(&self) -> Result<Box<dyn GatewayTx>, AppError> {
        let txn = self.database_connection.begin().await?;
        Ok(Box::new(DbTx { txn }))
    }

    async fn team_exists(&self, team_name: &str) -> Result<bool, AppError> {
        teams::team_exists(&self.database_connection, team_name).await
    }

    async fn get_team_members(&self, team_name: &str) -> Result<Vec<User>, AppError> {
        teams::get_team_members(&self.database_connection, team_name).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        user::get_user(&self.database_connection, user_id).await
    }

    async fn get_active_members(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>, AppError> {
        user::get_active_members(&self.database_connection, team_name, exclude_user_id).await
    }

    async fn set_user_active(&self, user_id: &str, active: bool) -> Result<(), AppError> {
        user::set_user_active(&self.database_connection, user_id, active).await
    }

    async fn pr_exists(&self, pr_id: &str) -> Result<bool, AppError> {
        pull_request::pr_exists(&self.database_connection, pr_id).await
    }

    async fn get_pr(&self, pr_id: &str) -> Result<Option<PullRequest>, AppError> {
        pull_request::get_pr(&self.database_connection, pr_id, false).await
    }

    async fn is_reviewer_assigned(&self, pr_id: &str, user_id: &str) -> Result<bool, AppError> {
        pull_request::is_reviewer_assigned(&self.database_connection, pr_id, user_id).await
    }

    async fn list_prs_for_reviewer(&self, user_id: &str) -> Result<Vec<PullRequestShort>, AppError> {
        pull_request::list_prs_for_reviewer(&self.database_connection, user_id).await
    }

    async fn count_reviewer_assignments(&self) -> Result<BTreeMap<String, u64>, AppError> {
        pull_request::count_reviewer_assignments(&self.database_connection).await
    }

    async fn count_prs(&self) -> Result<u64, AppError> {
        pull_request::count_prs(&self.database_connection).await
    }
}

/// Unit of work over one database transaction. Dropping it without `commit`
/// rolls the transaction back.
pub struct DbTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl GatewayTx for DbTx {
    async fn team_exists(&mut self, team_name: &str) -> Result<bool, AppError> {
        teams::team_exists(&self.txn, team_name).await
    }

    async fn create_team(&mut self, team_name: &str) -> Result<(), AppError> {
        teams::create_team(&self.txn, team_name).await
    }

    async fn upsert_user(&mut self, u: &User) -> Result<(), AppError> {
        user::upsert_user(&self.txn, u).await
    }

    async fn get_user(&mut self, user_id: &str) -> Result<Option<User>, AppError> {
        user::get_user(&self.txn, user_id).await
    }

    async fn get_active_members(
        &mut self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>, AppError> {
        user::get_active_members(&self.txn, team_name, exclude_user_id).await
    }

    async fn pr_exists(&mut self, pr_id: &str) -> Result<bool, AppError> {
        pull_request::pr_exists(&self.txn, pr_id).await
    }

    async fn lock_pr(&mut self, pr_id: &str) -> Result<Option<PullRequest>, AppError> {
        pull_request::get_pr(&self.txn, pr_id, true).await
    }

    async fn create_pr(&mut self, pr: &NewPullRequest, reviewers: &[String]) -> Result<(), AppError> {
        pull_request::create_pr(&self.txn, pr, reviewers).await
    }

    async fn set_merged(&mut self, pr_id: &str, merged_at: DateTime<Utc>) -> Result<(), AppError> {
        pull_request::set_merged(&self.txn, pr_id, merged_at).await
    }

    async fn assign_reviewer(&mut self, pr_id: &str, user_id: &str) -> Result<(), AppError> {
        pull_request::assign_reviewer(&self.txn, pr_id, user_id).await
    }

    async fn unassign_reviewer(&mut self, pr_id: &str, user_id: &str) -> Result<(), AppError> {
        pull_request::unassign_reviewer(&self.txn, pr_id, user_id).await
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.txn.commit().await?;
        Ok(())
    }
}
