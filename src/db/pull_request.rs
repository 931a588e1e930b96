use crate::types::error::{AppError, Resource};
use crate::types::pull_request::{NewPullRequest, PrStatus, PullRequest, PullRequestShort};
use chrono::{DateTime, Utc};
use entity::pr_reviewer::{
    ActiveModel as ReviewerActive, Column as ReviewerColumn, Entity as PrReviewer,
};
use entity::pull_request::{
    ActiveModel as PrActive, Column as PrColumn, Entity as PullRequestEntity,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, FromQueryResult)]
struct ReviewerLoad {
    user_id: String,
    assignments: i64,
}

pub(super) async fn pr_exists<C: ConnectionTrait>(conn: &C, pr_id: &str) -> Result<bool, AppError> {
    Ok(PullRequestEntity::find_by_id(pr_id.to_string()).count(conn).await? > 0)
}

async fn reviewer_ids<C: ConnectionTrait>(conn: &C, pr_id: &str) -> Result<Vec<String>, AppError> {
    Ok(PrReviewer::find()
        .filter(ReviewerColumn::PullRequestId.eq(pr_id))
        .order_by_asc(ReviewerColumn::UserId)
        .all(conn)
        .await?
        .into_iter()
        .map(|r| r.user_id)
        .collect())
}

/// Loads the PR with its reviewers. With `lock` the row is taken `FOR UPDATE`
/// on Postgres; SQLite already serialises writers on the whole database.
pub(super) async fn get_pr<C: ConnectionTrait>(
    conn: &C,
    pr_id: &str,
    lock: bool,
) -> Result<Option<PullRequest>, AppError> {
    let mut query = PullRequestEntity::find_by_id(pr_id.to_string());
    if lock && conn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_exclusive();
    }

    let Some(model) = query.one(conn).await? else {
        return Ok(None);
    };
    let reviewers = reviewer_ids(conn, pr_id).await?;
    Ok(Some(PullRequest::from_parts(model, reviewers)))
}

pub(super) async fn create_pr<C: ConnectionTrait>(
    conn: &C,
    pr: &NewPullRequest,
    reviewers: &[String],
) -> Result<(), AppError> {
    let inserted = PullRequestEntity::insert(PrActive {
        pull_request_id: Set(pr.pull_request_id.clone()),
        pull_request_name: Set(pr.pull_request_name.clone()),
        author_id: Set(pr.author_id.clone()),
        status: Set(PrStatus::Open),
        created_at: Set(pr.created_at),
        merged_at: Set(None),
    })
    .exec_without_returning(conn)
    .await;

    if let Err(err) = inserted {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            warn!(pr = %pr.pull_request_id, "PR insert hit unique constraint");
            return Err(AppError::PrExists);
        }
        return Err(err.into());
    }

    for reviewer in reviewers {
        insert_reviewer(conn, &pr.pull_request_id, reviewer).await?;
    }
    Ok(())
}

async fn insert_reviewer<C: ConnectionTrait>(conn: &C, pr_id: &str, user_id: &str) -> Result<(), AppError> {
    PrReviewer::insert(ReviewerActive {
        pull_request_id: Set(pr_id.to_string()),
        user_id: Set(user_id.to_string()),
        assigned_at: Set(Utc::now()),
    })
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

pub(super) async fn set_merged<C: ConnectionTrait>(
    conn: &C,
    pr_id: &str,
    merged_at: DateTime<Utc>,
) -> Result<(), AppError> {
    let current = PullRequestEntity::find_by_id(pr_id.to_string())
        .one(conn)
        .await?
        .ok_or(AppError::NotFound(Resource::PullRequest))?;

    // merged_at is written exactly once
    if current.status == PrStatus::Merged {
        return Ok(());
    }

    let mut am: PrActive = current.into();
    am.status = Set(PrStatus::Merged);
    am.merged_at = Set(Some(merged_at));
    am.update(conn).await?;
    Ok(())
}

pub(super) async fn is_reviewer_assigned<C: ConnectionTrait>(
    conn: &C,
    pr_id: &str,
    user_id: &str,
) -> Result<bool, AppError> {
    Ok(PrReviewer::find_by_id((pr_id.to_string(), user_id.to_string()))
        .count(conn)
        .await?
        > 0)
}

pub(super) async fn assign_reviewer<C: ConnectionTrait>(conn: &C, pr_id: &str, user_id: &str) -> Result<(), AppError> {
    if is_reviewer_assigned(conn, pr_id, user_id).await? {
        return Ok(());
    }
    insert_reviewer(conn, pr_id, user_id).await
}

pub(super) async fn unassign_reviewer<C: ConnectionTrait>(conn: &C, pr_id: &str, user_id: &str) -> Result<(), AppError> {
    PrReviewer::delete_by_id((pr_id.to_string(), user_id.to_string()))
        .exec(conn)
        .await?;
    Ok(())
}

pub(super) async fn list_prs_for_reviewer<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
) -> Result<Vec<PullRequestShort>, AppError> {
    Ok(PullRequestEntity::find()
        .inner_join(PrReviewer)
        .filter(ReviewerColumn::UserId.eq(user_id))
        .order_by_desc(PrColumn::CreatedAt)
        .order_by_asc(PrColumn::PullRequestId)
        .all(conn)
        .await?
        .into_iter()
        .map(PullRequestShort::from)
        .collect())
}

pub(super) async fn count_reviewer_assignments<C: ConnectionTrait>(
    conn: &C,
) -> Result<BTreeMap<String, u64>, AppError> {
    let rows = PrReviewer::find()
        .select_only()
        .column(ReviewerColumn::UserId)
        .column_as(Expr::col(ReviewerColumn::UserId).count(), "assignments")
        .group_by(ReviewerColumn::UserId)
        .into_model::<ReviewerLoad>()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.user_id, r.assignments.max(0) as u64))
        .collect())
}

pub(super) async fn count_prs<C: ConnectionTrait>(conn: &C) -> Result<u64, AppError> {
    Ok(PullRequestEntity::find().count(conn).await?)
}
