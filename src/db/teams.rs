use crate::types::error::AppError;
use crate::types::user::User;
use chrono::Utc;
use entity::team::{ActiveModel as TeamActive, Entity as Team};
use entity::user::{Column as UserColumn, Entity as UserEntity};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::warn;

pub(super) async fn team_exists<C: ConnectionTrait>(conn: &C, team_name: &str) -> Result<bool, AppError> {
    Ok(Team::find_by_id(team_name.to_string()).count(conn).await? > 0)
}

pub(super) async fn create_team<C: ConnectionTrait>(conn: &C, team_name: &str) -> Result<(), AppError> {
    match Team::insert(TeamActive {
        team_name: Set(team_name.to_string()),
        created_at: Set(Utc::now()),
    })
    .exec_without_returning(conn)
    .await
    {
        Ok(_) => Ok(()),
        Err(err) => {
            // lost a race with another creator of the same name
            if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                warn!(team = team_name, "team insert hit unique constraint");
                return Err(AppError::TeamExists);
            }
            Err(err.into())
        }
    }
}

pub(super) async fn get_team_members<C: ConnectionTrait>(conn: &C, team_name: &str) -> Result<Vec<User>, AppError> {
    Ok(UserEntity::find()
        .filter(UserColumn::TeamName.eq(team_name))
        .order_by_asc(UserColumn::UserId)
        .all(conn)
        .await?
        .into_iter()
        .map(User::from)
        .collect())
}
