use crate::types::error::{AppError, Resource};
use crate::types::user::User;
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column as UserColumn, Entity as UserEntity};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub(super) async fn get_user<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<Option<User>, AppError> {
    Ok(UserEntity::find_by_id(user_id.to_string())
        .one(conn)
        .await?
        .map(User::from))
}

/// Insert, or overwrite name/team/active flag of an existing row. Re-upserting
/// under another team moves the user.
pub(super) async fn upsert_user<C: ConnectionTrait>(conn: &C, user: &User) -> Result<(), AppError> {
    let now = Utc::now();
    UserEntity::insert(UserActive {
        user_id: Set(user.user_id.clone()),
        username: Set(user.username.clone()),
        team_name: Set(user.team_name.clone()),
        is_active: Set(user.is_active),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(UserColumn::UserId)
            .update_columns([
                UserColumn::Username,
                UserColumn::TeamName,
                UserColumn::IsActive,
                UserColumn::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

pub(super) async fn get_active_members<C: ConnectionTrait>(
    conn: &C,
    team_name: &str,
    exclude_user_id: &str,
) -> Result<Vec<User>, AppError> {
    Ok(UserEntity::find()
        .filter(UserColumn::TeamName.eq(team_name))
        .filter(UserColumn::IsActive.eq(true))
        .filter(UserColumn::UserId.ne(exclude_user_id))
        .order_by_asc(UserColumn::UserId)
        .all(conn)
        .await?
        .into_iter()
        .map(User::from)
        .collect())
}

pub(super) async fn set_user_active<C: ConnectionTrait>(conn: &C, user_id: &str, active: bool) -> Result<(), AppError> {
    let mut am: UserActive = UserEntity::find_by_id(user_id.to_string())
        .one(conn)
        .await?
        .ok_or(AppError::NotFound(Resource::User))?
        .into();
    am.is_active = Set(active);
    am.updated_at = Set(Utc::now());
    am.update(conn).await?;
    Ok(())
}
