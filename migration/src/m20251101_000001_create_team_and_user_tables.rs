use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Teams {
    Table,
    TeamName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    Username,
    TeamName,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        // teams are keyed by name, no surrogate id
        m.create_table(
            Table::create()
                .table(Teams::Table)
                .if_not_exists()
                .col(ColumnDef::new(Teams::TeamName).string().not_null().primary_key())
                .col(ColumnDef::new(Teams::CreatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Users::Table)
                .if_not_exists()
                .col(ColumnDef::new(Users::UserId).string().not_null().primary_key())
                .col(ColumnDef::new(Users::Username).string().not_null())
                .col(ColumnDef::new(Users::TeamName).string().not_null())
                .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_users_team")
                        .from(Users::Table, Users::TeamName)
                        .to(Teams::Table, Teams::TeamName)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // active-teammate lookups filter on both columns
        m.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_users_team_active")
                .table(Users::Table)
                .col(Users::TeamName)
                .col(Users::IsActive)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Users::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(Teams::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
