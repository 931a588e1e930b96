use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum PullRequests {
    Table,
    PullRequestId,
    PullRequestName,
    AuthorId,
    Status,
    CreatedAt,
    MergedAt,
}

#[derive(DeriveIden)]
enum PrReviewers {
    Table,
    PullRequestId,
    UserId,
    AssignedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(PullRequests::Table)
                .if_not_exists()
                .col(ColumnDef::new(PullRequests::PullRequestId).string().not_null().primary_key())
                .col(ColumnDef::new(PullRequests::PullRequestName).string().not_null())
                .col(ColumnDef::new(PullRequests::AuthorId).string().not_null())
                .col(ColumnDef::new(PullRequests::Status).string_len(16).not_null().default("OPEN"))
                .col(ColumnDef::new(PullRequests::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(PullRequests::MergedAt).timestamp_with_time_zone().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pull_requests_author")
                        .from(PullRequests::Table, PullRequests::AuthorId)
                        .to(Users::Table, Users::UserId)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // reviewer edges: deleting a PR drops its edges, never the users
        m.create_table(
            Table::create()
                .table(PrReviewers::Table)
                .if_not_exists()
                .col(ColumnDef::new(PrReviewers::PullRequestId).string().not_null())
                .col(ColumnDef::new(PrReviewers::UserId).string().not_null())
                .col(ColumnDef::new(PrReviewers::AssignedAt).timestamp_with_time_zone().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_pr_reviewers")
                        .col(PrReviewers::PullRequestId)
                        .col(PrReviewers::UserId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pr_reviewers_pull_request")
                        .from(PrReviewers::Table, PrReviewers::PullRequestId)
                        .to(PullRequests::Table, PullRequests::PullRequestId)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pr_reviewers_user")
                        .from(PrReviewers::Table, PrReviewers::UserId)
                        .to(Users::Table, Users::UserId)
                        .on_delete(ForeignKeyAction::Restrict)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_pr_reviewers_user")
                .table(PrReviewers::Table)
                .col(PrReviewers::UserId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(PrReviewers::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(PullRequests::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
