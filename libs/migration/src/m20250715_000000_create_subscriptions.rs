use sea_orm_migration::{prelude::*, schema::*};

/// Month-string shape enforced on both date columns.
const MONTH_PATTERN: &str = r"^\d{2}-\d{4}$";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(pk_uuid(Subscriptions::Id))
                    .col(text(Subscriptions::ServiceName))
                    .col(integer(Subscriptions::Price).check(Expr::col(Subscriptions::Price).gt(0)))
                    .col(uuid(Subscriptions::UserId))
                    .col(
                        string_len(Subscriptions::StartDate, 7)
                            .check(Expr::cust(format!("start_date ~ '{MONTH_PATTERN}'"))),
                    )
                    .col(
                        string_len_null(Subscriptions::EndDate, 7)
                            .check(Expr::cust(format!("end_date ~ '{MONTH_PATTERN}'"))),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_user_id")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_service_name")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::ServiceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    ServiceName,
    Price,
    UserId,
    StartDate,
    EndDate,
}
