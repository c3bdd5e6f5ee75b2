use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Products::Table)
                    .col(Products::PublishedBy)
                    .name("idx_products_published_by")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::ByUser)
                    .name("idx_orders_by_user")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ProductReports::Table)
                    .col(ProductReports::ByUser)
                    .name("idx_product_reports_by_user")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_product_reports_by_user")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_by_user").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_published_by").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    PublishedBy,
}

#[derive(Iden)]
enum Orders {
    Table,
    ByUser,
}

#[derive(Iden)]
enum ProductReports {
    Table,
    ByUser,
}
