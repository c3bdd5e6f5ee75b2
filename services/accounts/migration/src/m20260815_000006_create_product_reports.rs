use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductReports::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductReports::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductReports::Reason).string().not_null())
                    .col(ColumnDef::new(ProductReports::ByUser).big_integer().null())
                    .col(
                        ColumnDef::new(ProductReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProductReports::Table, ProductReports::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProductReports::Table, ProductReports::ByUser)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProductReports {
    Table,
    Id,
    ProductId,
    Reason,
    ByUser,
    CreatedAt,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
