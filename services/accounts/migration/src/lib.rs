use sea_orm_migration::prelude::*;

mod m20260815_000001_create_user_verifications;
mod m20260815_000002_create_addresses;
mod m20260815_000003_create_users;
mod m20260815_000004_create_products;
mod m20260815_000005_create_orders;
mod m20260815_000006_create_product_reports;
mod m20260815_000007_add_owner_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_user_verifications::Migration),
            Box::new(m20260815_000002_create_addresses::Migration),
            Box::new(m20260815_000003_create_users::Migration),
            Box::new(m20260815_000004_create_products::Migration),
            Box::new(m20260815_000005_create_orders::Migration),
            Box::new(m20260815_000006_create_product_reports::Migration),
            Box::new(m20260815_000007_add_owner_indexes::Migration),
        ]
    }
}
