pub use sea_orm_migration::prelude::*;

mod m20250810_000000_bootstrap;
mod m20250810_000001_create_users;
mod m20250810_000002_create_brands;
mod m20250810_000003_create_categories;
mod m20250810_000004_create_products;
mod m20250810_000005_create_orders;
mod m20250810_000006_create_notifications;
mod m20250810_000007_create_complaints;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000000_bootstrap::Migration),
            Box::new(m20250810_000001_create_users::Migration),
            Box::new(m20250810_000002_create_brands::Migration),
            Box::new(m20250810_000003_create_categories::Migration),
            Box::new(m20250810_000004_create_products::Migration),
            Box::new(m20250810_000005_create_orders::Migration),
            Box::new(m20250810_000006_create_notifications::Migration),
            Box::new(m20250810_000007_create_complaints::Migration),
        ]
    }
}
