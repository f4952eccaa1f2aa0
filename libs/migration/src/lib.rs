pub use sea_orm_migration::prelude::*;

mod m20250601_000000_create_users;
mod m20250601_000001_create_catalog;
mod m20250601_000002_create_customers;
mod m20250601_000003_create_orders;
mod m20250601_000004_seed_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000000_create_users::Migration),
            Box::new(m20250601_000001_create_catalog::Migration),
            Box::new(m20250601_000002_create_customers::Migration),
            Box::new(m20250601_000003_create_orders::Migration),
            Box::new(m20250601_000004_seed_catalog::Migration),
        ]
    }
}
