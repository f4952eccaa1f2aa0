use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Seed categories and menus for development/testing
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO categories (id, name)
            VALUES
                (1, 'Coffee'),
                (2, 'Snack')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO menus (id, name, price, category_id, is_available)
            VALUES
                (1, 'Espresso', 2.5, 1, true),
                (2, 'Cappuccino', 3.0, 1, true),
                (3, 'Banana Cake', 4.0, 2, true)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO menu_addons (id, menu_id, name, price)
            VALUES
                (1, 1, 'Extra Shot', 0.5),
                (2, 2, 'Soy Milk', 0.3)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO customers (id, name, phone_number)
            VALUES
                (1, 'John Doe', '+628123456789'),
                (2, 'Jane Smith', '+628987654321')
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        // Seeded rows carry explicit ids; advance the sequences past them
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories));
            SELECT setval(pg_get_serial_sequence('menus', 'id'), (SELECT MAX(id) FROM menus));
            SELECT setval(pg_get_serial_sequence('menu_addons', 'id'), (SELECT MAX(id) FROM menu_addons));
            SELECT setval(pg_get_serial_sequence('customers', 'id'), (SELECT MAX(id) FROM customers));
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Delete in reverse order of foreign key dependencies
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM menu_addons WHERE id IN (1, 2)")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM menus WHERE id IN (1, 2, 3)")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM categories WHERE id IN (1, 2)")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DELETE FROM customers WHERE id IN (1, 2)")
            .await?;

        Ok(())
    }
}
