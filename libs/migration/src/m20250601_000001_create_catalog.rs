use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create menus table
        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(pk_auto(Menus::Id))
                    .col(string(Menus::Name))
                    .col(double(Menus::Price))
                    .col(integer_null(Menus::CategoryId))
                    .col(string_null(Menus::ImageUrl))
                    .col(string_null(Menus::Description))
                    .col(boolean(Menus::IsAvailable).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menus_category_id")
                            .from(Menus::Table, Menus::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create menu_addons table
        manager
            .create_table(
                Table::create()
                    .table(MenuAddons::Table)
                    .if_not_exists()
                    .col(pk_auto(MenuAddons::Id))
                    .col(integer(MenuAddons::MenuId))
                    .col(string(MenuAddons::Name))
                    .col(double(MenuAddons::Price))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_addons_menu_id")
                            .from(MenuAddons::Table, MenuAddons::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_menus_category_id")
                    .table(Menus::Table)
                    .col(Menus::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_addons_menu_id")
                    .table(MenuAddons::Table)
                    .col(MenuAddons::MenuId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuAddons::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Menus::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Id,
    Name,
    Price,
    CategoryId,
    ImageUrl,
    Description,
    IsAvailable,
}

#[derive(DeriveIden)]
enum MenuAddons {
    Table,
    Id,
    MenuId,
    Name,
    Price,
}
