use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::entity::{category, menu, menu_addon};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateMenu, CreateMenuAddon, Menu, MenuAddon, MenuFilter, UpdateCategory,
    UpdateMenu, UpdateMenuAddon,
};
use crate::repository::CatalogRepository;

/// PostgreSQL implementation of CatalogRepository using SeaORM
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn get_category(&self, id: i32) -> CatalogResult<Option<Category>> {
        let row = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Category::from))
    }

    async fn update_category(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        let row = category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let mut active: category::ActiveModel = row.into();
        active.name = Set(input.name);
        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete_category(&self, id: i32) -> CatalogResult<bool> {
        let result = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn create_menu(&self, input: CreateMenu) -> CatalogResult<Menu> {
        let active: menu::ActiveModel = input.into();
        let row = active.insert(&self.db).await?;

        tracing::info!(menu_id = row.id, "Created menu");
        Ok(row.into())
    }

    async fn get_menu(&self, id: i32) -> CatalogResult<Option<Menu>> {
        let row = menu::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Menu::from))
    }

    async fn list_menus(&self, filter: MenuFilter) -> CatalogResult<Vec<Menu>> {
        let mut query = menu::Entity::find();

        if let Some(category_id) = filter.category_id {
            query = query.filter(menu::Column::CategoryId.eq(category_id));
        }

        let rows = query
            .order_by_asc(menu::Column::Id)
            .offset(filter.offset as u64)
            .limit(filter.limit as u64)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn update_menu(&self, id: i32, input: UpdateMenu) -> CatalogResult<Menu> {
        let row = menu::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::MenuNotFound(id))?;

        let mut active: menu::ActiveModel = row.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(Some(category_id));
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(is_available) = input.is_available {
            active.is_available = Set(is_available);
        }

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete_menu(&self, id: i32) -> CatalogResult<bool> {
        let result = menu::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn create_addon(
        &self,
        menu_id: i32,
        input: CreateMenuAddon,
    ) -> CatalogResult<MenuAddon> {
        let active = menu_addon::ActiveModel::from_create(menu_id, input);
        let row = active.insert(&self.db).await?;
        Ok(row.into())
    }

    async fn get_addon(&self, id: i32) -> CatalogResult<Option<MenuAddon>> {
        let row = menu_addon::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(MenuAddon::from))
    }

    async fn list_addons(&self, menu_id: i32) -> CatalogResult<Vec<MenuAddon>> {
        let rows = menu_addon::Entity::find()
            .filter(menu_addon::Column::MenuId.eq(menu_id))
            .order_by_asc(menu_addon::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(MenuAddon::from).collect())
    }

    async fn update_addon(&self, id: i32, input: UpdateMenuAddon) -> CatalogResult<MenuAddon> {
        let row = menu_addon::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::AddonNotFound(id))?;

        let mut active: menu_addon::ActiveModel = row.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete_addon(&self, id: i32) -> CatalogResult<bool> {
        let result = menu_addon::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
