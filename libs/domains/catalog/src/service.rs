use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateMenu, CreateMenuAddon, Menu, MenuAddon, MenuFilter, UpdateCategory,
    UpdateMenu, UpdateMenuAddon,
};
use crate::repository::CatalogRepository;

/// Business logic for the catalog (categories, menus, add-ons)
#[derive(Debug, Clone)]
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    pub async fn update_category(
        &self,
        id: i32,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.update_category(id, input).await
    }

    pub async fn delete_category(&self, id: i32) -> CatalogResult<()> {
        if !self.repository.delete_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }

    pub async fn create_menu(&self, input: CreateMenu) -> CatalogResult<Menu> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.create_menu(input).await
    }

    pub async fn get_menu(&self, id: i32) -> CatalogResult<Menu> {
        self.repository
            .get_menu(id)
            .await?
            .ok_or(CatalogError::MenuNotFound(id))
    }

    pub async fn list_menus(&self, filter: MenuFilter) -> CatalogResult<Vec<Menu>> {
        self.repository.list_menus(filter).await
    }

    pub async fn update_menu(&self, id: i32, input: UpdateMenu) -> CatalogResult<Menu> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.update_menu(id, input).await
    }

    pub async fn delete_menu(&self, id: i32) -> CatalogResult<()> {
        if !self.repository.delete_menu(id).await? {
            return Err(CatalogError::MenuNotFound(id));
        }
        Ok(())
    }

    pub async fn list_addons(&self, menu_id: i32) -> CatalogResult<Vec<MenuAddon>> {
        self.get_menu(menu_id).await?;
        self.repository.list_addons(menu_id).await
    }

    pub async fn create_addon(
        &self,
        menu_id: i32,
        input: CreateMenuAddon,
    ) -> CatalogResult<MenuAddon> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.get_menu(menu_id).await?;
        self.repository.create_addon(menu_id, input).await
    }

    pub async fn get_addon(&self, id: i32) -> CatalogResult<MenuAddon> {
        self.repository
            .get_addon(id)
            .await?
            .ok_or(CatalogError::AddonNotFound(id))
    }

    pub async fn update_addon(&self, id: i32, input: UpdateMenuAddon) -> CatalogResult<MenuAddon> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.repository.update_addon(id, input).await
    }

    pub async fn delete_addon(&self, id: i32) -> CatalogResult<()> {
        if !self.repository.delete_addon(id).await? {
            return Err(CatalogError::AddonNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogRepository;

    fn service() -> CatalogService<InMemoryCatalogRepository> {
        CatalogService::new(InMemoryCatalogRepository::new())
    }

    fn espresso() -> CreateMenu {
        CreateMenu {
            name: "Espresso".to_string(),
            price: 2.5,
            category_id: None,
            image_url: None,
            description: None,
            is_available: true,
        }
    }

    #[tokio::test]
    async fn test_get_missing_menu_returns_not_found() {
        let service = service();
        let result = service.get_menu(999).await;
        assert!(matches!(result, Err(CatalogError::MenuNotFound(999))));
    }

    #[tokio::test]
    async fn test_create_menu_rejects_negative_price() {
        let service = service();
        let mut input = espresso();
        input.price = -1.0;

        let result = service.create_menu(input).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_addon_requires_existing_menu() {
        let service = service();
        let result = service
            .create_addon(
                42,
                CreateMenuAddon {
                    name: "Extra Shot".to_string(),
                    price: 0.5,
                },
            )
            .await;
        assert!(matches!(result, Err(CatalogError::MenuNotFound(42))));
    }

    #[tokio::test]
    async fn test_addon_lifecycle() {
        let service = service();
        let menu = service.create_menu(espresso()).await.unwrap();

        let addon = service
            .create_addon(
                menu.id,
                CreateMenuAddon {
                    name: "Extra Shot".to_string(),
                    price: 0.5,
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_addon(
                addon.id,
                UpdateMenuAddon {
                    price: Some(0.6),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 0.6);

        service.delete_addon(addon.id).await.unwrap();
        let result = service.get_addon(addon.id).await;
        assert!(matches!(result, Err(CatalogError::AddonNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_category_returns_not_found() {
        let service = service();
        let result = service.delete_category(5).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(5))));
    }
}
