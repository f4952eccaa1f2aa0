use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateMenu, CreateMenuAddon, Menu, MenuAddon, MenuFilter, UpdateCategory,
    UpdateMenu, UpdateMenuAddon,
};

/// Repository trait for catalog persistence (categories, menus, add-ons)
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all categories
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Get a category by ID
    async fn get_category(&self, id: i32) -> CatalogResult<Option<Category>>;

    /// Rename a category
    async fn update_category(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category>;

    /// Delete a category by ID
    async fn delete_category(&self, id: i32) -> CatalogResult<bool>;

    /// Create a new menu item
    async fn create_menu(&self, input: CreateMenu) -> CatalogResult<Menu>;

    /// Get a menu item by ID
    async fn get_menu(&self, id: i32) -> CatalogResult<Option<Menu>>;

    /// List menu items with optional filters
    async fn list_menus(&self, filter: MenuFilter) -> CatalogResult<Vec<Menu>>;

    /// Update an existing menu item
    async fn update_menu(&self, id: i32, input: UpdateMenu) -> CatalogResult<Menu>;

    /// Delete a menu item by ID
    async fn delete_menu(&self, id: i32) -> CatalogResult<bool>;

    /// Create an add-on under a menu item
    async fn create_addon(&self, menu_id: i32, input: CreateMenuAddon)
        -> CatalogResult<MenuAddon>;

    /// Get an add-on by ID
    async fn get_addon(&self, id: i32) -> CatalogResult<Option<MenuAddon>>;

    /// List the add-ons of a menu item
    async fn list_addons(&self, menu_id: i32) -> CatalogResult<Vec<MenuAddon>>;

    /// Update an existing add-on
    async fn update_addon(&self, id: i32, input: UpdateMenuAddon) -> CatalogResult<MenuAddon>;

    /// Delete an add-on by ID
    async fn delete_addon(&self, id: i32) -> CatalogResult<bool>;
}

/// In-memory implementation of CatalogRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogRepository {
    categories: Arc<RwLock<HashMap<i32, Category>>>,
    menus: Arc<RwLock<HashMap<i32, Menu>>>,
    addons: Arc<RwLock<HashMap<i32, MenuAddon>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Insert a category directly (categories are normally created by seed data)
    pub async fn insert_category(&self, name: &str) -> Category {
        let category = Category {
            id: self.next_id(),
            name: name.to_string(),
        };
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());
        category
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut result: Vec<Category> = categories.values().cloned().collect();
        result.sort_by_key(|c| c.id);
        Ok(result)
    }

    async fn get_category(&self, id: i32) -> CatalogResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn update_category(&self, id: i32, input: UpdateCategory) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        let category = categories
            .get_mut(&id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        category.name = input.name;
        Ok(category.clone())
    }

    async fn delete_category(&self, id: i32) -> CatalogResult<bool> {
        let mut categories = self.categories.write().await;
        let removed = categories.remove(&id).is_some();
        if removed {
            // Mirrors the ON DELETE SET NULL behavior of the schema
            let mut menus = self.menus.write().await;
            for menu in menus.values_mut() {
                if menu.category_id == Some(id) {
                    menu.category_id = None;
                }
            }
        }
        Ok(removed)
    }

    async fn create_menu(&self, input: CreateMenu) -> CatalogResult<Menu> {
        let menu = Menu {
            id: self.next_id(),
            name: input.name,
            price: input.price,
            category_id: input.category_id,
            image_url: input.image_url,
            description: input.description,
            is_available: input.is_available,
        };
        self.menus.write().await.insert(menu.id, menu.clone());

        tracing::info!(menu_id = menu.id, "Created menu");
        Ok(menu)
    }

    async fn get_menu(&self, id: i32) -> CatalogResult<Option<Menu>> {
        let menus = self.menus.read().await;
        Ok(menus.get(&id).cloned())
    }

    async fn list_menus(&self, filter: MenuFilter) -> CatalogResult<Vec<Menu>> {
        let menus = self.menus.read().await;
        let mut result: Vec<Menu> = menus
            .values()
            .filter(|m| {
                filter
                    .category_id
                    .is_none_or(|category_id| m.category_id == Some(category_id))
            })
            .cloned()
            .collect();
        result.sort_by_key(|m| m.id);
        Ok(result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn update_menu(&self, id: i32, input: UpdateMenu) -> CatalogResult<Menu> {
        let mut menus = self.menus.write().await;
        let menu = menus.get_mut(&id).ok_or(CatalogError::MenuNotFound(id))?;
        menu.apply_update(input);
        Ok(menu.clone())
    }

    async fn delete_menu(&self, id: i32) -> CatalogResult<bool> {
        let mut menus = self.menus.write().await;
        let removed = menus.remove(&id).is_some();
        if removed {
            // Mirrors the ON DELETE CASCADE behavior of the schema
            let mut addons = self.addons.write().await;
            addons.retain(|_, addon| addon.menu_id != id);
        }
        Ok(removed)
    }

    async fn create_addon(
        &self,
        menu_id: i32,
        input: CreateMenuAddon,
    ) -> CatalogResult<MenuAddon> {
        let addon = MenuAddon {
            id: self.next_id(),
            menu_id,
            name: input.name,
            price: input.price,
        };
        self.addons.write().await.insert(addon.id, addon.clone());
        Ok(addon)
    }

    async fn get_addon(&self, id: i32) -> CatalogResult<Option<MenuAddon>> {
        let addons = self.addons.read().await;
        Ok(addons.get(&id).cloned())
    }

    async fn list_addons(&self, menu_id: i32) -> CatalogResult<Vec<MenuAddon>> {
        let addons = self.addons.read().await;
        let mut result: Vec<MenuAddon> = addons
            .values()
            .filter(|a| a.menu_id == menu_id)
            .cloned()
            .collect();
        result.sort_by_key(|a| a.id);
        Ok(result)
    }

    async fn update_addon(&self, id: i32, input: UpdateMenuAddon) -> CatalogResult<MenuAddon> {
        let mut addons = self.addons.write().await;
        let addon = addons.get_mut(&id).ok_or(CatalogError::AddonNotFound(id))?;
        addon.apply_update(input);
        Ok(addon.clone())
    }

    async fn delete_addon(&self, id: i32) -> CatalogResult<bool> {
        let mut addons = self.addons.write().await;
        Ok(addons.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    async fn test_create_and_get_menu() {
        let repo = InMemoryCatalogRepository::new();

        let menu = repo.create_menu(espresso()).await.unwrap();
        assert!(menu.id > 0);

        let found = repo.get_menu(menu.id).await.unwrap().unwrap();
        assert_eq!(found, menu);
    }

    #[tokio::test]
    async fn test_list_menus_filters_by_category() {
        let repo = InMemoryCatalogRepository::new();
        let coffee = repo.insert_category("Coffee").await;

        let mut in_category = espresso();
        in_category.category_id = Some(coffee.id);
        let espresso = repo.create_menu(in_category).await.unwrap();

        repo.create_menu(CreateMenu {
            name: "Banana Cake".to_string(),
            price: 4.0,
            category_id: None,
            image_url: None,
            description: None,
            is_available: true,
        })
        .await
        .unwrap();

        let filter = MenuFilter {
            category_id: Some(coffee.id),
            ..Default::default()
        };
        let menus = repo.list_menus(filter).await.unwrap();
        assert_eq!(menus, vec![espresso]);

        let all = repo.list_menus(MenuFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_menu_applies_partial_fields() {
        let repo = InMemoryCatalogRepository::new();
        let menu = repo.create_menu(espresso()).await.unwrap();

        let updated = repo
            .update_menu(
                menu.id,
                UpdateMenu {
                    price: Some(2.8),
                    is_available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Espresso");
        assert_eq!(updated.price, 2.8);
        assert!(!updated.is_available);
    }

    #[tokio::test]
    async fn test_update_missing_menu_fails() {
        let repo = InMemoryCatalogRepository::new();
        let result = repo.update_menu(99, UpdateMenu::default()).await;
        assert!(matches!(result, Err(CatalogError::MenuNotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_menu_cascades_addons() {
        let repo = InMemoryCatalogRepository::new();
        let menu = repo.create_menu(espresso()).await.unwrap();
        let addon = repo
            .create_addon(
                menu.id,
                CreateMenuAddon {
                    name: "Extra Shot".to_string(),
                    price: 0.5,
                },
            )
            .await
            .unwrap();

        assert!(repo.delete_menu(menu.id).await.unwrap());
        assert!(repo.get_addon(addon.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_category_detaches_menus() {
        let repo = InMemoryCatalogRepository::new();
        let coffee = repo.insert_category("Coffee").await;

        let mut input = espresso();
        input.category_id = Some(coffee.id);
        let menu = repo.create_menu(input).await.unwrap();

        assert!(repo.delete_category(coffee.id).await.unwrap());
        let menu = repo.get_menu(menu.id).await.unwrap().unwrap();
        assert_eq!(menu.category_id, None);
    }

    #[tokio::test]
    async fn test_list_addons_scoped_to_menu() {
        let repo = InMemoryCatalogRepository::new();
        let espresso = repo.create_menu(espresso()).await.unwrap();
        let cappuccino = repo
            .create_menu(CreateMenu {
                name: "Cappuccino".to_string(),
                price: 3.0,
                category_id: None,
                image_url: None,
                description: None,
                is_available: true,
            })
            .await
            .unwrap();

        repo.create_addon(
            espresso.id,
            CreateMenuAddon {
                name: "Extra Shot".to_string(),
                price: 0.5,
            },
        )
        .await
        .unwrap();
        repo.create_addon(
            cappuccino.id,
            CreateMenuAddon {
                name: "Soy Milk".to_string(),
                price: 0.3,
            },
        )
        .await
        .unwrap();

        let addons = repo.list_addons(espresso.id).await.unwrap();
        assert_eq!(addons.len(), 1);
        assert_eq!(addons[0].name, "Extra Shot");
    }
}
