use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Menu category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Menu item with price and availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
}

/// Optional extra attached to a menu item (priced per unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuAddon {
    pub id: i32,
    pub menu_id: i32,
    pub name: String,
    pub price: f64,
}

/// DTO for renaming a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// DTO for creating a menu item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMenu {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category_id: Option<i32>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// DTO for updating a menu item
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMenu {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub category_id: Option<i32>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub is_available: Option<bool>,
}

/// Query filters for listing menu items
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct MenuFilter {
    pub category_id: Option<i32>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// DTO for creating a menu add-on (menu id comes from the path)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMenuAddon {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// DTO for updating a menu add-on
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMenuAddon {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

impl Menu {
    /// Apply a partial update in place
    pub fn apply_update(&mut self, update: UpdateMenu) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
    }
}

impl MenuAddon {
    pub fn apply_update(&mut self, update: UpdateMenuAddon) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}
