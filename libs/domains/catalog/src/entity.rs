//! SeaORM entities for the catalog tables.

use crate::models::{Category, CreateMenu, CreateMenuAddon, Menu, MenuAddon};
use sea_orm::ActiveValue::{NotSet, Set};

pub mod category {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "categories")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::menu::Entity")]
        Menus,
    }

    impl Related<super::menu::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Menus.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod menu {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "menus")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub price: f64,
        pub category_id: Option<i32>,
        pub image_url: Option<String>,
        pub description: Option<String>,
        pub is_available: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::category::Entity",
            from = "Column::CategoryId",
            to = "super::category::Column::Id"
        )]
        Category,
        #[sea_orm(has_many = "super::menu_addon::Entity")]
        Addons,
    }

    impl Related<super::category::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Category.def()
        }
    }

    impl Related<super::menu_addon::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Addons.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod menu_addon {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "menu_addons")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub menu_id: i32,
        pub name: String,
        pub price: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::menu::Entity",
            from = "Column::MenuId",
            to = "super::menu::Column::Id"
        )]
        Menu,
    }

    impl Related<super::menu::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Menu.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<menu::Model> for Menu {
    fn from(model: menu::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            category_id: model.category_id,
            image_url: model.image_url,
            description: model.description,
            is_available: model.is_available,
        }
    }
}

impl From<menu_addon::Model> for MenuAddon {
    fn from(model: menu_addon::Model) -> Self {
        Self {
            id: model.id,
            menu_id: model.menu_id,
            name: model.name,
            price: model.price,
        }
    }
}

impl From<CreateMenu> for menu::ActiveModel {
    fn from(input: CreateMenu) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            category_id: Set(input.category_id),
            image_url: Set(input.image_url),
            description: Set(input.description),
            is_available: Set(input.is_available),
        }
    }
}

impl menu_addon::ActiveModel {
    pub fn from_create(menu_id: i32, input: CreateMenuAddon) -> Self {
        Self {
            id: NotSet,
            menu_id: Set(menu_id),
            name: Set(input.name),
            price: Set(input.price),
        }
    }
}
