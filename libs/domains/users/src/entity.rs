//! SeaORM entity for the users (staff accounts) table.

use crate::models::{NewUser, User};
use sea_orm::ActiveValue::{NotSet, Set};

pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        pub password_hash: String,
        pub role: String,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

impl From<NewUser> for user::ActiveModel {
    fn from(input: NewUser) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            role: Set(input.role),
            created_at: Set(chrono::Utc::now()),
        }
    }
}
