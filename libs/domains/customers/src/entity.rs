//! SeaORM entity for the customers table.

use crate::models::{CreateCustomer, Customer};
use sea_orm::ActiveValue::{NotSet, Set};

pub mod customer {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub phone_number: Option<String>,
        pub email: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<customer::Model> for Customer {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            email: model.email,
        }
    }
}

impl From<CreateCustomer> for customer::ActiveModel {
    fn from(input: CreateCustomer) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name),
            phone_number: Set(input.phone_number),
            email: Set(input.email),
        }
    }
}
