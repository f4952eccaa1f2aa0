use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity::user;
use crate::error::UserResult;
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let active: user::ActiveModel = input.into();
        let row = active.insert(&self.db).await?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let row = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(row.map(User::from))
    }
}
