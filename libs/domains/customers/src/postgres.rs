use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::entity::customer;
use crate::error::{CustomerError, CustomerResult};
use crate::models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::repository::CustomerRepository;

/// PostgreSQL implementation of CustomerRepository using SeaORM
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    db: DatabaseConnection,
}

impl PgCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        let active: customer::ActiveModel = input.into();
        let row = active.insert(&self.db).await?;

        tracing::info!(customer_id = row.id, "Created customer");
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i32) -> CustomerResult<Option<Customer>> {
        let row = customer::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Customer::from))
    }

    async fn list(&self, filter: CustomerFilter) -> CustomerResult<Vec<Customer>> {
        let mut query = customer::Entity::find();

        if let Some(name) = filter.name {
            query = query.filter(customer::Column::Name.contains(&name));
        }

        let rows = query
            .order_by_asc(customer::Column::Id)
            .offset(filter.offset as u64)
            .limit(filter.limit as u64)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn update(&self, id: i32, input: UpdateCustomer) -> CustomerResult<Customer> {
        let row = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        let mut active: customer::ActiveModel = row.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(phone_number) = input.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> CustomerResult<bool> {
        let result = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
