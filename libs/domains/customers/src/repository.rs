use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};

/// Repository trait for customer persistence
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Create a new customer
    async fn create(&self, input: CreateCustomer) -> CustomerResult<Customer>;

    /// Get a customer by ID
    async fn get_by_id(&self, id: i32) -> CustomerResult<Option<Customer>>;

    /// List customers with optional filters
    async fn list(&self, filter: CustomerFilter) -> CustomerResult<Vec<Customer>>;

    /// Update an existing customer
    async fn update(&self, id: i32, input: UpdateCustomer) -> CustomerResult<Customer>;

    /// Delete a customer by ID
    async fn delete(&self, id: i32) -> CustomerResult<bool>;
}

/// In-memory implementation of CustomerRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<i32, Customer>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        let customer = Customer {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
        };
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());

        tracing::info!(customer_id = customer.id, "Created customer");
        Ok(customer)
    }

    async fn get_by_id(&self, id: i32) -> CustomerResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }

    async fn list(&self, filter: CustomerFilter) -> CustomerResult<Vec<Customer>> {
        let customers = self.customers.read().await;
        let mut result: Vec<Customer> = customers
            .values()
            .filter(|c| {
                filter
                    .name
                    .as_ref()
                    .is_none_or(|name| c.name.contains(name.as_str()))
            })
            .cloned()
            .collect();
        result.sort_by_key(|c| c.id);
        Ok(result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn update(&self, id: i32, input: UpdateCustomer) -> CustomerResult<Customer> {
        let mut customers = self.customers.write().await;
        let customer = customers.get_mut(&id).ok_or(CustomerError::NotFound(id))?;
        customer.apply_update(input);
        Ok(customer.clone())
    }

    async fn delete(&self, id: i32) -> CustomerResult<bool> {
        let mut customers = self.customers.write().await;
        Ok(customers.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> CreateCustomer {
        CreateCustomer {
            name: "John Doe".to_string(),
            phone_number: Some("+628123456789".to_string()),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_customer() {
        let repo = InMemoryCustomerRepository::new();

        let customer = repo.create(john()).await.unwrap();
        assert!(customer.id > 0);

        let found = repo.get_by_id(customer.id).await.unwrap().unwrap();
        assert_eq!(found, customer);
    }

    #[tokio::test]
    async fn test_list_filters_by_name() {
        let repo = InMemoryCustomerRepository::new();
        repo.create(john()).await.unwrap();
        repo.create(CreateCustomer {
            name: "Jane Smith".to_string(),
            phone_number: None,
            email: None,
        })
        .await
        .unwrap();

        let filter = CustomerFilter {
            name: Some("Jane".to_string()),
            ..Default::default()
        };
        let customers = repo.list(filter).await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Jane Smith");
    }

    #[tokio::test]
    async fn test_update_applies_partial_fields() {
        let repo = InMemoryCustomerRepository::new();
        let customer = repo.create(john()).await.unwrap();

        let updated = repo
            .update(
                customer.id,
                UpdateCustomer {
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "John Doe");
        assert_eq!(updated.email.as_deref(), Some("john@example.com"));
    }

    #[tokio::test]
    async fn test_update_missing_customer_fails() {
        let repo = InMemoryCustomerRepository::new();
        let result = repo.update(7, UpdateCustomer::default()).await;
        assert!(matches!(result, Err(CustomerError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_customer() {
        let repo = InMemoryCustomerRepository::new();
        let customer = repo.create(john()).await.unwrap();

        assert!(repo.delete(customer.id).await.unwrap());
        assert!(!repo.delete(customer.id).await.unwrap());
        assert!(repo.get_by_id(customer.id).await.unwrap().is_none());
    }
}
