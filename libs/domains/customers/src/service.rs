use std::sync::Arc;
use validator::Validate;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::repository::CustomerRepository;

/// Business logic for the customer directory
#[derive(Debug, Clone)]
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_customer(&self, input: CreateCustomer) -> CustomerResult<Customer> {
        input
            .validate()
            .map_err(|e| CustomerError::Validation(e.to_string()))?;
        self.repository.create(input).await
    }

    pub async fn get_customer(&self, id: i32) -> CustomerResult<Customer> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    pub async fn list_customers(&self, filter: CustomerFilter) -> CustomerResult<Vec<Customer>> {
        self.repository.list(filter).await
    }

    pub async fn update_customer(
        &self,
        id: i32,
        input: UpdateCustomer,
    ) -> CustomerResult<Customer> {
        input
            .validate()
            .map_err(|e| CustomerError::Validation(e.to_string()))?;
        self.repository.update(id, input).await
    }

    pub async fn delete_customer(&self, id: i32) -> CustomerResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CustomerError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCustomerRepository;

    fn service() -> CustomerService<InMemoryCustomerRepository> {
        CustomerService::new(InMemoryCustomerRepository::new())
    }

    #[tokio::test]
    async fn test_get_missing_customer_returns_not_found() {
        let service = service();
        let result = service.get_customer(42).await;
        assert!(matches!(result, Err(CustomerError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let service = service();
        let result = service
            .create_customer(CreateCustomer {
                name: "John Doe".to_string(),
                phone_number: None,
                email: Some("not-an-email".to_string()),
            })
            .await;
        assert!(matches!(result, Err(CustomerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let service = service();

        let customer = service
            .create_customer(CreateCustomer {
                name: "Jane Smith".to_string(),
                phone_number: Some("+628987654321".to_string()),
                email: None,
            })
            .await
            .unwrap();

        let updated = service
            .update_customer(
                customer.id,
                UpdateCustomer {
                    name: Some("Jane S.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane S.");

        service.delete_customer(customer.id).await.unwrap();
        let result = service.get_customer(customer.id).await;
        assert!(matches!(result, Err(CustomerError::NotFound(_))));
    }
}
