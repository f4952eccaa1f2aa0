use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[cfg(test)]
use mockall::automock;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreatePayment, NewOrder, Order, OrderItem, Payment, UpdateOrder, UpdatePayment};

/// Repository trait for order and payment persistence.
///
/// `create_order` persists the header and all items atomically: either
/// everything is visible afterwards or nothing is.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Atomically persist a priced order with its items
    async fn create_order(&self, order: NewOrder) -> OrderResult<Order>;

    /// Get an order header by ID
    async fn get_order(&self, id: i32) -> OrderResult<Option<Order>>;

    /// Get the items of an order
    async fn get_order_items(&self, order_id: i32) -> OrderResult<Vec<OrderItem>>;

    /// Update an order's customer, payment method, or status
    async fn update_order(&self, id: i32, input: UpdateOrder) -> OrderResult<Order>;

    /// Delete an order (items follow via cascade)
    async fn delete_order(&self, id: i32) -> OrderResult<bool>;

    /// Record a payment and mark the order completed, atomically
    async fn create_payment(&self, input: CreatePayment) -> OrderResult<Payment>;

    /// Get a payment by ID
    async fn get_payment(&self, id: i32) -> OrderResult<Option<Payment>>;

    /// Update an existing payment
    async fn update_payment(&self, id: i32, input: UpdatePayment) -> OrderResult<Payment>;

    /// Delete a payment by ID
    async fn delete_payment(&self, id: i32) -> OrderResult<bool>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<i32, Order>>>,
    items: Arc<RwLock<HashMap<i32, OrderItem>>>,
    payments: Arc<RwLock<HashMap<i32, Payment>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create_order(&self, new_order: NewOrder) -> OrderResult<Order> {
        // Both maps are locked before anything is written so the order and
        // its items become visible together.
        let mut orders = self.orders.write().await;
        let mut items = self.items.write().await;

        let order = Order {
            id: self.next_id(),
            customer_id: new_order.customer_id,
            payment_method: new_order.payment_method,
            total: new_order.total,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };

        for line in new_order.items {
            let item = OrderItem {
                id: self.next_id(),
                order_id: order.id,
                menu_id: line.menu_id,
                quantity: line.quantity,
                subtotal: line.subtotal,
            };
            items.insert(item.id, item);
        }
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = order.id, total = order.total, "Created order");
        Ok(order)
    }

    async fn get_order(&self, id: i32) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn get_order_items(&self, order_id: i32) -> OrderResult<Vec<OrderItem>> {
        let items = self.items.read().await;
        let mut result: Vec<OrderItem> = items
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect();
        result.sort_by_key(|item| item.id);
        Ok(result)
    }

    async fn update_order(&self, id: i32, input: UpdateOrder) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
        if let Some(customer_id) = input.customer_id {
            order.customer_id = Some(customer_id);
        }
        if let Some(payment_method) = input.payment_method {
            order.payment_method = payment_method;
        }
        if let Some(status) = input.status {
            order.status = status;
        }
        Ok(order.clone())
    }

    async fn delete_order(&self, id: i32) -> OrderResult<bool> {
        let mut orders = self.orders.write().await;
        let removed = orders.remove(&id).is_some();
        if removed {
            let mut items = self.items.write().await;
            items.retain(|_, item| item.order_id != id);
            let mut payments = self.payments.write().await;
            payments.retain(|_, payment| payment.order_id != id);
        }
        Ok(removed)
    }

    async fn create_payment(&self, input: CreatePayment) -> OrderResult<Payment> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&input.order_id)
            .ok_or(OrderError::NotFound(input.order_id))?;

        let payment = Payment {
            id: self.next_id(),
            order_id: input.order_id,
            amount: input.amount,
            payment_method: input.payment_method,
            payment_status: input.payment_status,
            paid_at: Some(Utc::now()),
        };
        order.status = "completed".to_string();

        self.payments
            .write()
            .await
            .insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn get_payment(&self, id: i32) -> OrderResult<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }

    async fn update_payment(&self, id: i32, input: UpdatePayment) -> OrderResult<Payment> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .get_mut(&id)
            .ok_or(OrderError::PaymentNotFound(id))?;
        if let Some(amount) = input.amount {
            payment.amount = amount;
        }
        if let Some(payment_method) = input.payment_method {
            payment.payment_method = payment_method;
        }
        if let Some(payment_status) = input.payment_status {
            payment.payment_status = payment_status;
        }
        Ok(payment.clone())
    }

    async fn delete_payment(&self, id: i32) -> OrderResult<bool> {
        let mut payments = self.payments.write().await;
        Ok(payments.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewOrderItem;

    fn priced_order() -> NewOrder {
        NewOrder {
            customer_id: None,
            payment_method: "cash".to_string(),
            total: 6.0,
            items: vec![NewOrderItem {
                menu_id: 1,
                quantity: 2,
                subtotal: 6.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_order_and_items_appear_together() {
        let repo = InMemoryOrderRepository::new();

        assert!(repo.get_order_items(1).await.unwrap().is_empty());

        let order = repo.create_order(priced_order()).await.unwrap();
        assert_eq!(order.status, "pending");
        assert_eq!(order.total, 6.0);

        let items = repo.get_order_items(order.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_id, order.id);
        assert_eq!(items[0].subtotal, 6.0);
    }

    #[tokio::test]
    async fn test_identical_orders_get_distinct_ids() {
        let repo = InMemoryOrderRepository::new();

        let first = repo.create_order(priced_order()).await.unwrap();
        let second = repo.create_order(priced_order()).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_order_fields() {
        let repo = InMemoryOrderRepository::new();
        let order = repo.create_order(priced_order()).await.unwrap();

        let updated = repo
            .update_order(
                order.id,
                UpdateOrder {
                    status: Some("preparing".to_string()),
                    payment_method: Some("card".to_string()),
                    customer_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "preparing");
        assert_eq!(updated.payment_method, "card");
        // Untouched fields keep their values
        assert_eq!(updated.total, 6.0);
    }

    #[tokio::test]
    async fn test_delete_order_removes_items() {
        let repo = InMemoryOrderRepository::new();
        let order = repo.create_order(priced_order()).await.unwrap();

        assert!(repo.delete_order(order.id).await.unwrap());
        assert!(repo.get_order(order.id).await.unwrap().is_none());
        assert!(repo.get_order_items(order.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payment_marks_order_completed() {
        let repo = InMemoryOrderRepository::new();
        let order = repo.create_order(priced_order()).await.unwrap();

        let payment = repo
            .create_payment(CreatePayment {
                order_id: order.id,
                amount: 6.0,
                payment_method: "cash".to_string(),
                payment_status: "paid".to_string(),
            })
            .await
            .unwrap();

        assert!(payment.paid_at.is_some());
        let order = repo.get_order(order.id).await.unwrap().unwrap();
        assert_eq!(order.status, "completed");
    }

    #[tokio::test]
    async fn test_payment_for_missing_order_fails() {
        let repo = InMemoryOrderRepository::new();
        let result = repo
            .create_payment(CreatePayment {
                order_id: 404,
                amount: 1.0,
                payment_method: "cash".to_string(),
                payment_status: "paid".to_string(),
            })
            .await;
        assert!(matches!(result, Err(OrderError::NotFound(404))));
    }
}
