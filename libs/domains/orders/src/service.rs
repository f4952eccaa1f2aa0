use std::sync::Arc;
use validator::Validate;

use domain_catalog::CatalogRepository;
use domain_customers::CustomerRepository;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, CreatePayment, NewOrder, NewOrderItem, Order, OrderWithItems, Payment,
    UpdateOrder, UpdatePayment,
};
use crate::pricing;
use crate::repository::OrderRepository;

/// Business logic for orders and payments.
///
/// Order creation validates every reference against the customer directory
/// and the catalog, prices the lines server-side, and hands the fully
/// priced order to the repository for atomic persistence. Nothing is
/// written until validation has passed in full.
#[derive(Debug, Clone)]
pub struct OrderService<R, C, D>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    repository: Arc<R>,
    catalog: Arc<C>,
    customers: Arc<D>,
}

impl<R, C, D> OrderService<R, C, D>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    pub fn new(repository: R, catalog: C, customers: D) -> Self {
        Self {
            repository: Arc::new(repository),
            catalog: Arc::new(catalog),
            customers: Arc::new(customers),
        }
    }

    /// Create an order: validate references, price the lines, persist
    /// atomically.
    ///
    /// Validation order is deterministic: empty check, then customer,
    /// then per line menu and add-ons. Quantities below 1 are clamped
    /// to 1. Client-submitted subtotals are ignored; add-on ownership
    /// is not checked against the menu.
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        if input.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        if let Some(customer_id) = input.customer_id {
            self.customers
                .get_by_id(customer_id)
                .await?
                .ok_or(OrderError::CustomerNotFound(customer_id))?;
        }

        let mut lines = Vec::with_capacity(input.items.len());
        let mut subtotals = Vec::with_capacity(input.items.len());

        for item in &input.items {
            let menu = self
                .catalog
                .get_menu(item.menu_id)
                .await?
                .ok_or(OrderError::MenuNotFound(item.menu_id))?;

            let mut addon_prices = Vec::with_capacity(item.addon_ids.len());
            for addon_id in &item.addon_ids {
                let addon = self
                    .catalog
                    .get_addon(*addon_id)
                    .await?
                    .ok_or(OrderError::AddonNotFound(*addon_id))?;
                addon_prices.push(addon.price);
            }

            let quantity = item.quantity.max(1);
            let subtotal = pricing::line_subtotal(menu.price, &addon_prices, quantity);
            subtotals.push(subtotal);
            lines.push(NewOrderItem {
                menu_id: menu.id,
                quantity,
                subtotal,
            });
        }

        let total = pricing::order_total(&subtotals);

        self.repository
            .create_order(NewOrder {
                customer_id: input.customer_id,
                payment_method: input.payment_method,
                total,
                items: lines,
            })
            .await
    }

    /// Get an order together with its items
    pub async fn get_order_with_items(&self, id: i32) -> OrderResult<OrderWithItems> {
        let order = self
            .repository
            .get_order(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;
        let items = self.repository.get_order_items(id).await?;
        Ok(OrderWithItems::new(order, items))
    }

    pub async fn update_order(&self, id: i32, input: UpdateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        if let Some(customer_id) = input.customer_id {
            self.customers
                .get_by_id(customer_id)
                .await?
                .ok_or(OrderError::CustomerNotFound(customer_id))?;
        }

        self.repository.update_order(id, input).await
    }

    pub async fn delete_order(&self, id: i32) -> OrderResult<()> {
        if !self.repository.delete_order(id).await? {
            return Err(OrderError::NotFound(id));
        }
        Ok(())
    }

    /// Record a payment; the repository marks the order completed in the
    /// same transaction.
    pub async fn create_payment(&self, input: CreatePayment) -> OrderResult<Payment> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;
        self.repository.create_payment(input).await
    }

    pub async fn get_payment(&self, id: i32) -> OrderResult<Payment> {
        self.repository
            .get_payment(id)
            .await?
            .ok_or(OrderError::PaymentNotFound(id))
    }

    pub async fn update_payment(&self, id: i32, input: UpdatePayment) -> OrderResult<Payment> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;
        self.repository.update_payment(id, input).await
    }

    pub async fn delete_payment(&self, id: i32) -> OrderResult<()> {
        if !self.repository.delete_payment(id).await? {
            return Err(OrderError::PaymentNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateOrderItem;
    use crate::repository::{InMemoryOrderRepository, MockOrderRepository};
    use chrono::Utc;
    use domain_catalog::{CreateMenu, CreateMenuAddon, InMemoryCatalogRepository};
    use domain_customers::{CreateCustomer, InMemoryCustomerRepository};

    async fn catalog_with_espresso() -> (InMemoryCatalogRepository, i32, i32) {
        let catalog = InMemoryCatalogRepository::new();
        let menu = catalog
            .create_menu(CreateMenu {
                name: "Espresso".to_string(),
                price: 2.5,
                category_id: None,
                image_url: None,
                description: None,
                is_available: true,
            })
            .await
            .unwrap();
        let addon = catalog
            .create_addon(
                menu.id,
                CreateMenuAddon {
                    name: "Extra Shot".to_string(),
                    price: 0.5,
                },
            )
            .await
            .unwrap();
        (catalog, menu.id, addon.id)
    }

    fn echo_order(new_order: NewOrder) -> OrderResult<Order> {
        Ok(Order {
            id: 1,
            customer_id: new_order.customer_id,
            payment_method: new_order.payment_method,
            total: new_order.total,
            status: "pending".to_string(),
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_pricing_menu_plus_addon_times_quantity() {
        let (catalog, menu_id, addon_id) = catalog_with_espresso().await;

        let mut mock = MockOrderRepository::new();
        mock.expect_create_order()
            .withf(|new_order| {
                new_order.total == 6.0
                    && new_order.items.len() == 1
                    && new_order.items[0].quantity == 2
                    && new_order.items[0].subtotal == 6.0
            })
            .times(1)
            .returning(echo_order);

        let service = OrderService::new(mock, catalog, InMemoryCustomerRepository::new());

        // 2.50 base + 0.50 add-on, quantity 2; the client subtotal must
        // be ignored
        let order = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![CreateOrderItem {
                    menu_id,
                    quantity: 2,
                    addon_ids: vec![addon_id],
                    subtotal: Some(999.0),
                }],
            })
            .await
            .unwrap();

        assert_eq!(order.total, 6.0);
        assert_eq!(order.status, "pending");
    }

    #[tokio::test]
    async fn test_empty_order_never_reaches_repository() {
        let (catalog, _, _) = catalog_with_espresso().await;

        let mut mock = MockOrderRepository::new();
        mock.expect_create_order().never();

        let service = OrderService::new(mock, catalog, InMemoryCustomerRepository::new());

        let result = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![],
            })
            .await;

        assert!(matches!(result, Err(OrderError::EmptyOrder)));
    }

    #[tokio::test]
    async fn test_unknown_menu_rejected_without_write() {
        let catalog = InMemoryCatalogRepository::new();

        let mut mock = MockOrderRepository::new();
        mock.expect_create_order().never();

        let service = OrderService::new(mock, catalog, InMemoryCustomerRepository::new());

        let result = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![CreateOrderItem {
                    menu_id: 999,
                    quantity: 1,
                    addon_ids: vec![],
                    subtotal: None,
                }],
            })
            .await;

        assert!(matches!(result, Err(OrderError::MenuNotFound(999))));
    }

    #[tokio::test]
    async fn test_unknown_customer_checked_before_catalog() {
        // Both the customer and the menu are missing; the customer error
        // must win because it is checked first.
        let catalog = InMemoryCatalogRepository::new();

        let mut mock = MockOrderRepository::new();
        mock.expect_create_order().never();

        let service = OrderService::new(mock, catalog, InMemoryCustomerRepository::new());

        let result = service
            .create_order(CreateOrder {
                customer_id: Some(42),
                payment_method: "cash".to_string(),
                items: vec![CreateOrderItem {
                    menu_id: 999,
                    quantity: 1,
                    addon_ids: vec![],
                    subtotal: None,
                }],
            })
            .await;

        assert!(matches!(result, Err(OrderError::CustomerNotFound(42))));
    }

    #[tokio::test]
    async fn test_unknown_addon_rejected() {
        let (catalog, menu_id, _) = catalog_with_espresso().await;

        let mut mock = MockOrderRepository::new();
        mock.expect_create_order().never();

        let service = OrderService::new(mock, catalog, InMemoryCustomerRepository::new());

        let result = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![CreateOrderItem {
                    menu_id,
                    quantity: 1,
                    addon_ids: vec![777],
                    subtotal: None,
                }],
            })
            .await;

        assert!(matches!(result, Err(OrderError::AddonNotFound(777))));
    }

    #[tokio::test]
    async fn test_zero_quantity_clamped_to_one() {
        let (catalog, menu_id, _) = catalog_with_espresso().await;

        let mut mock = MockOrderRepository::new();
        mock.expect_create_order()
            .withf(|new_order| {
                new_order.items[0].quantity == 1 && new_order.items[0].subtotal == 2.5
            })
            .times(1)
            .returning(echo_order);

        let service = OrderService::new(mock, catalog, InMemoryCustomerRepository::new());

        let order = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![CreateOrderItem {
                    menu_id,
                    quantity: 0,
                    addon_ids: vec![],
                    subtotal: None,
                }],
            })
            .await
            .unwrap();

        assert_eq!(order.total, 2.5);
    }

    #[tokio::test]
    async fn test_identical_requests_create_distinct_orders() {
        let (catalog, menu_id, _) = catalog_with_espresso().await;
        let customers = InMemoryCustomerRepository::new();
        let customer = customers
            .create(CreateCustomer {
                name: "John Doe".to_string(),
                phone_number: None,
                email: None,
            })
            .await
            .unwrap();

        let service = OrderService::new(InMemoryOrderRepository::new(), catalog, customers);

        let request = CreateOrder {
            customer_id: Some(customer.id),
            payment_method: "cash".to_string(),
            items: vec![CreateOrderItem {
                menu_id,
                quantity: 1,
                addon_ids: vec![],
                subtotal: None,
            }],
        };

        let first = service.create_order(request.clone()).await.unwrap();
        let second = service.create_order(request).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.total, second.total);
    }

    #[tokio::test]
    async fn test_multi_line_total_and_read_back() {
        let (catalog, espresso_id, addon_id) = catalog_with_espresso().await;
        let cake = catalog
            .create_menu(CreateMenu {
                name: "Banana Cake".to_string(),
                price: 4.0,
                category_id: None,
                image_url: None,
                description: None,
                is_available: true,
            })
            .await
            .unwrap();

        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog,
            InMemoryCustomerRepository::new(),
        );

        let order = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![
                    CreateOrderItem {
                        menu_id: espresso_id,
                        quantity: 2,
                        addon_ids: vec![addon_id],
                        subtotal: None,
                    },
                    CreateOrderItem {
                        menu_id: cake.id,
                        quantity: 1,
                        addon_ids: vec![],
                        subtotal: None,
                    },
                ],
            })
            .await
            .unwrap();

        // (2.5 + 0.5) * 2 + 4.0
        assert_eq!(order.total, 10.0);

        let with_items = service.get_order_with_items(order.id).await.unwrap();
        assert_eq!(with_items.items.len(), 2);
        assert_eq!(
            with_items.total,
            with_items.items.iter().map(|i| i.subtotal).sum::<f64>()
        );
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_not_found() {
        let (catalog, _, _) = catalog_with_espresso().await;
        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog,
            InMemoryCustomerRepository::new(),
        );

        let result = service.get_order_with_items(12345).await;
        assert!(matches!(result, Err(OrderError::NotFound(12345))));
    }

    #[tokio::test]
    async fn test_payment_flow_completes_order() {
        let (catalog, menu_id, _) = catalog_with_espresso().await;
        let service = OrderService::new(
            InMemoryOrderRepository::new(),
            catalog,
            InMemoryCustomerRepository::new(),
        );

        let order = service
            .create_order(CreateOrder {
                customer_id: None,
                payment_method: "cash".to_string(),
                items: vec![CreateOrderItem {
                    menu_id,
                    quantity: 1,
                    addon_ids: vec![],
                    subtotal: None,
                }],
            })
            .await
            .unwrap();

        let payment = service
            .create_payment(CreatePayment {
                order_id: order.id,
                amount: order.total,
                payment_method: "cash".to_string(),
                payment_status: "paid".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(payment.order_id, order.id);

        let completed = service.get_order_with_items(order.id).await.unwrap();
        assert_eq!(completed.status, "completed");

        service.delete_payment(payment.id).await.unwrap();
        let result = service.get_payment(payment.id).await;
        assert!(matches!(result, Err(OrderError::PaymentNotFound(_))));
    }
}
