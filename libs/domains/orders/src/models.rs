use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Order header. The total is computed server-side at creation time and
/// equals the sum of the item subtotals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub payment_method: String,
    pub total: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Priced order line, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_id: i32,
    pub quantity: i32,
    pub subtotal: f64,
}

/// Order header together with its line items (read path)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub payment_method: String,
    pub total: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            payment_method: order.payment_method,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            items,
        }
    }
}

/// DTO for creating an order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    pub customer_id: Option<i32>,
    #[serde(default = "default_payment_method")]
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
    pub items: Vec<CreateOrderItem>,
}

fn default_payment_method() -> String {
    "cash".to_string()
}

/// DTO for one requested order line.
///
/// A client-submitted `subtotal` is accepted for wire compatibility but
/// never trusted; pricing is always recomputed from the catalog.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderItem {
    pub menu_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub addon_ids: Vec<i32>,
    pub subtotal: Option<f64>,
}

fn default_quantity() -> i32 {
    1
}

/// DTO for updating an order (explicit per-field semantics)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    pub customer_id: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub status: Option<String>,
}

/// Payment recorded against an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub paid_at: Option<DateTime<Utc>>,
}

/// DTO for recording a payment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePayment {
    pub order_id: i32,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
    #[serde(default = "default_payment_status")]
    #[validate(length(min = 1, max = 30))]
    pub payment_status: String,
}

fn default_payment_status() -> String {
    "paid".to_string()
}

/// DTO for updating a payment
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePayment {
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub payment_status: Option<String>,
}

/// Fully priced order ready for atomic persistence (service output,
/// repository input)
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: Option<i32>,
    pub payment_method: String,
    pub total: f64,
    pub items: Vec<NewOrderItem>,
}

/// Priced line belonging to a NewOrder
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub menu_id: i32,
    pub quantity: i32,
    pub subtotal: f64,
}
