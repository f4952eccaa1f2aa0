use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Customer directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// DTO for creating a customer
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

/// DTO for updating a customer
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

/// Query filters for listing customers
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct CustomerFilter {
    /// Substring match on the customer name
    pub name: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Customer {
    /// Apply a partial update in place
    pub fn apply_update(&mut self, update: UpdateCustomer) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = Some(phone_number);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }
}
