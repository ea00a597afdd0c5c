use chrono::NaiveDate;
use resource_framework::{EntityId, Reference};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A purchase order for a quantity of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct PurchaseOrder {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub reference: Reference,
    #[validate(required(message = "must not be blank"))]
    pub product_reference: Option<Reference>,
    pub order_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 10000000, message = "must be between 1 and 10000000"))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0.0, max = 100000.0, message = "must be between 0 and 100000"))]
    pub amount: Option<f64>,
    #[validate(range(min = 0.0, max = 100000.0, message = "must be between 0 and 100000"))]
    pub balance: Option<f64>,
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderBody {
    pub reference: Option<String>,
    pub product_reference: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub quantity: Option<i64>,
    pub amount: Option<f64>,
    pub balance: Option<f64>,
    pub paid: Option<bool>,
}

/// Orders matching every criterion present. An empty filter matches all orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub product_reference: Option<Reference>,
    pub paid: Option<bool>,
}

impl OrderFilter {
    /// A blank product reference is ignored.
    pub fn new(product_reference: Option<&str>, paid: Option<bool>) -> Self {
        Self {
            product_reference: Reference::normalize(product_reference),
            paid,
        }
    }
}
