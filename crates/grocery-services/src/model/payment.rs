use chrono::NaiveDate;
use resource_framework::{EntityId, Reference};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Valid,
    Cancelled,
}

/// A payment settling (part of) one order.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Payment {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub reference: Reference,
    #[validate(required(message = "must not be blank"))]
    pub order_reference: Option<Reference>,
    #[validate(required(message = "must not be null"))]
    pub payment_date: Option<NaiveDate>,
    #[validate(
        required(message = "must not be null"),
        range(min = 0.0, max = 100000.0, message = "must be between 0 and 100000")
    )]
    pub payment_amount: Option<f64>,
    #[validate(required(message = "must not be null"))]
    pub status: Option<PaymentStatus>,
    #[validate(length(min = 5, max = 50, message = "size must be between 5 and 50"))]
    pub masked_card_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentBody {
    pub reference: Option<String>,
    pub order_reference: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub payment_amount: Option<f64>,
    pub status: Option<PaymentStatus>,
    pub masked_card_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub order_reference: Option<Reference>,
    pub status: Option<PaymentStatus>,
}

impl PaymentFilter {
    /// A blank order reference is ignored.
    pub fn new(order_reference: Option<&str>, status: Option<PaymentStatus>) -> Self {
        Self {
            order_reference: Reference::normalize(order_reference),
            status,
        }
    }
}
