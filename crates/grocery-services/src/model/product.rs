use resource_framework::{EntityId, Reference};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A catalogue product.
///
/// See [`impl ResourceEntity for Product`](#impl-ResourceEntity-for-Product) for how bodies
/// build and merge into it. Business fields are optional so that partial bodies and
/// missing values are representable; the constraints below are checked on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Product {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub reference: Reference,
    #[validate(length(min = 3, max = 255, message = "size must be between 3 and 255"))]
    pub name: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, max = 100000.0, message = "must be between 0 and 100000"))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, max = 100000.0, message = "must be between 0 and 100000"))]
    pub purchase_price: Option<f64>,
    #[validate(range(min = 0, max = 10000000, message = "must be between 0 and 10000000"))]
    pub available: Option<i64>,
}

/// Client payload for product create, replace and patch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductBody {
    pub reference: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub purchase_price: Option<f64>,
    pub available: Option<i64>,
}

/// Products whose `available` stock is strictly greater than `quantity_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductFilter {
    quantity_min: i64,
}

impl ProductFilter {
    /// A negative minimum is clamped to 0.
    pub fn available_over(quantity_min: i64) -> Self {
        Self {
            quantity_min: quantity_min.max(0),
        }
    }

    pub fn quantity_min(&self) -> i64 {
        self.quantity_min
    }
}

/// Read-time margins of a product. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMargin {
    pub product: Product,
    pub unit_margin: f64,
    pub potential_margin: f64,
}
