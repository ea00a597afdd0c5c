//! Derived product margins, computed at read time and never stored.

use resource_framework::round_amount;

use crate::model::{Product, ProductMargin};

impl ProductMargin {
    /// `unit_margin = price - purchase_price`, `potential_margin = unit_margin * available`.
    /// A missing input yields 0.
    pub fn of(product: Product, decimals: u32) -> Self {
        let unit_margin = match (product.price, product.purchase_price) {
            (Some(price), Some(purchase)) => round_amount(price - purchase, decimals),
            _ => 0.0,
        };
        let potential_margin = product
            .available
            .map(|available| round_amount(unit_margin * available as f64, decimals))
            .unwrap_or(0.0);
        Self {
            product,
            unit_margin,
            potential_margin,
        }
    }
}
