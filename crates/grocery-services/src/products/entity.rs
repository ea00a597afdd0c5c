//! [`ResourceEntity`] implementation for [`Product`].
//!
//! Products accept no actions beyond CRUD. Prices are rounded to the configured number
//! of decimals before every save.

use resource_framework::{
    field_violations, round_amount, EntityId, FieldViolation, NoAction, Reference,
    ResourceEntity, ResourceError, ServiceSettings,
};
use validator::Validate;

use crate::model::{Product, ProductBody, ProductFilter};

impl ResourceEntity for Product {
    type Body = ProductBody;
    type Filter = ProductFilter;
    type Action = NoAction;

    const ENTITY_NAME: &'static str = "product";
    const BASE_PATH: &'static str = "/products";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn reference(&self) -> &Reference {
        &self.reference
    }

    fn body_reference(body: &ProductBody) -> Option<&str> {
        body.reference.as_deref()
    }

    fn from_body(reference: Reference, body: ProductBody) -> Self {
        Self {
            id: None,
            reference,
            name: body.name,
            image_url: body.image_url,
            price: body.price,
            purchase_price: body.purchase_price,
            available: body.available,
        }
    }

    fn merge(&mut self, body: ProductBody) {
        if body.name.is_some() {
            self.name = body.name;
        }
        if body.image_url.is_some() {
            self.image_url = body.image_url;
        }
        if body.price.is_some() {
            self.price = body.price;
        }
        if body.purchase_price.is_some() {
            self.purchase_price = body.purchase_price;
        }
        if body.available.is_some() {
            self.available = body.available;
        }
    }

    fn normalize(&mut self, settings: &ServiceSettings) {
        let decimals = settings.amount_decimals;
        self.price = self.price.map(|price| round_amount(price, decimals));
        self.purchase_price = self
            .purchase_price
            .map(|price| round_amount(price, decimals));
    }

    fn apply(&mut self, action: NoAction) -> Result<(), ResourceError> {
        match action {}
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        self.available
            .is_some_and(|available| available > filter.quantity_min())
    }

    fn violations(&self) -> Vec<FieldViolation> {
        field_violations(&self.reference, self.validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Product {
        Product::from_body(
            Reference::parse("apple-001").unwrap(),
            ProductBody {
                reference: Some("ignored".to_string()),
                name: Some("Apple".to_string()),
                image_url: Some("https://cdn.example.com/apple.png".to_string()),
                price: Some(1.499),
                purchase_price: Some(0.8),
                available: Some(120),
            },
        )
    }

    #[test]
    fn test_from_body_uses_given_reference() {
        let product = apple();
        assert_eq!(product.reference.as_str(), "APPLE-001");
        assert_eq!(product.id, None);
        assert!(product.violations().is_empty());
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut product = apple();
        product.merge(ProductBody {
            price: Some(2.0),
            ..Default::default()
        });
        assert_eq!(product.price, Some(2.0));
        assert_eq!(product.name.as_deref(), Some("Apple"));
        assert_eq!(product.available, Some(120));
    }

    #[test]
    fn test_normalize_rounds_prices() {
        let mut product = apple();
        product.normalize(&ServiceSettings::default());
        assert_eq!(product.price, Some(1.5));
        assert_eq!(product.purchase_price, Some(0.8));
    }

    #[test]
    fn test_violations_sorted_by_property() {
        let mut product = apple();
        product.name = Some("ab".to_string());
        product.price = Some(-1.0);
        product.image_url = Some("not a url".to_string());

        let properties: Vec<String> = product
            .violations()
            .into_iter()
            .map(|v| v.property)
            .collect();
        assert_eq!(properties, vec!["image_url", "name", "price"]);
    }

    #[test]
    fn test_filter_is_strictly_greater_and_clamped() {
        let product = apple();
        assert!(product.matches(&ProductFilter::available_over(119)));
        assert!(!product.matches(&ProductFilter::available_over(120)));
        assert_eq!(ProductFilter::available_over(-5).quantity_min(), 0);

        let mut empty = apple();
        empty.available = Some(0);
        assert!(!empty.matches(&ProductFilter::available_over(-10)));
    }
}
