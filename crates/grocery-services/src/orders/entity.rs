//! [`ResourceEntity`] implementation for [`PurchaseOrder`].

use resource_framework::{
    field_violations, round_amount, EntityId, FieldViolation, NoAction, Reference,
    ResourceEntity, ResourceError, ServiceSettings,
};
use validator::Validate;

use crate::model::{OrderBody, OrderFilter, PurchaseOrder};

impl ResourceEntity for PurchaseOrder {
    type Body = OrderBody;
    type Filter = OrderFilter;
    type Action = NoAction;

    const ENTITY_NAME: &'static str = "order";
    const BASE_PATH: &'static str = "/orders";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn reference(&self) -> &Reference {
        &self.reference
    }

    fn body_reference(body: &OrderBody) -> Option<&str> {
        body.reference.as_deref()
    }

    fn from_body(reference: Reference, body: OrderBody) -> Self {
        Self {
            id: None,
            reference,
            product_reference: Reference::normalize(body.product_reference.as_deref()),
            order_date: body.order_date,
            quantity: body.quantity,
            amount: body.amount,
            balance: body.balance,
            paid: body.paid,
        }
    }

    fn merge(&mut self, body: OrderBody) {
        if let Some(product_reference) = body.product_reference.as_deref() {
            self.product_reference = Reference::parse(product_reference);
        }
        if body.order_date.is_some() {
            self.order_date = body.order_date;
        }
        if body.quantity.is_some() {
            self.quantity = body.quantity;
        }
        if body.amount.is_some() {
            self.amount = body.amount;
        }
        if body.balance.is_some() {
            self.balance = body.balance;
        }
        if body.paid.is_some() {
            self.paid = body.paid;
        }
    }

    fn normalize(&mut self, settings: &ServiceSettings) {
        let decimals = settings.amount_decimals;
        self.amount = self.amount.map(|amount| round_amount(amount, decimals));
        self.balance = self.balance.map(|balance| round_amount(balance, decimals));
    }

    fn apply(&mut self, action: NoAction) -> Result<(), ResourceError> {
        match action {}
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        let product_matches = filter
            .product_reference
            .as_ref()
            .map_or(true, |wanted| self.product_reference.as_ref() == Some(wanted));
        let paid_matches = filter.paid.map_or(true, |paid| self.paid == Some(paid));
        product_matches && paid_matches
    }

    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = field_violations(&self.reference, self.validate());
        if let Some(product_reference) = &self.product_reference {
            violations.extend(product_reference.violations("product_reference"));
        }
        violations.sort_by(|a, b| a.property.cmp(&b.property));
        violations
    }
}
