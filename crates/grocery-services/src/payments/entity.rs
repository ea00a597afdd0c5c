//! [`ResourceEntity`] implementation for [`Payment`].
//!
//! A payment is always created `VALID`, whatever status the body carries. The only way
//! to a `CANCELLED` payment is the [`PaymentAction::Cancel`] action or an explicit update.

use resource_framework::{
    field_violations, round_amount, EntityId, FieldViolation, Reference, ResourceEntity,
    ResourceError, ServiceSettings,
};
use validator::Validate;

use super::actions::PaymentAction;
use crate::model::{Payment, PaymentBody, PaymentFilter, PaymentStatus};

impl ResourceEntity for Payment {
    type Body = PaymentBody;
    type Filter = PaymentFilter;
    type Action = PaymentAction;

    const ENTITY_NAME: &'static str = "payment";
    const BASE_PATH: &'static str = "/payments";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn reference(&self) -> &Reference {
        &self.reference
    }

    fn body_reference(body: &PaymentBody) -> Option<&str> {
        body.reference.as_deref()
    }

    fn from_body(reference: Reference, body: PaymentBody) -> Self {
        Self {
            id: None,
            reference,
            order_reference: Reference::normalize(body.order_reference.as_deref()),
            payment_date: body.payment_date,
            payment_amount: body.payment_amount,
            status: body.status,
            masked_card_number: body.masked_card_number,
        }
    }

    fn merge(&mut self, body: PaymentBody) {
        if let Some(order_reference) = body.order_reference.as_deref() {
            self.order_reference = Reference::parse(order_reference);
        }
        if body.payment_date.is_some() {
            self.payment_date = body.payment_date;
        }
        if body.payment_amount.is_some() {
            self.payment_amount = body.payment_amount;
        }
        if body.status.is_some() {
            self.status = body.status;
        }
        if body.masked_card_number.is_some() {
            self.masked_card_number = body.masked_card_number;
        }
    }

    fn on_create(&mut self) {
        self.status = Some(PaymentStatus::Valid);
    }

    fn normalize(&mut self, settings: &ServiceSettings) {
        self.payment_amount = self
            .payment_amount
            .map(|amount| round_amount(amount, settings.amount_decimals));
    }

    fn apply(&mut self, action: PaymentAction) -> Result<(), ResourceError> {
        match action {
            PaymentAction::Cancel => self.status = Some(PaymentStatus::Cancelled),
        }
        Ok(())
    }

    fn matches(&self, filter: &PaymentFilter) -> bool {
        let order_matches = filter
            .order_reference
            .as_ref()
            .map_or(true, |wanted| self.order_reference.as_ref() == Some(wanted));
        let status_matches = filter
            .status
            .map_or(true, |status| self.status == Some(status));
        order_matches && status_matches
    }

    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = field_violations(&self.reference, self.validate());
        if let Some(order_reference) = &self.order_reference {
            violations.extend(order_reference.violations("order_reference"));
        }
        violations.sort_by(|a, b| a.property.cmp(&b.property));
        violations
    }
}
