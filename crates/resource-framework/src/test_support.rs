//! Entity used by the unit tests of this crate.

use serde::Serialize;
use validator::Validate;

use crate::entity::{round_amount, EntityId, ResourceEntity, ServiceSettings};
use crate::error::{field_violations, FieldViolation, ResourceError};
use crate::reference::Reference;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Gadget {
    #[serde(skip)]
    pub id: Option<EntityId>,
    pub reference: Reference,
    #[validate(range(min = 0.0, max = 1000.0, message = "must be between 0 and 1000"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub available: Option<i64>,
    pub retired: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GadgetBody {
    pub reference: Option<String>,
    pub price: Option<f64>,
    pub available: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct GadgetFilter {
    pub min_available: i64,
}

#[derive(Debug, Clone)]
pub enum GadgetAction {
    Retire,
}

pub fn gadget(reference: &str, available: i64) -> Gadget {
    Gadget {
        id: None,
        reference: Reference::parse(reference).unwrap(),
        price: None,
        available: Some(available),
        retired: false,
    }
}

impl ResourceEntity for Gadget {
    type Body = GadgetBody;
    type Filter = GadgetFilter;
    type Action = GadgetAction;

    const ENTITY_NAME: &'static str = "gadget";
    const BASE_PATH: &'static str = "/gadgets";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn reference(&self) -> &Reference {
        &self.reference
    }

    fn body_reference(body: &GadgetBody) -> Option<&str> {
        body.reference.as_deref()
    }

    fn from_body(reference: Reference, body: GadgetBody) -> Self {
        Self {
            id: None,
            reference,
            price: body.price,
            available: body.available,
            retired: false,
        }
    }

    fn merge(&mut self, body: GadgetBody) {
        if body.price.is_some() {
            self.price = body.price;
        }
        if body.available.is_some() {
            self.available = body.available;
        }
    }

    fn normalize(&mut self, settings: &ServiceSettings) {
        self.price = self
            .price
            .map(|price| round_amount(price, settings.amount_decimals));
    }

    fn apply(&mut self, action: GadgetAction) -> Result<(), ResourceError> {
        match action {
            GadgetAction::Retire => self.retired = true,
        }
        Ok(())
    }

    fn matches(&self, filter: &GadgetFilter) -> bool {
        self.available
            .is_some_and(|available| available > filter.min_available)
    }

    fn violations(&self) -> Vec<FieldViolation> {
        field_violations(&self.reference, self.validate())
    }
}
