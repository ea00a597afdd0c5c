//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait is the contract every stored resource (Product, Order,
//! Payment, …) implements to be handled by the generic [`crate::ResourceService`] and
//! [`crate::store::StoreActor`]. It names the payload a client sends (`Body`), the
//! query a client can run (`Filter`) and the resource-specific commands it accepts
//! (`Action`), and provides the hooks the lifecycle uses to build, merge and check records.
//!
//! # Architecture Note
//! The lifecycle (reference checks, existence checks, envelopes, error decoding) is
//! written once against this trait. An entity only describes its own data: how a body
//! becomes a record, how a partial body merges into one, and which constraints hold.
//!
//! Associated types keep the surfaces apart: a `ProductBody` cannot be sent to the
//! payment service, and a `PaymentFilter` cannot query products.
//!
//! # Provided Methods
//! - [`ResourceEntity::on_create`] forces defaults on a freshly built record.
//! - [`ResourceEntity::normalize`] rounds and canonicalizes fields before storage.
//! - [`ResourceEntity::violations`] checks only the reference length unless overridden.

use serde::Serialize;
use std::fmt::{self, Debug, Display};

use crate::error::{FieldViolation, ResourceError};
use crate::reference::Reference;

/// Storage identity assigned by the store on first save. Never supplied by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u64);

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Formatting rules applied by [`ResourceEntity::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Decimal places kept on monetary amounts.
    pub amount_decimals: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { amount_decimals: 2 }
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_amount(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

/// Action type for entities that accept no commands beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}

/// Trait that any stored resource must implement.
pub trait ResourceEntity: Clone + Debug + Send + Sync + Serialize + 'static {
    /// Client payload used for create, full update and partial update.
    type Body: Debug + Send + Sync + 'static;

    /// Criteria for filtered collection reads.
    type Filter: Debug + Send + Sync + 'static;

    /// Resource-specific commands run through the OTHER operation kind.
    type Action: Debug + Send + Sync + 'static;

    /// Lower-case name used in messages and logs (`"product"`).
    const ENTITY_NAME: &'static str;

    /// Collection path used to build locations (`"/products"`).
    const BASE_PATH: &'static str;

    fn id(&self) -> Option<EntityId>;

    fn assign_id(&mut self, id: EntityId);

    fn reference(&self) -> &Reference;

    /// Raw, un-normalized reference carried by a body.
    fn body_reference(body: &Self::Body) -> Option<&str>;

    /// Builds a new record. The body's own reference is ignored in favour of `reference`.
    fn from_body(reference: Reference, body: Self::Body) -> Self;

    /// Copies every field present in `body` onto `self`. Absent fields are left untouched.
    fn merge(&mut self, body: Self::Body);

    fn on_create(&mut self) {}

    fn normalize(&mut self, _settings: &ServiceSettings) {}

    fn apply(&mut self, action: Self::Action) -> Result<(), ResourceError>;

    fn matches(&self, filter: &Self::Filter) -> bool;

    fn violations(&self) -> Vec<FieldViolation> {
        self.reference().violations("reference")
    }
}
